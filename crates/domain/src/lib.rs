//! Character sheet domain: vocabulary, entities, rule tables and
//! validation for tabletop character creation.

pub mod character;
pub mod draft;
pub mod error;
pub mod ids;
pub mod rules;
pub mod types;
pub mod validation;

pub use character::{AbilityScore, AbilityScores, Character, MulticlassEntry};
pub use draft::{
    blank_to_none, BackgroundDetails, BasicInfo, CharacterDraft, ClassSelection, StepSlice,
};
pub use error::DomainError;
pub use ids::CharacterId;
pub use rules::{
    ability_modifier, point_buy_cost, proficiency_bonus, racial_bonuses, remaining_points,
    total_multiclass_levels, total_point_cost, POINT_BUY_BUDGET,
};
pub use types::{Ability, Alignment, Background, CharacterClass, Race};
pub use validation::{
    validate_ability_scores, validate_background, validate_basic_info, validate_character,
    validate_class, FieldError, Validate,
};
