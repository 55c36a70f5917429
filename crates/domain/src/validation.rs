//! Validation rule sets for each wizard step and for the whole character.
//!
//! Every rule set is a plain function from typed input to a list of
//! field-scoped errors. An empty list means the input is valid.

use serde::{Deserialize, Serialize};

use crate::character::AbilityScores;
use crate::draft::{BackgroundDetails, BasicInfo, CharacterDraft, ClassSelection, StepSlice};
use crate::rules::{
    total_multiclass_levels, total_point_cost, MAX_LEVEL, MAX_MULTICLASS_LEVELS,
    MAX_WIZARD_SCORE, MIN_WIZARD_SCORE, POINT_BUY_BUDGET,
};
use crate::types::{Alignment, Background, CharacterClass, Race};

/// Longest accepted character or player name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Validation error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the field (e.g. `characterName`, `multiclass.0.level`)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A step's fields plus the rule set that checks them.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\''
}

/// Identity and race rules.
pub fn validate_basic_info(input: &BasicInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name_len = input.name.chars().count();
    if name_len == 0 {
        errors.push(FieldError::new("characterName", "Character name is required"));
    } else {
        if name_len > MAX_NAME_LENGTH {
            errors.push(FieldError::new(
                "characterName",
                "Character name must be 50 characters or less",
            ));
        }
        if !input.name.chars().all(is_name_char) {
            errors.push(FieldError::new(
                "characterName",
                "Character name can only contain letters, spaces, hyphens, and apostrophes",
            ));
        }
    }

    if input.player_name.chars().count() > MAX_NAME_LENGTH {
        errors.push(FieldError::new(
            "playerName",
            "Player name must be 50 characters or less",
        ));
    }

    match input.race.parse::<Race>() {
        Ok(race) => {
            if !input.subrace.is_empty() && !race.has_subrace(&input.subrace) {
                errors.push(FieldError::new(
                    "subrace",
                    "Selected subrace is not compatible with chosen race",
                ));
            }
        }
        Err(_) => errors.push(FieldError::new("race", "Please select a valid race")),
    }

    errors
}

/// Class and multiclass rules. Subclass is free-form and not checked.
pub fn validate_class(input: &ClassSelection) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.class.parse::<CharacterClass>().is_err() {
        errors.push(FieldError::new("class", "Please select a valid class"));
    }

    for (idx, entry) in input.multiclass.iter().enumerate() {
        if entry.class.trim().is_empty() {
            errors.push(FieldError::new(
                format!("multiclass.{}.class", idx),
                "Multiclass entry requires a class",
            ));
        }
        if !(1..=MAX_LEVEL).contains(&entry.level) {
            errors.push(FieldError::new(
                format!("multiclass.{}.level", idx),
                "Multiclass level must be between 1 and 20",
            ));
        }
    }

    if total_multiclass_levels(&input.multiclass) > MAX_MULTICLASS_LEVELS {
        errors.push(FieldError::new(
            "multiclass",
            "Total multiclass levels cannot exceed 19",
        ));
    }

    errors
}

/// Per-score range and point-buy budget rules.
pub fn validate_ability_scores(scores: &AbilityScores<i32>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (ability, score) in scores.iter() {
        if *score < MIN_WIZARD_SCORE {
            errors.push(FieldError::new(
                ability.as_str(),
                format!("{} must be at least {}", ability.label(), MIN_WIZARD_SCORE),
            ));
        } else if *score > MAX_WIZARD_SCORE {
            errors.push(FieldError::new(
                ability.as_str(),
                format!("{} must be at most {}", ability.label(), MAX_WIZARD_SCORE),
            ));
        }
    }

    if total_point_cost(scores) > POINT_BUY_BUDGET {
        // Reported against the first ability so forms have a field to attach it to.
        errors.push(FieldError::new(
            "strength",
            "Ability score combination exceeds 27 point buy limit",
        ));
    }

    errors
}

/// Background, alignment and progression rules. Blank background or
/// alignment means "not chosen".
pub fn validate_background(input: &BackgroundDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !input.background.trim().is_empty() && input.background.parse::<Background>().is_err() {
        errors.push(FieldError::new("background", "Please select a valid background"));
    }
    if !input.alignment.trim().is_empty() && input.alignment.parse::<Alignment>().is_err() {
        errors.push(FieldError::new("alignment", "Please select a valid alignment"));
    }
    if !(1..=MAX_LEVEL).contains(&input.level) {
        errors.push(FieldError::new("level", "Level must be between 1 and 20"));
    }
    if input.experience_points < 0 {
        errors.push(FieldError::new(
            "experiencePoints",
            "Experience points cannot be negative",
        ));
    }

    errors
}

impl Validate for BasicInfo {
    fn validate(&self) -> Vec<FieldError> {
        validate_basic_info(self)
    }
}

impl Validate for ClassSelection {
    fn validate(&self) -> Vec<FieldError> {
        validate_class(self)
    }
}

impl Validate for AbilityScores<i32> {
    fn validate(&self) -> Vec<FieldError> {
        validate_ability_scores(self)
    }
}

impl Validate for BackgroundDetails {
    fn validate(&self) -> Vec<FieldError> {
        validate_background(self)
    }
}

/// Whole-character rules: every step's rule set plus presence of the fields
/// whose step defaults would otherwise mask their absence.
pub fn validate_character(draft: &CharacterDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.level.is_none() {
        errors.push(FieldError::new("level", "Level is required"));
    }
    if draft.ability_scores.is_none() {
        errors.push(FieldError::new("abilityScores", "Ability scores are required"));
    }

    errors.extend(validate_basic_info(&BasicInfo::from_draft(draft)));
    errors.extend(validate_class(&ClassSelection::from_draft(draft)));
    if let Some(scores) = &draft.ability_scores {
        errors.extend(validate_ability_scores(scores));
    }
    errors.extend(validate_background(&BackgroundDetails::from_draft(draft)));

    errors
}
