//! Outgoing request contracts for the character API.
//!
//! These types translate the wizard's draft shape into the server's
//! persisted schema: raw scores become `{ "base": n }` objects and the
//! proficiency bonus is attached from the level.

use serde::{Deserialize, Serialize};

use pcm_domain::{
    blank_to_none, proficiency_bonus, AbilityScores, CharacterDraft, DomainError,
    MulticlassEntry,
};

/// Loosest score bound the client enforces before sending; the server may
/// correct anything inside it.
pub const MIN_SENDABLE_SCORE: i32 = 1;
pub const MAX_SENDABLE_SCORE: i32 = 20;

/// A raw ability score as the server expects it on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScoreInput {
    pub base: i32,
}

fn to_inputs(scores: &AbilityScores<i32>) -> AbilityScores<AbilityScoreInput> {
    scores.map(|_, score| AbilityScoreInput { base: *score })
}

/// Alignment is only sent when it holds something other than whitespace.
fn sendable_alignment(alignment: &Option<String>) -> Option<String> {
    blank_to_none(alignment).map(str::to_string)
}

/// Body of `POST /api/characters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterPayload {
    pub character_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    pub race: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subrace: Option<String>,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiclass: Option<Vec<MulticlassEntry>>,
    pub level: i32,
    pub experience_points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    pub ability_scores: AbilityScores<AbilityScoreInput>,
    pub proficiency_bonus: i32,
}

impl TryFrom<&CharacterDraft> for CreateCharacterPayload {
    type Error = DomainError;

    /// Requires name, race, class and all six scores, each within 1–20.
    fn try_from(draft: &CharacterDraft) -> Result<Self, Self::Error> {
        let character_name = blank_to_none(&draft.name)
            .ok_or_else(|| DomainError::missing_field("characterName"))?;
        let race = blank_to_none(&draft.race).ok_or_else(|| DomainError::missing_field("race"))?;
        let class =
            blank_to_none(&draft.class).ok_or_else(|| DomainError::missing_field("class"))?;
        let scores = draft
            .ability_scores
            .ok_or_else(|| DomainError::missing_field("abilityScores"))?;

        for (ability, score) in scores.iter() {
            if !(MIN_SENDABLE_SCORE..=MAX_SENDABLE_SCORE).contains(score) {
                return Err(DomainError::validation(format!(
                    "Invalid {} score: {}",
                    ability, score
                )));
            }
        }

        let level = draft.level.unwrap_or(1);
        Ok(Self {
            character_name: character_name.to_string(),
            player_name: draft.player_name.clone(),
            race: race.to_string(),
            subrace: draft.subrace.clone(),
            class: class.to_string(),
            subclass: draft.subclass.clone(),
            multiclass: draft.multiclass.clone().filter(|m| !m.is_empty()),
            level,
            experience_points: draft.experience_points.unwrap_or(0),
            background: draft.background.clone(),
            alignment: sendable_alignment(&draft.alignment),
            ability_scores: to_inputs(&scores),
            proficiency_bonus: proficiency_bonus(level),
        })
    }
}

/// Body of `PUT /api/characters/{id}`.
///
/// Only fields present in the patch are serialized; absent fields are
/// omitted rather than sent as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subrace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiclass: Option<Vec<MulticlassEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Always the full six-key object when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_scores: Option<AbilityScores<AbilityScoreInput>>,
    /// Recomputed whenever `level` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_bonus: Option<i32>,
}

impl From<&CharacterDraft> for UpdateCharacterPayload {
    fn from(patch: &CharacterDraft) -> Self {
        Self {
            character_name: patch.name.clone(),
            player_name: patch.player_name.clone(),
            race: patch.race.clone(),
            subrace: patch.subrace.clone(),
            class: patch.class.clone(),
            subclass: patch.subclass.clone(),
            multiclass: patch.multiclass.clone(),
            level: patch.level,
            experience_points: patch.experience_points,
            background: patch.background.clone(),
            alignment: sendable_alignment(&patch.alignment),
            ability_scores: patch.ability_scores.as_ref().map(to_inputs),
            proficiency_bonus: patch.level.map(proficiency_bonus),
        }
    }
}

/// Sortable columns of the character list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CharacterName,
    Level,
    Race,
    Class,
    #[default]
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::CharacterName,
        SortField::Level,
        SortField::Race,
        SortField::Class,
        SortField::CreatedAt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortField::CharacterName => "Name",
            SortField::Level => "Level",
            SortField::Race => "Race",
            SortField::Class => "Class",
            SortField::CreatedAt => "Created",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query string of `GET /api/characters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCharactersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}
