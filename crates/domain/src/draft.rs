//! Character draft: the mutable accumulator a wizard session fills in,
//! plus the per-step slices of it that each form edits.

use crate::character::{AbilityScores, MulticlassEntry};

/// Partial character assembled across wizard steps.
///
/// Every field is optional. A draft also serves as a patch: when merged,
/// `Some` fields overwrite and `None` fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterDraft {
    pub name: Option<String>,
    pub player_name: Option<String>,
    pub race: Option<String>,
    pub subrace: Option<String>,
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub multiclass: Option<Vec<MulticlassEntry>>,
    pub level: Option<i32>,
    pub experience_points: Option<i64>,
    pub background: Option<String>,
    pub alignment: Option<String>,
    pub ability_scores: Option<AbilityScores<i32>>,
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl CharacterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow top-level merge. Nested values (ability scores, multiclass
    /// list) are replaced whole, never merged field by field.
    pub fn merge(&mut self, patch: CharacterDraft) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.player_name, patch.player_name);
        overwrite(&mut self.race, patch.race);
        overwrite(&mut self.subrace, patch.subrace);
        overwrite(&mut self.class, patch.class);
        overwrite(&mut self.subclass, patch.subclass);
        overwrite(&mut self.multiclass, patch.multiclass);
        overwrite(&mut self.level, patch.level);
        overwrite(&mut self.experience_points, patch.experience_points);
        overwrite(&mut self.background, patch.background);
        overwrite(&mut self.alignment, patch.alignment);
        overwrite(&mut self.ability_scores, patch.ability_scores);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Wire names of the fields that differ from `other`.
    ///
    /// Blank text and an absent value count as equal, as do an empty and an
    /// absent multiclass list.
    pub fn changed_fields(&self, other: &CharacterDraft) -> Vec<&'static str> {
        let text = |a: &Option<String>, b: &Option<String>| blank_to_none(a) != blank_to_none(b);
        let mut changed = Vec::new();
        if text(&self.name, &other.name) {
            changed.push("characterName");
        }
        if text(&self.player_name, &other.player_name) {
            changed.push("playerName");
        }
        if text(&self.race, &other.race) {
            changed.push("race");
        }
        if text(&self.subrace, &other.subrace) {
            changed.push("subrace");
        }
        if text(&self.class, &other.class) {
            changed.push("class");
        }
        if text(&self.subclass, &other.subclass) {
            changed.push("subclass");
        }
        if empty_to_none(&self.multiclass) != empty_to_none(&other.multiclass) {
            changed.push("multiclass");
        }
        if self.ability_scores != other.ability_scores {
            changed.push("abilityScores");
        }
        if text(&self.background, &other.background) {
            changed.push("background");
        }
        if text(&self.alignment, &other.alignment) {
            changed.push("alignment");
        }
        if self.level != other.level {
            changed.push("level");
        }
        if self.experience_points.unwrap_or(0) != other.experience_points.unwrap_or(0) {
            changed.push("experiencePoints");
        }
        changed
    }
}

/// Trimmed text, or `None` when absent or blank.
pub fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn empty_to_none(value: &Option<Vec<MulticlassEntry>>) -> Option<&[MulticlassEntry]> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Step 1 fields: identity and race.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub name: String,
    pub player_name: String,
    pub race: String,
    pub subrace: String,
}

/// Step 2 fields: primary class and multiclassing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSelection {
    pub class: String,
    pub subclass: String,
    pub multiclass: Vec<MulticlassEntry>,
}

/// Step 4 fields: background, alignment and progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundDetails {
    pub background: String,
    pub alignment: String,
    pub level: i32,
    pub experience_points: i64,
}

impl Default for BackgroundDetails {
    fn default() -> Self {
        Self {
            background: String::new(),
            alignment: String::new(),
            level: 1,
            experience_points: 0,
        }
    }
}

/// Conversion between a step's own fields and the shared draft.
pub trait StepSlice: Clone + Default {
    /// Seed the step's fields from whatever the draft already holds.
    fn from_draft(draft: &CharacterDraft) -> Self;

    /// The draft patch this step contributes once valid.
    fn to_patch(&self) -> CharacterDraft;
}

impl StepSlice for BasicInfo {
    fn from_draft(draft: &CharacterDraft) -> Self {
        Self {
            name: draft.name.clone().unwrap_or_default(),
            player_name: draft.player_name.clone().unwrap_or_default(),
            race: draft.race.clone().unwrap_or_default(),
            subrace: draft.subrace.clone().unwrap_or_default(),
        }
    }

    fn to_patch(&self) -> CharacterDraft {
        CharacterDraft {
            name: Some(self.name.clone()),
            player_name: Some(self.player_name.clone()),
            race: Some(self.race.clone()),
            subrace: Some(self.subrace.clone()),
            ..CharacterDraft::default()
        }
    }
}

impl StepSlice for ClassSelection {
    fn from_draft(draft: &CharacterDraft) -> Self {
        Self {
            class: draft.class.clone().unwrap_or_default(),
            subclass: draft.subclass.clone().unwrap_or_default(),
            multiclass: draft.multiclass.clone().unwrap_or_default(),
        }
    }

    fn to_patch(&self) -> CharacterDraft {
        CharacterDraft {
            class: Some(self.class.clone()),
            subclass: Some(self.subclass.clone()),
            multiclass: Some(self.multiclass.clone()),
            ..CharacterDraft::default()
        }
    }
}

impl StepSlice for AbilityScores<i32> {
    fn from_draft(draft: &CharacterDraft) -> Self {
        draft.ability_scores.unwrap_or_default()
    }

    fn to_patch(&self) -> CharacterDraft {
        CharacterDraft {
            ability_scores: Some(*self),
            ..CharacterDraft::default()
        }
    }
}

impl StepSlice for BackgroundDetails {
    fn from_draft(draft: &CharacterDraft) -> Self {
        let defaults = Self::default();
        Self {
            background: draft.background.clone().unwrap_or_default(),
            alignment: draft.alignment.clone().unwrap_or_default(),
            level: draft.level.unwrap_or(defaults.level),
            experience_points: draft.experience_points.unwrap_or(defaults.experience_points),
        }
    }

    fn to_patch(&self) -> CharacterDraft {
        CharacterDraft {
            background: Some(self.background.clone()),
            alignment: Some(self.alignment.clone()),
            level: Some(self.level),
            experience_points: Some(self.experience_points),
            ..CharacterDraft::default()
        }
    }
}
