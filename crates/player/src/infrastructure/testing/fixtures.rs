//! Simple test fixtures used across unit tests.

use serde_json::{json, Value};

use pcm_domain::{
    Ability, AbilityScores, BackgroundDetails, BasicInfo, Character, CharacterDraft, CharacterId,
    ClassSelection, StepSlice,
};

use crate::ports::outbound::ApiError;

pub const CHARACTER_ID: &str = "3f2b8c1e-9d4a-4e6b-8f3a-1c2d3e4f5a6b";

pub fn character_id() -> CharacterId {
    CHARACTER_ID.parse().expect("fixture id is a valid uuid")
}

pub fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::from_response(status, Some(json!({ "error": message })), "")
}

fn score(value: i32) -> Value {
    json!({
        "score": value,
        "modifier": pcm_domain::ability_modifier(value),
        "savingThrowProficiency": false
    })
}

/// Server representation of "Aria": Elf Wizard, level 3, INT 15.
pub fn character_json() -> Value {
    json!({
        "id": CHARACTER_ID,
        "characterName": "Aria",
        "playerName": "Sam",
        "race": "Elf",
        "subrace": "High Elf",
        "class": "Wizard",
        "subclass": "School of Evocation",
        "level": 3,
        "experiencePoints": 900,
        "background": "Sage",
        "alignment": "Neutral Good",
        "abilityScores": {
            "strength": score(8),
            "dexterity": score(8),
            "constitution": score(8),
            "intelligence": score(15),
            "wisdom": score(8),
            "charisma": score(8)
        },
        "proficiencyBonus": 2,
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-15T10:00:00Z"
    })
}

pub fn character() -> Character {
    serde_json::from_value(character_json()).expect("fixture deserializes")
}

pub fn data_envelope(data: Value) -> Value {
    json!({ "data": data })
}

pub fn aria_scores() -> AbilityScores {
    AbilityScores::uniform(8).with(Ability::Intelligence, 15)
}

pub fn aria_basic_info() -> BasicInfo {
    BasicInfo {
        name: "Aria".into(),
        player_name: String::new(),
        race: "Elf".into(),
        subrace: "High Elf".into(),
    }
}

pub fn wizard_class() -> ClassSelection {
    ClassSelection {
        class: "Wizard".into(),
        subclass: String::new(),
        multiclass: Vec::new(),
    }
}

pub fn sage_background() -> BackgroundDetails {
    BackgroundDetails {
        background: "Sage".into(),
        alignment: String::new(),
        level: 1,
        experience_points: 0,
    }
}

/// A draft as a completed create wizard leaves it.
pub fn complete_draft() -> CharacterDraft {
    let mut draft = CharacterDraft::new();
    draft.merge(aria_basic_info().to_patch());
    draft.merge(wizard_class().to_patch());
    draft.merge(aria_scores().to_patch());
    draft.merge(sage_background().to_patch());
    draft
}
