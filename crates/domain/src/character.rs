//! Character entities: the persisted character and its ability score block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::rules::{ability_modifier, proficiency_bonus};
use crate::types::Ability;
use crate::CharacterDraft;

/// The six ability scores.
///
/// Generic over the per-ability value so the same shape carries raw integers
/// in a draft (`AbilityScores<i32>`) and the server's derived block in a
/// persisted character (`AbilityScores<AbilityScore>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores<T = i32> {
    pub strength: T,
    pub dexterity: T,
    pub constitution: T,
    pub intelligence: T,
    pub wisdom: T,
    pub charisma: T,
}

impl<T> AbilityScores<T> {
    pub fn get(&self, ability: Ability) -> &T {
        match ability {
            Ability::Strength => &self.strength,
            Ability::Dexterity => &self.dexterity,
            Ability::Constitution => &self.constitution,
            Ability::Intelligence => &self.intelligence,
            Ability::Wisdom => &self.wisdom,
            Ability::Charisma => &self.charisma,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut T {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    /// Iterate in canonical ability order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &T)> + '_ {
        Ability::ALL.iter().map(move |a| (*a, self.get(*a)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Ability, &T) -> U) -> AbilityScores<U> {
        AbilityScores {
            strength: f(Ability::Strength, &self.strength),
            dexterity: f(Ability::Dexterity, &self.dexterity),
            constitution: f(Ability::Constitution, &self.constitution),
            intelligence: f(Ability::Intelligence, &self.intelligence),
            wisdom: f(Ability::Wisdom, &self.wisdom),
            charisma: f(Ability::Charisma, &self.charisma),
        }
    }
}

impl AbilityScores<i32> {
    /// Every ability at the same value.
    pub fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    /// Builder-style override of a single ability.
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        *self.get_mut(ability) = score;
        self
    }
}

/// Point-buy baseline: every ability at 8.
impl Default for AbilityScores<i32> {
    fn default() -> Self {
        Self::uniform(8)
    }
}

/// A single ability as stored by the server.
///
/// `modifier` and `saving_throw_proficiency` are server-derived; the client
/// never sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScore {
    #[serde(alias = "base")]
    pub score: i32,
    #[serde(default)]
    pub modifier: i32,
    #[serde(default)]
    pub saving_throw_proficiency: bool,
}

impl AbilityScore {
    /// Build a score block with the modifier derived locally.
    pub fn from_score(score: i32) -> Self {
        Self {
            score,
            modifier: ability_modifier(score),
            saving_throw_proficiency: false,
        }
    }
}

/// An additional class taken on top of the primary class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MulticlassEntry {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
    pub level: i32,
}

impl MulticlassEntry {
    pub fn new(class: impl Into<String>, level: i32) -> Self {
        Self {
            class: class.into(),
            subclass: None,
            level,
        }
    }
}

/// A character as persisted by the character API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    pub ability_scores: AbilityScores<AbilityScore>,
    #[serde(default)]
    pub proficiency_bonus: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Character {
    /// Raw score integers, stripped of the server-derived fields.
    pub fn raw_scores(&self) -> AbilityScores<i32> {
        self.ability_scores.map(|_, s| s.score)
    }

    /// Convert into a fully populated draft for an edit session.
    pub fn to_draft(&self) -> CharacterDraft {
        CharacterDraft {
            name: Some(self.character_name.clone()),
            player_name: self.player_name.clone(),
            race: Some(self.race.clone()),
            subrace: self.subrace.clone(),
            class: Some(self.class.clone()),
            subclass: self.subclass.clone(),
            multiclass: self.multiclass.clone(),
            level: Some(self.level),
            experience_points: self.experience_points,
            background: self.background.clone(),
            alignment: self.alignment.clone(),
            ability_scores: Some(self.raw_scores()),
        }
    }

    /// Proficiency bonus for the stored level, computed locally.
    pub fn expected_proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.level)
    }

    /// One-line summary, e.g. "Aria - Level 3 Elf Wizard".
    pub fn summary(&self) -> String {
        format!(
            "{} - Level {} {} {}",
            self.character_name, self.level, self.race, self.class
        )
    }
}
