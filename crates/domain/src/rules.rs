//! Fixed rule tables for character creation.
//!
//! Point-buy costs, proficiency brackets, ability modifiers and racial
//! bonuses. Everything here is a pure lookup.

use std::collections::BTreeMap;

use crate::character::{AbilityScores, MulticlassEntry};
use crate::types::{Ability, Race};

/// Budget available for point-buy allocation.
pub const POINT_BUY_BUDGET: i32 = 27;

/// Lowest score the creation wizard accepts.
pub const MIN_WIZARD_SCORE: i32 = 8;
/// Highest score the creation wizard accepts.
pub const MAX_WIZARD_SCORE: i32 = 20;

/// Level cap, shared by the primary level and each multiclass entry.
pub const MAX_LEVEL: i32 = 20;
/// Multiclass levels may not exceed this sum; one level stays with the
/// primary class.
pub const MAX_MULTICLASS_LEVELS: i32 = MAX_LEVEL - 1;

/// Cost table indexed by the raw score (0..=20).
const POINT_COSTS: [i32; 21] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 3, 4, 5, 7, 9];

/// Point-buy cost of a single score. Scores outside the table cost nothing.
pub fn point_buy_cost(score: i32) -> i32 {
    usize::try_from(score)
        .ok()
        .and_then(|idx| POINT_COSTS.get(idx))
        .copied()
        .unwrap_or(0)
}

/// Summed point-buy cost of all six scores.
pub fn total_point_cost(scores: &AbilityScores<i32>) -> i32 {
    scores.iter().map(|(_, s)| point_buy_cost(*s)).sum()
}

/// Points left in the budget. Negative when overspent.
pub fn remaining_points(scores: &AbilityScores<i32>) -> i32 {
    POINT_BUY_BUDGET - total_point_cost(scores)
}

/// Sum of multiclass levels. Saturates instead of overflowing on absurd
/// input, so the sum still reads as over the cap.
pub fn total_multiclass_levels(entries: &[MulticlassEntry]) -> i32 {
    entries
        .iter()
        .fold(0i32, |total, entry| total.saturating_add(entry.level))
}

/// Proficiency bonus by level bracket.
pub fn proficiency_bonus(level: i32) -> i32 {
    if level >= 17 {
        6
    } else if level >= 13 {
        5
    } else if level >= 9 {
        4
    } else if level >= 5 {
        3
    } else {
        2
    }
}

/// Ability modifier: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Racial ability bonuses, including the subrace's contribution.
///
/// Display-only: stored scores never include these.
pub fn racial_bonuses(race: Race, subrace: Option<&str>) -> BTreeMap<Ability, i32> {
    let mut bonuses = BTreeMap::new();
    let base: &[(Ability, i32)] = match race {
        Race::Human => &[
            (Ability::Strength, 1),
            (Ability::Dexterity, 1),
            (Ability::Constitution, 1),
            (Ability::Intelligence, 1),
            (Ability::Wisdom, 1),
            (Ability::Charisma, 1),
        ],
        Race::Elf => &[(Ability::Dexterity, 2)],
        Race::Dwarf => &[(Ability::Constitution, 2)],
        Race::Halfling => &[(Ability::Dexterity, 2)],
        Race::Dragonborn => &[(Ability::Strength, 2), (Ability::Charisma, 1)],
        Race::Gnome => &[(Ability::Intelligence, 2)],
        // Half-Elves also pick two further +1s; that choice is not modelled.
        Race::HalfElf => &[(Ability::Charisma, 2)],
        Race::HalfOrc => &[(Ability::Strength, 2), (Ability::Constitution, 1)],
        Race::Tiefling => &[(Ability::Intelligence, 1), (Ability::Charisma, 2)],
    };
    for (ability, bonus) in base {
        *bonuses.entry(*ability).or_insert(0) += bonus;
    }

    let extra: &[(Ability, i32)] = match subrace.unwrap_or_default() {
        "High Elf" => &[(Ability::Intelligence, 1)],
        "Wood Elf" => &[(Ability::Wisdom, 1)],
        "Dark Elf" => &[(Ability::Charisma, 1)],
        "Hill Dwarf" => &[(Ability::Wisdom, 1)],
        "Mountain Dwarf" => &[(Ability::Strength, 2)],
        "Lightfoot" => &[(Ability::Charisma, 1)],
        "Stout" => &[(Ability::Constitution, 1)],
        "Forest Gnome" => &[(Ability::Dexterity, 1)],
        "Rock Gnome" => &[(Ability::Constitution, 1)],
        _ => &[],
    };
    for (ability, bonus) in extra {
        *bonuses.entry(*ability).or_insert(0) += bonus;
    }

    bonuses
}
