//! Step forms: each owns one slice of the draft, re-validates on every edit
//! and reports the outcome upward as a [`StepReport`].

use pcm_domain::rules::{MAX_WIZARD_SCORE, MIN_WIZARD_SCORE};
use pcm_domain::{
    proficiency_bonus, racial_bonuses, remaining_points, total_multiclass_levels, total_point_cost,
    Ability, AbilityScores, BackgroundDetails, BasicInfo, CharacterClass, CharacterDraft, ClassSelection, FieldError,
    MulticlassEntry, Race, StepSlice, Validate,
};

use super::step::WizardStep;

/// Outcome of one validation pass over a step.
///
/// `patch` is present only when the step is valid; it carries every field
/// the step owns, ready to merge into the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: WizardStep,
    pub valid: bool,
    pub errors: Vec<FieldError>,
    pub patch: Option<CharacterDraft>,
}

/// A draft slice that belongs to exactly one wizard step.
pub trait StepFields: StepSlice + Validate {
    const STEP: WizardStep;
}

impl StepFields for BasicInfo {
    const STEP: WizardStep = WizardStep::BasicInfo;
}

impl StepFields for ClassSelection {
    const STEP: WizardStep = WizardStep::Class;
}

impl StepFields for AbilityScores<i32> {
    const STEP: WizardStep = WizardStep::AbilityScores;
}

impl StepFields for BackgroundDetails {
    const STEP: WizardStep = WizardStep::Background;
}

/// Local field state for one step plus its latest errors.
#[derive(Debug, Clone, PartialEq)]
pub struct StepForm<S> {
    values: S,
    errors: Vec<FieldError>,
}

pub type BasicInfoForm = StepForm<BasicInfo>;
pub type ClassForm = StepForm<ClassSelection>;
pub type AbilityScoresForm = StepForm<AbilityScores<i32>>;
pub type BackgroundForm = StepForm<BackgroundDetails>;

impl<S: StepFields> StepForm<S> {
    /// Seed from the draft, applying step defaults for absent fields.
    pub fn from_draft(draft: &CharacterDraft) -> Self {
        Self::with_values(S::from_draft(draft))
    }

    pub fn with_values(values: S) -> Self {
        let errors = values.validate();
        Self { values, errors }
    }

    pub fn step(&self) -> WizardStep {
        S::STEP
    }

    pub fn values(&self) -> &S {
        &self.values
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error message for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Apply an arbitrary edit, then re-run the full rule set.
    pub fn edit(&mut self, change: impl FnOnce(&mut S)) -> StepReport {
        change(&mut self.values);
        self.revalidate()
    }

    pub fn revalidate(&mut self) -> StepReport {
        self.errors = self.values.validate();
        self.report()
    }

    pub fn report(&self) -> StepReport {
        let valid = self.is_valid();
        StepReport {
            step: S::STEP,
            valid,
            errors: self.errors.clone(),
            patch: valid.then(|| self.values.to_patch()),
        }
    }
}

impl StepForm<BasicInfo> {
    pub fn set_name(&mut self, name: impl Into<String>) -> StepReport {
        let name = name.into();
        self.edit(|v| v.name = name)
    }

    pub fn set_player_name(&mut self, player_name: impl Into<String>) -> StepReport {
        let player_name = player_name.into();
        self.edit(|v| v.player_name = player_name)
    }

    /// Changing race clears a subrace the new race does not have.
    pub fn set_race(&mut self, race: impl Into<String>) -> StepReport {
        let race = race.into();
        self.edit(|v| {
            let keeps_subrace = race
                .parse::<Race>()
                .map(|r| r.has_subrace(&v.subrace))
                .unwrap_or(false);
            if !keeps_subrace {
                v.subrace.clear();
            }
            v.race = race;
        })
    }

    pub fn set_subrace(&mut self, subrace: impl Into<String>) -> StepReport {
        let subrace = subrace.into();
        self.edit(|v| v.subrace = subrace)
    }

    /// Subraces offered for the selected race; empty when it has none.
    pub fn subrace_options(&self) -> &'static [&'static str] {
        self.values
            .race
            .parse::<Race>()
            .map(|r| r.subraces())
            .unwrap_or(&[])
    }

    /// Racial ability bonuses for the current selection, for display.
    pub fn racial_bonuses(&self) -> Vec<(Ability, i32)> {
        let subrace = Some(self.values.subrace.as_str()).filter(|s| !s.is_empty());
        self.values
            .race
            .parse::<Race>()
            .map(|r| racial_bonuses(r, subrace).into_iter().collect())
            .unwrap_or_default()
    }
}

impl StepForm<ClassSelection> {
    pub fn set_class(&mut self, class: impl Into<String>) -> StepReport {
        let class = class.into();
        self.edit(|v| v.class = class)
    }

    /// Free-form; the options list is a suggestion only.
    pub fn set_subclass(&mut self, subclass: impl Into<String>) -> StepReport {
        let subclass = subclass.into();
        self.edit(|v| v.subclass = subclass)
    }

    pub fn subclass_options(&self) -> &'static [&'static str] {
        self.values
            .class
            .parse::<CharacterClass>()
            .map(|c| c.subclass_options())
            .unwrap_or(&[])
    }

    /// Append a blank entry at level 1.
    pub fn add_multiclass(&mut self) -> StepReport {
        self.edit(|v| v.multiclass.push(MulticlassEntry::new("", 1)))
    }

    /// Out-of-range indices leave the list untouched.
    pub fn remove_multiclass(&mut self, index: usize) -> StepReport {
        self.edit(|v| {
            if index < v.multiclass.len() {
                v.multiclass.remove(index);
            }
        })
    }

    pub fn set_multiclass_class(&mut self, index: usize, class: impl Into<String>) -> StepReport {
        let class = class.into();
        self.edit(|v| {
            if let Some(entry) = v.multiclass.get_mut(index) {
                entry.class = class;
            }
        })
    }

    pub fn set_multiclass_subclass(&mut self, index: usize, subclass: Option<String>) -> StepReport {
        self.edit(|v| {
            if let Some(entry) = v.multiclass.get_mut(index) {
                entry.subclass = subclass.filter(|s| !s.trim().is_empty());
            }
        })
    }

    pub fn set_multiclass_level(&mut self, index: usize, level: i32) -> StepReport {
        self.edit(|v| {
            if let Some(entry) = v.multiclass.get_mut(index) {
                entry.level = level;
            }
        })
    }

    /// Drop every multiclass entry.
    pub fn clear_multiclass(&mut self) -> StepReport {
        self.edit(|v| v.multiclass.clear())
    }

    pub fn multiclass_levels(&self) -> i32 {
        total_multiclass_levels(&self.values.multiclass)
    }
}

impl StepForm<AbilityScores<i32>> {
    pub fn set_score(&mut self, ability: Ability, score: i32) -> StepReport {
        self.edit(|v| *v.get_mut(ability) = score)
    }

    /// Raise by one, stopping at the wizard maximum.
    pub fn increment(&mut self, ability: Ability) -> StepReport {
        self.edit(|v| {
            let slot = v.get_mut(ability);
            if *slot < MAX_WIZARD_SCORE {
                *slot += 1;
            }
        })
    }

    /// Lower by one, stopping at the wizard minimum.
    pub fn decrement(&mut self, ability: Ability) -> StepReport {
        self.edit(|v| {
            let slot = v.get_mut(ability);
            if *slot > MIN_WIZARD_SCORE {
                *slot -= 1;
            }
        })
    }

    pub fn point_total(&self) -> i32 {
        total_point_cost(&self.values)
    }

    pub fn remaining_points(&self) -> i32 {
        remaining_points(&self.values)
    }
}

impl StepForm<BackgroundDetails> {
    pub fn set_background(&mut self, background: impl Into<String>) -> StepReport {
        let background = background.into();
        self.edit(|v| v.background = background)
    }

    pub fn set_alignment(&mut self, alignment: impl Into<String>) -> StepReport {
        let alignment = alignment.into();
        self.edit(|v| v.alignment = alignment)
    }

    pub fn set_level(&mut self, level: i32) -> StepReport {
        self.edit(|v| v.level = level)
    }

    pub fn set_experience_points(&mut self, experience_points: i64) -> StepReport {
        self.edit(|v| v.experience_points = experience_points)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.values.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_seeds_defaults() {
        let draft = CharacterDraft::new();
        let scores = AbilityScoresForm::from_draft(&draft);
        assert_eq!(*scores.values(), AbilityScores::uniform(8));
        assert!(scores.is_valid());

        let background = BackgroundForm::from_draft(&draft);
        assert_eq!(background.values().level, 1);
        assert_eq!(background.values().experience_points, 0);
        assert!(background.is_valid());

        let basic = BasicInfoForm::from_draft(&draft);
        assert!(!basic.is_valid());
        assert_eq!(
            basic.error_for("characterName"),
            Some("Character name is required")
        );
    }

    #[test]
    fn every_edit_reports_validity() {
        let mut form = BasicInfoForm::from_draft(&CharacterDraft::new());

        let report = form.set_name("Aria");
        assert_eq!(report.step, WizardStep::BasicInfo);
        assert!(!report.valid);
        assert!(report.patch.is_none());

        let report = form.set_race("Elf");
        assert!(report.valid);
        let patch = report.patch.expect("valid step carries a patch");
        assert_eq!(patch.name.as_deref(), Some("Aria"));
        assert_eq!(patch.subrace.as_deref(), Some(""));
    }

    #[test]
    fn race_change_clears_incompatible_subrace() {
        let mut form = BasicInfoForm::from_draft(&CharacterDraft::new());
        form.set_name("Aria");
        form.set_race("Elf");
        form.set_subrace("High Elf");
        assert_eq!(form.subrace_options(), Race::Elf.subraces());

        let report = form.set_race("Halfling");
        assert!(report.valid);
        assert_eq!(form.values().subrace, "");

        form.set_subrace("Lightfoot");
        form.set_race("Halfling");
        assert_eq!(form.values().subrace, "Lightfoot");

        form.set_race("Human");
        assert!(form.subrace_options().is_empty());
        assert_eq!(form.values().subrace, "");
    }

    #[test]
    fn lightfoot_elf_is_rejected() {
        let draft = CharacterDraft {
            name: Some("Aria".into()),
            race: Some("Elf".into()),
            subrace: Some("Lightfoot".into()),
            ..CharacterDraft::default()
        };
        let form = BasicInfoForm::from_draft(&draft);
        assert!(!form.is_valid());
        assert!(form.error_for("subrace").is_some());
    }

    #[test]
    fn racial_bonuses_follow_selection() {
        let mut form = BasicInfoForm::from_draft(&CharacterDraft::new());
        form.set_race("Elf");
        form.set_subrace("High Elf");
        let bonuses = form.racial_bonuses();
        assert!(bonuses.contains(&(Ability::Dexterity, 2)));
        assert!(bonuses.contains(&(Ability::Intelligence, 1)));
    }

    #[test]
    fn class_form_filters_subclasses_and_manages_multiclass() {
        let mut form = ClassForm::from_draft(&CharacterDraft::new());
        assert!(form.subclass_options().is_empty());

        form.set_class("Wizard");
        assert!(form.subclass_options().contains(&"School of Divination"));
        assert!(form.set_subclass("Homebrew School").valid);

        let report = form.add_multiclass();
        assert!(!report.valid, "blank multiclass entry needs a class");
        form.set_multiclass_class(0, "Fighter");
        let report = form.set_multiclass_level(0, 5);
        assert!(report.valid);
        let patch = report.patch.expect("patch");
        assert_eq!(patch.multiclass.map(|m| m.len()), Some(1));

        form.remove_multiclass(7);
        assert_eq!(form.values().multiclass.len(), 1);
        let report = form.remove_multiclass(0);
        assert!(report.valid);
        assert_eq!(report.patch.and_then(|p| p.multiclass), Some(vec![]));
    }

    #[test]
    fn multiclass_sum_over_nineteen_invalidates() {
        let mut form = ClassForm::from_draft(&CharacterDraft::new());
        form.set_class("Fighter");
        form.add_multiclass();
        form.set_multiclass_class(0, "Rogue");
        form.set_multiclass_level(0, 10);
        form.add_multiclass();
        form.set_multiclass_class(1, "Cleric");
        let report = form.set_multiclass_level(1, 10);
        assert_eq!(form.multiclass_levels(), 20);
        assert!(!report.valid);
        assert!(form.error_for("multiclass").is_some());

        assert!(form.set_multiclass_level(1, 9).valid);
    }

    #[test]
    fn huge_multiclass_levels_do_not_overflow() {
        let mut form = ClassForm::from_draft(&CharacterDraft::new());
        form.set_class("Fighter");
        for (index, class) in ["Rogue", "Cleric"].into_iter().enumerate() {
            form.add_multiclass();
            form.set_multiclass_class(index, class);
            form.set_multiclass_level(index, 2_000_000_000);
        }
        assert_eq!(form.multiclass_levels(), i32::MAX);
        assert!(!form.is_valid());
        assert!(form.error_for("multiclass").is_some());
    }

    #[test]
    fn ability_form_tracks_budget() {
        let mut form = AbilityScoresForm::from_draft(&CharacterDraft::new());
        assert_eq!(form.point_total(), 6);
        assert_eq!(form.remaining_points(), 21);

        let report = form.set_score(Ability::Intelligence, 15);
        assert!(report.valid);

        for ability in Ability::ALL {
            form.set_score(*ability, 20);
        }
        assert_eq!(form.point_total(), 54);
        assert!(form.remaining_points() < 0);
        assert!(!form.is_valid());
    }

    #[test]
    fn increment_and_decrement_respect_bounds() {
        let mut form = AbilityScoresForm::from_draft(&CharacterDraft::new());
        form.decrement(Ability::Strength);
        assert_eq!(*form.values().get(Ability::Strength), 8);

        form.set_score(Ability::Strength, 20);
        form.increment(Ability::Strength);
        assert_eq!(*form.values().get(Ability::Strength), 20);
    }

    #[test]
    fn background_form_reports_proficiency() {
        let mut form = BackgroundForm::from_draft(&CharacterDraft::new());
        form.set_level(9);
        assert_eq!(form.proficiency_bonus(), 4);

        assert!(!form.set_level(21).valid);
        assert!(form.set_level(5).patch.is_some());
        assert!(!form.set_experience_points(-1).valid);
        assert!(form.set_experience_points(0).valid);
        assert!(!form.set_alignment("Chaotic Confused").valid);
    }
}
