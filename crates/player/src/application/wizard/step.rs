//! The fixed step sequence and the per-step validity record.

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    BasicInfo,
    Class,
    AbilityScores,
    Background,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::BasicInfo,
        WizardStep::Class,
        WizardStep::AbilityScores,
        WizardStep::Background,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            WizardStep::BasicInfo => 0,
            WizardStep::Class => 1,
            WizardStep::AbilityScores => 2,
            WizardStep::Background => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Information",
            WizardStep::Class => "Class Selection",
            WizardStep::AbilityScores => "Ability Scores",
            WizardStep::Background => "Background & Details",
        }
    }

    pub fn is_last(self) -> bool {
        self.index() + 1 == Self::COUNT
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Per-step validity. A step with no recorded outcome is unset, which is
/// not the same as invalid for display but blocks progression all the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepValidity {
    slots: [Option<bool>; WizardStep::COUNT],
}

impl StepValidity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, step: WizardStep, valid: bool) {
        self.slots[step.index()] = Some(valid);
    }

    pub fn get(&self, step: WizardStep) -> Option<bool> {
        self.slots[step.index()]
    }

    pub fn is_valid(&self, step: WizardStep) -> bool {
        self.get(step) == Some(true)
    }

    pub fn all_valid(&self) -> bool {
        self.slots.iter().all(|slot| *slot == Some(true))
    }
}

/// Snapshot for a progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub titles: Vec<&'static str>,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.current + 1) * 100 / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// "Step 2 of 4"
    pub fn label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sequence_is_fixed() {
        assert_eq!(WizardStep::COUNT, 4);
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::Class));
        assert_eq!(WizardStep::Background.next(), None);
        assert_eq!(WizardStep::BasicInfo.previous(), None);
        assert!(WizardStep::Background.is_last());
        assert_eq!(WizardStep::from_index(2), Some(WizardStep::AbilityScores));
        assert_eq!(WizardStep::from_index(4), None);
    }

    #[test]
    fn validity_starts_unset() {
        let mut validity = StepValidity::new();
        assert_eq!(validity.get(WizardStep::Class), None);
        assert!(!validity.is_valid(WizardStep::Class));

        validity.set(WizardStep::Class, false);
        assert_eq!(validity.get(WizardStep::Class), Some(false));
        validity.set(WizardStep::Class, true);
        assert!(validity.is_valid(WizardStep::Class));
        assert!(!validity.all_valid());
    }

    #[test]
    fn progress_label_and_percent() {
        let progress = Progress {
            current: 1,
            total: 4,
            titles: WizardStep::ALL.iter().map(|s| s.title()).collect(),
        };
        assert_eq!(progress.label(), "Step 2 of 4");
        assert_eq!(progress.percent(), 50);
    }
}
