//! Character creation/edit wizard.

pub mod controller;
pub mod forms;
pub mod step;

pub use controller::{
    CancelOutcome, Navigation, SubmitError, WizardController, WizardError, WizardMode,
    CONFLICT_MESSAGE, UNSAVED_CHANGES_PROMPT,
};
pub use forms::{
    AbilityScoresForm, BackgroundForm, BasicInfoForm, ClassForm, StepFields, StepForm, StepReport,
};
pub use step::{Progress, StepValidity, WizardStep};
