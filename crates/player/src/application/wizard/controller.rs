//! Wizard controller: step sequencing, draft accumulation, per-step validity
//! and submission.

use serde_json::Value;

use pcm_domain::{
    validate_character, AbilityScores, BackgroundDetails, BasicInfo, Character, CharacterDraft,
    CharacterId, ClassSelection, DomainError, FieldError, StepSlice, Validate,
};
use pcm_shared::{CreateCharacterPayload, ServerFieldError, UpdateCharacterPayload};

use super::forms::StepReport;
use super::step::{Progress, StepValidity, WizardStep};
use crate::application::services::CharacterService;
use crate::application::ServiceError;

pub const CONFLICT_MESSAGE: &str =
    "Character was modified by another user. Please refresh and try again.";
pub const UNSAVED_CHANGES_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to cancel?";

/// Whether the session creates a new character or edits a loaded one.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardMode {
    Create,
    Edit {
        id: CharacterId,
        original: Box<Character>,
    },
}

/// Where the front-end should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    CharacterDetail(CharacterId),
    CharacterList { success_message: Option<String> },
}

impl Navigation {
    pub fn route(&self) -> String {
        match self {
            Navigation::CharacterDetail(id) => format!("/characters/{}", id),
            Navigation::CharacterList { .. } => "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    /// Leave now; the draft has been (or may be) thrown away.
    Discarded(Navigation),
    /// Edit mode with changes: ask before discarding.
    NeedsConfirmation { prompt: &'static str },
}

/// Step navigation refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Complete {0} before continuing")]
    StepIncomplete(WizardStep),
    #[error("Already at the last step")]
    AtLastStep,
    #[error("Already at the first step")]
    AtFirstStep,
    #[error("Characters can only be submitted from the last step")]
    NotOnLastStep,
    #[error("A submission is already in progress")]
    SubmitInProgress,
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a submission did not go through. Wizard state is left intact for
/// every variant so the user can fix the problem and retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    /// Caught locally; nothing was sent.
    #[error("Please fix the following fields: {}", field_list(.0))]
    Validation(Vec<FieldError>),
    /// 409 on update.
    #[error("{}", CONFLICT_MESSAGE)]
    Conflict,
    #[error("{0}")]
    NotFound(String),
    /// The server refused the payload (4xx).
    #[error("{message}")]
    Rejected {
        message: String,
        field_errors: Vec<ServerFieldError>,
    },
    /// No response; retryable.
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Server(String),
}

impl From<ServiceError> for SubmitError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(e) => {
                SubmitError::Validation(vec![FieldError::new("character", e.to_string())])
            }
            ServiceError::ParseError(message) => SubmitError::Server(message),
            ServiceError::Api(api) if api.is_conflict() => SubmitError::Conflict,
            ServiceError::Api(api) if api.is_not_found() => SubmitError::NotFound(api.message),
            ServiceError::Api(api) if api.is_transport() => SubmitError::Network(api.message),
            ServiceError::Api(api) if api.is_client_error() => SubmitError::Rejected {
                field_errors: api.field_errors(),
                message: api.message,
            },
            ServiceError::Api(api) => SubmitError::Server(api.message),
        }
    }
}

/// One create or edit session.
#[derive(Debug, Clone)]
pub struct WizardController {
    mode: WizardMode,
    step: WizardStep,
    draft: CharacterDraft,
    validity: StepValidity,
    last_error: Option<SubmitError>,
    submitting: bool,
}

impl WizardController {
    /// Empty draft, first step, nothing validated yet.
    pub fn create() -> Self {
        Self {
            mode: WizardMode::Create,
            step: WizardStep::BasicInfo,
            draft: CharacterDraft::new(),
            validity: StepValidity::new(),
            last_error: None,
            submitting: false,
        }
    }

    /// Start editing a loaded character.
    ///
    /// Every step is validated against the loaded data up front, so a step
    /// the user never touches still has a recorded outcome and invalid
    /// server data blocks submission until fixed.
    pub fn edit(character: Character) -> Self {
        let draft = character.to_draft();
        let mut validity = StepValidity::new();
        validity.set(WizardStep::BasicInfo, BasicInfo::from_draft(&draft).is_valid());
        validity.set(WizardStep::Class, ClassSelection::from_draft(&draft).is_valid());
        validity.set(
            WizardStep::AbilityScores,
            <AbilityScores<i32> as StepSlice>::from_draft(&draft).is_valid(),
        );
        validity.set(
            WizardStep::Background,
            BackgroundDetails::from_draft(&draft).is_valid(),
        );

        if !validity.all_valid() {
            tracing::warn!(
                character_id = %character.id,
                validity = ?validity,
                "Loaded character fails client-side validation"
            );
        }

        Self {
            mode: WizardMode::Edit {
                id: character.id,
                original: Box::new(character),
            },
            step: WizardStep::BasicInfo,
            draft,
            validity,
            last_error: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, WizardMode::Edit { .. })
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &CharacterDraft {
        &self.draft
    }

    pub fn validity(&self) -> &StepValidity {
        &self.validity
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_last_step(&self) -> bool {
        self.step.is_last()
    }

    /// The current step has recorded a valid outcome.
    pub fn can_proceed(&self) -> bool {
        self.validity.is_valid(self.step)
    }

    pub fn can_submit(&self) -> bool {
        self.is_last_step() && self.can_proceed() && !self.submitting
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if !self.can_proceed() {
            return Err(WizardError::StepIncomplete(self.step));
        }
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.step = next;
        Ok(next)
    }

    /// Go back one step. Validity is not consulted.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.step = previous;
        Ok(previous)
    }

    /// Merge a step's output into the draft and mark the step valid.
    pub fn complete_step(&mut self, step: WizardStep, patch: CharacterDraft) {
        self.draft.merge(patch);
        self.validity.set(step, true);
        self.last_error = None;
    }

    pub fn report_validity(&mut self, step: WizardStep, valid: bool) {
        self.validity.set(step, valid);
    }

    /// Feed a form's validation outcome in: record validity, and merge the
    /// patch when the step is valid.
    pub fn handle_report(&mut self, report: StepReport) {
        self.report_validity(report.step, report.valid);
        if let Some(patch) = report.patch {
            self.complete_step(report.step, patch);
        }
    }

    /// Wire names of fields that differ from the loaded character. Always
    /// empty when creating.
    pub fn modified_fields(&self) -> Vec<&'static str> {
        match &self.mode {
            WizardMode::Create => Vec::new(),
            WizardMode::Edit { original, .. } => self.draft.changed_fields(&original.to_draft()),
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.modified_fields().is_empty()
    }

    /// The JSON body submit would send right now.
    pub fn preview_payload(&self) -> Result<Value, DomainError> {
        let value = match &self.mode {
            WizardMode::Create => serde_json::to_value(CreateCharacterPayload::try_from(&self.draft)?),
            WizardMode::Edit { .. } => {
                serde_json::to_value(UpdateCharacterPayload::from(&self.draft))
            }
        };
        value.map_err(|e| DomainError::parse(e.to_string()))
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.step.index(),
            total: WizardStep::COUNT,
            titles: WizardStep::ALL.iter().map(|s| s.title()).collect(),
        }
    }

    fn check_submittable(&self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmitInProgress);
        }
        if !self.is_last_step() {
            return Err(WizardError::NotOnLastStep);
        }
        if !self.can_proceed() {
            return Err(WizardError::StepIncomplete(self.step));
        }
        Ok(())
    }

    /// Create or update through `service`.
    ///
    /// The whole draft is re-validated first; a failure there never reaches
    /// the network. On any error the draft, step and validity are kept and
    /// the error is also retained as [`last_error`](Self::last_error).
    pub async fn submit(&mut self, service: &CharacterService) -> Result<Navigation, SubmitError> {
        self.check_submittable()?;

        let errors = validate_character(&self.draft);
        if !errors.is_empty() {
            tracing::warn!(
                operation = "submit",
                fields = %field_list(&errors),
                "Draft failed validation before submission"
            );
            let err = SubmitError::Validation(errors);
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.submitting = true;
        self.last_error = None;

        let result = match &self.mode {
            WizardMode::Create => service
                .create(&self.draft)
                .await
                .map(|created| Navigation::CharacterDetail(created.id)),
            WizardMode::Edit { id, .. } => {
                tracing::info!(
                    character_id = %id,
                    modified_fields = ?self.modified_fields(),
                    "Submitting character update"
                );
                service
                    .update(*id, &self.draft)
                    .await
                    .map(|updated| Navigation::CharacterList {
                        success_message: Some(format!(
                            "Character \"{}\" updated successfully!",
                            updated.character_name
                        )),
                    })
            }
        };

        self.submitting = false;
        result.map_err(|e| {
            let err = SubmitError::from(e);
            self.last_error = Some(err.clone());
            err
        })
    }

    /// Create mode leaves at once; edit mode asks first when anything changed.
    pub fn cancel(&self) -> CancelOutcome {
        if self.has_changes() {
            CancelOutcome::NeedsConfirmation {
                prompt: UNSAVED_CHANGES_PROMPT,
            }
        } else {
            CancelOutcome::Discarded(Navigation::CharacterList {
                success_message: None,
            })
        }
    }

    /// Discard the draft after the user confirmed.
    pub fn confirm_cancel(&mut self) -> Navigation {
        self.draft = CharacterDraft::new();
        self.validity = StepValidity::new();
        self.last_error = None;
        Navigation::CharacterList {
            success_message: None,
        }
    }
}
