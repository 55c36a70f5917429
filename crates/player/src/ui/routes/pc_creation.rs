//! Create and edit flows: drives the wizard controller through the step
//! prompts until the user submits or cancels.

use colored::Colorize;

use pcm_domain::CharacterId;

use super::Route;
use crate::application::services::CharacterService;
use crate::application::wizard::{CancelOutcome, WizardController};
use crate::ui::presentation::prompts::{self, StepAction};
use crate::ui::presentation::views;
use crate::ui::UiError;

pub async fn create(service: &CharacterService) -> Result<Option<Route>, UiError> {
    drive(WizardController::create(), service).await
}

pub async fn edit(service: &CharacterService, id: CharacterId) -> Result<Option<Route>, UiError> {
    match service.get(id).await {
        Ok(character) => drive(WizardController::edit(character), service).await,
        Err(e) if e.is_not_found() => {
            println!("{}", views::not_found_screen());
            Ok(Some(Route::home()))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_preview(wizard: &WizardController) {
    match wizard.preview_payload() {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!(error = %e, "Could not format payload preview"),
        },
        Err(e) => println!("{}", format!("Not ready to submit: {}", e).yellow()),
    }
    if wizard.is_edit() {
        let modified = wizard.modified_fields();
        if modified.is_empty() {
            println!("{}", "No changes".dimmed());
        } else {
            println!("Modified: {}", modified.join(", ").yellow());
        }
    }
}

async fn drive(
    mut wizard: WizardController,
    service: &CharacterService,
) -> Result<Option<Route>, UiError> {
    let mut prompt_step = true;
    loop {
        if prompt_step {
            println!("{}", views::step_header(&wizard.progress()));
            let report = prompts::step(wizard.current_step(), wizard.draft())?;
            wizard.handle_report(report);
        }
        prompt_step = true;

        match prompts::choose_action(&wizard)? {
            StepAction::EditStep => {}
            StepAction::Next => {
                if let Err(e) = wizard.advance() {
                    println!("{}", e.to_string().yellow());
                    prompt_step = false;
                }
            }
            StepAction::Back => {
                if let Err(e) = wizard.retreat() {
                    println!("{}", e.to_string().yellow());
                    prompt_step = false;
                }
            }
            StepAction::Preview => {
                print_preview(&wizard);
                prompt_step = false;
            }
            StepAction::Submit => match wizard.submit(service).await {
                Ok(navigation) => {
                    println!("{} Saved", "✓".green().bold());
                    return Ok(Some(navigation.into()));
                }
                Err(e) => {
                    print!("{}", views::submit_error(&e));
                    prompt_step = false;
                }
            },
            StepAction::Cancel => match wizard.cancel() {
                CancelOutcome::Discarded(navigation) => return Ok(Some(navigation.into())),
                CancelOutcome::NeedsConfirmation { prompt } => {
                    if prompts::confirm(prompt, false)? {
                        return Ok(Some(wizard.confirm_cancel().into()));
                    }
                    prompt_step = false;
                }
            },
        }
    }
}
