//! Single character screen and the delete action.

use colored::Colorize;
use dialoguer::Select;

use pcm_domain::CharacterId;

use super::Route;
use crate::application::services::CharacterService;
use crate::ui::presentation::{prompts, views};
use crate::ui::UiError;

pub async fn show(service: &CharacterService, id: CharacterId) -> Result<Option<Route>, UiError> {
    let character = match service.get(id).await {
        Ok(character) => character,
        Err(e) if e.is_not_found() => {
            println!("{}", views::not_found_screen());
            return Ok(Some(Route::home()));
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", views::character_detail(&character));

    let items = ["Edit", "Delete", "Back to Characters"];
    let choice = Select::new()
        .with_prompt(character.character_name.as_str())
        .items(&items)
        .default(0)
        .interact()?;

    match choice {
        0 => Ok(Some(Route::EditCharacter { id })),
        1 => {
            let prompt = format!("Delete \"{}\"? This cannot be undone.", character.character_name);
            if !prompts::confirm(&prompt, false)? {
                return Ok(Some(Route::CharacterDetail { id }));
            }
            service.delete(id).await?;
            Ok(Some(Route::list_with_banner(Some(format!(
                "Character \"{}\" deleted.",
                character.character_name
            )))))
        }
        _ => Ok(Some(Route::home())),
    }
}

/// `delete` command.
pub async fn delete(service: &CharacterService, id: CharacterId, yes: bool) -> Result<(), UiError> {
    if !yes && !prompts::confirm(&format!("Delete character {}?", id), false)? {
        println!("Nothing deleted.");
        return Ok(());
    }
    service.delete(id).await?;
    println!("{} Character {} deleted", "✓".green().bold(), id);
    Ok(())
}
