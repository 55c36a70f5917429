//! Screens rendered as terminal text.

use colored::Colorize;

use pcm_domain::{Ability, Character, FieldError};

use crate::application::list::{CharacterListView, DisplayState};
use crate::application::wizard::{Progress, SubmitError, WizardStep};
use crate::infrastructure::RecoveryScreen;

pub const NOT_FOUND_TITLE: &str = "Character Not Found";
pub const NOT_FOUND_MESSAGE: &str = "The character you're trying to edit could not be found.";
pub const NOT_FOUND_ACTION: &str = "Back to Characters";

/// "+2", "0", "-1"
pub fn format_modifier(modifier: i32) -> String {
    if modifier > 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

fn optional_line(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        out.push_str(&format!("{}: {}\n", label.bold(), value));
    }
}

pub fn character_detail(character: &Character) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        character.character_name.cyan().bold(),
        format!("({})", character.id).dimmed()
    ));
    out.push_str(&format!(
        "Level {} {} {}\n\n",
        character.level, character.race, character.class
    ));

    optional_line(&mut out, "Player", character.player_name.as_deref());
    optional_line(&mut out, "Subrace", character.subrace.as_deref());
    optional_line(&mut out, "Subclass", character.subclass.as_deref());
    if let Some(multiclass) = character.multiclass.as_ref().filter(|m| !m.is_empty()) {
        let entries: Vec<String> = multiclass
            .iter()
            .map(|m| match m.subclass.as_deref() {
                Some(sub) => format!("{} {} ({})", m.class, m.level, sub),
                None => format!("{} {}", m.class, m.level),
            })
            .collect();
        out.push_str(&format!("{}: {}\n", "Multiclass".bold(), entries.join(", ")));
    }
    optional_line(&mut out, "Background", character.background.as_deref());
    optional_line(&mut out, "Alignment", character.alignment.as_deref());
    out.push_str(&format!(
        "{}: {}\n",
        "Experience".bold(),
        character.experience_points.unwrap_or(0)
    ));
    out.push_str(&format!(
        "{}: {}\n\n",
        "Proficiency Bonus".bold(),
        format_modifier(character.proficiency_bonus)
    ));

    for (ability, score) in character.ability_scores.iter() {
        let save = if score.saving_throw_proficiency { " *" } else { "" };
        out.push_str(&format!(
            "  {:<4}{:>3}  ({}){}\n",
            ability.abbreviation(),
            score.score,
            format_modifier(score.modifier),
            save
        ));
    }

    if let Some(created) = character.created_at {
        out.push_str(&format!(
            "\n{}\n",
            format!("Created {}", created.format("%Y-%m-%d %H:%M")).dimmed()
        ));
    }
    out
}

pub fn character_row(index: usize, character: &Character) -> String {
    let created = character
        .created_at
        .map(|c| c.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        "{:>3}. {:<30} Lvl {:<3} {:<10} {:<10} {}",
        index,
        character.character_name.bold(),
        character.level,
        character.race,
        character.class,
        created.dimmed()
    )
}

fn pagination_line(view: &CharacterListView) -> Option<String> {
    let info = view.page_info().filter(|i| i.show_pagination())?;
    let pages: Vec<String> = view
        .visible_pages()
        .into_iter()
        .map(|p| {
            if p == info.page {
                format!("[{}]", p).yellow().bold().to_string()
            } else {
                p.to_string()
            }
        })
        .collect();
    Some(format!(
        "Page {} of {}  {}  ({} characters)",
        info.page,
        info.total_pages,
        pages.join(" "),
        info.total
    ))
}

pub fn list_screen(view: &CharacterListView) -> String {
    let mut out = String::new();
    if let Some(message) = view.banner().message() {
        out.push_str(&format!("{} {}\n\n", "✓".green().bold(), message.green()));
    }

    let query = view.query();
    let sort = format!(
        "Sorted by {} ({})",
        query.sort_by.label(),
        match query.sort_order {
            pcm_shared::SortOrder::Asc => "ascending",
            pcm_shared::SortOrder::Desc => "descending",
        }
    );
    out.push_str(&format!("{}\n", sort.dimmed()));
    if !query.search.trim().is_empty() {
        out.push_str(&format!("Search: \"{}\"\n", query.search.trim()));
    }
    out.push('\n');

    match view.display_state() {
        DisplayState::Loading => out.push_str("Loading characters...\n"),
        DisplayState::Error(message) => {
            out.push_str(&format!("{}\n", "Oops! Something went wrong".red().bold()));
            out.push_str(&format!("{}\n", message));
        }
        DisplayState::Empty => {
            out.push_str(&format!("{}\n", "No characters yet".bold()));
            out.push_str("Get started by creating your first D&D character!\n");
        }
        DisplayState::EmptySearch(search) => {
            out.push_str(&format!("{}\n", "No characters found".bold()));
            out.push_str(&format!(
                "No characters match \"{}\". Try adjusting your search terms.\n",
                search
            ));
        }
        DisplayState::Loaded => {
            let offset = view
                .page_info()
                .map(|i| (i.page.saturating_sub(1) * i.limit) as usize)
                .unwrap_or(0);
            for (i, character) in view.characters().iter().enumerate() {
                out.push_str(&character_row(offset + i + 1, character));
                out.push('\n');
            }
            if let Some(line) = pagination_line(view) {
                out.push('\n');
                out.push_str(&line);
                out.push('\n');
            }
        }
    }
    out
}

pub fn step_header(progress: &Progress) -> String {
    let trail: Vec<String> = progress
        .titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            if i == progress.current {
                title.cyan().bold().to_string()
            } else if i < progress.current {
                title.green().to_string()
            } else {
                title.dimmed().to_string()
            }
        })
        .collect();
    let current = WizardStep::from_index(progress.current)
        .map(|s| s.title())
        .unwrap_or_default();
    format!(
        "\n{}  {}\n{}\n",
        progress.label().bold(),
        current.bold(),
        trail.join(" > ")
    )
}

pub fn field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {} {}: {}\n", "✗".red(), e.field, e.message))
        .collect()
}

pub fn racial_bonuses(bonuses: &[(Ability, i32)]) -> String {
    if bonuses.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = bonuses
        .iter()
        .map(|(ability, bonus)| format!("{} {}", ability.abbreviation(), format_modifier(*bonus)))
        .collect();
    format!("Racial bonuses: {}", parts.join(", "))
}

pub fn point_budget(spent: i32, remaining: i32) -> String {
    let line = format!("Points spent: {}  Remaining: {}", spent, remaining);
    if remaining < 0 {
        line.red().to_string()
    } else {
        line
    }
}

pub fn submit_error(err: &SubmitError) -> String {
    let mut out = format!("{} {}\n", "✗".red().bold(), err.to_string().red());
    match err {
        SubmitError::Validation(errors) => out.push_str(&field_errors(errors)),
        SubmitError::Rejected { field_errors, .. } => {
            for e in field_errors {
                out.push_str(&format!("  {} {}: {}\n", "✗".red(), e.field, e.message));
            }
        }
        SubmitError::Network(_) => out.push_str("Check your connection and try again.\n"),
        _ => {}
    }
    out
}

pub fn recovery_screen(screen: &RecoveryScreen) -> String {
    format!(
        "{}\n{}\n[{}]\n",
        screen.title.red().bold(),
        screen.message,
        screen.action
    )
}

pub fn not_found_screen() -> String {
    format!(
        "{}\n{}\n[{}]\n",
        NOT_FOUND_TITLE.bold(),
        NOT_FOUND_MESSAGE,
        NOT_FOUND_ACTION
    )
}
