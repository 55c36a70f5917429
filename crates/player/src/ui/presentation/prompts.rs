//! Interactive prompts that fill one wizard step at a time.

use std::fmt::Display;
use std::str::FromStr;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use pcm_domain::{Ability, Alignment, Background, CharacterClass, CharacterDraft, Race};

use super::views;
use crate::application::wizard::{
    AbilityScoresForm, BackgroundForm, BasicInfoForm, ClassForm, StepReport, WizardController,
    WizardStep,
};
use crate::ui::UiError;

const NONE_LABEL: &str = "(none)";

fn text(prompt: &str, initial: &str, allow_empty: bool) -> Result<String, UiError> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(allow_empty)
        .interact_text()?;
    Ok(value)
}

fn number<T>(prompt: &str, current: T) -> Result<T, UiError>
where
    T: Clone + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = Input::<T>::new()
        .with_prompt(prompt)
        .default(current)
        .interact_text()?;
    Ok(value)
}

/// Pick one label. With `optional`, a leading "(none)" entry maps to "".
/// Picker entries and the default index. A non-blank current value that is
/// not among `options` (a free-form subclass, say) is kept as an entry so
/// accepting the default never drops it.
fn select_items<'a>(
    options: &[&'a str],
    current: &'a str,
    optional: bool,
) -> (Vec<&'a str>, usize) {
    let mut items: Vec<&str> = Vec::with_capacity(options.len() + 2);
    if optional {
        items.push(NONE_LABEL);
    }
    items.extend_from_slice(options);

    let current = current.trim();
    if !current.is_empty() && !items.contains(&current) {
        items.push(current);
    }

    let default = items.iter().position(|item| *item == current).unwrap_or(0);
    (items, default)
}

fn select_label(
    prompt: &str,
    options: &[&str],
    current: &str,
    optional: bool,
) -> Result<String, UiError> {
    let (items, default) = select_items(options, current, optional);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;

    Ok(match items.get(index) {
        Some(&NONE_LABEL) | None => String::new(),
        Some(item) => (*item).to_string(),
    })
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool, UiError> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn print_report(report: &StepReport) {
    if !report.valid {
        print!("{}", views::field_errors(&report.errors));
    }
}

fn labels<T: Copy>(values: &[T], label: impl Fn(T) -> &'static str) -> Vec<&'static str> {
    values.iter().copied().map(label).collect()
}

pub fn basic_info(draft: &CharacterDraft) -> Result<StepReport, UiError> {
    let mut form = BasicInfoForm::from_draft(draft);

    let name = text("Character name", &form.values().name, false)?;
    form.set_name(name.trim());
    let player = text("Player name (optional)", &form.values().player_name, true)?;
    form.set_player_name(player.trim());

    let races = labels(Race::ALL, |r| r.as_str());
    let race = select_label("Race", &races, &form.values().race.clone(), false)?;
    form.set_race(race);

    let subraces = form.subrace_options();
    if !subraces.is_empty() {
        let subrace = select_label("Subrace", subraces, &form.values().subrace.clone(), true)?;
        form.set_subrace(subrace);
    }

    let bonuses = views::racial_bonuses(&form.racial_bonuses());
    if !bonuses.is_empty() {
        println!("{}", bonuses.dimmed());
    }

    let report = form.report();
    print_report(&report);
    Ok(report)
}

pub fn class_selection(draft: &CharacterDraft) -> Result<StepReport, UiError> {
    let mut form = ClassForm::from_draft(draft);

    let classes = labels(CharacterClass::ALL, |c| c.as_str());
    let class = select_label("Class", &classes, &form.values().class.clone(), false)?;
    form.set_class(class);

    let suggestions = form.subclass_options();
    let subclass = if suggestions.is_empty() {
        text("Subclass (optional)", &form.values().subclass, true)?
    } else {
        select_label("Subclass", suggestions, &form.values().subclass.clone(), true)?
    };
    form.set_subclass(subclass.trim());

    if !form.values().multiclass.is_empty() {
        for entry in &form.values().multiclass {
            println!("  Multiclass: {} {}", entry.class, entry.level);
        }
        if confirm("Clear multiclass entries?", false)? {
            form.clear_multiclass();
        }
    }
    while confirm("Add a multiclass entry?", false)? {
        form.add_multiclass();
        let index = form.values().multiclass.len().saturating_sub(1);
        let class = select_label("Multiclass class", &classes, "", false)?;
        form.set_multiclass_class(index, class);
        let level = number("Multiclass level", 1)?;
        let report = form.set_multiclass_level(index, level);
        print_report(&report);
        println!("Multiclass levels: {}", form.multiclass_levels());
    }

    let report = form.report();
    print_report(&report);
    Ok(report)
}

pub fn ability_scores(draft: &CharacterDraft) -> Result<StepReport, UiError> {
    let mut form = AbilityScoresForm::from_draft(draft);

    loop {
        for ability in Ability::ALL.iter().copied() {
            println!(
                "{}",
                views::point_budget(form.point_total(), form.remaining_points())
            );
            let prompt = format!("{} ({})", ability.label(), ability.abbreviation());
            let score = number(&prompt, *form.values().get(ability))?;
            form.set_score(ability, score);
        }
        println!(
            "{}",
            views::point_budget(form.point_total(), form.remaining_points())
        );

        let report = form.report();
        print_report(&report);
        if report.valid || !confirm("Adjust the scores again?", true)? {
            return Ok(report);
        }
    }
}

pub fn background_details(draft: &CharacterDraft) -> Result<StepReport, UiError> {
    let mut form = BackgroundForm::from_draft(draft);

    let backgrounds = labels(Background::ALL, |b| b.as_str());
    let background =
        select_label("Background", &backgrounds, &form.values().background.clone(), true)?;
    form.set_background(background);

    let alignments = labels(Alignment::ALL, |a| a.as_str());
    let alignment =
        select_label("Alignment", &alignments, &form.values().alignment.clone(), true)?;
    form.set_alignment(alignment);

    let level = number("Level", form.values().level)?;
    form.set_level(level);
    println!("Proficiency bonus: {}", views::format_modifier(form.proficiency_bonus()));

    let xp = number("Experience points", form.values().experience_points)?;
    let report = form.set_experience_points(xp);
    print_report(&report);
    Ok(report)
}

/// Run the prompts for `step` seeded from `draft`.
pub fn step(step: WizardStep, draft: &CharacterDraft) -> Result<StepReport, UiError> {
    match step {
        WizardStep::BasicInfo => basic_info(draft),
        WizardStep::Class => class_selection(draft),
        WizardStep::AbilityScores => ability_scores(draft),
        WizardStep::Background => background_details(draft),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    EditStep,
    Next,
    Back,
    Preview,
    Submit,
    Cancel,
}

impl StepAction {
    pub fn label(self) -> &'static str {
        match self {
            StepAction::EditStep => "Edit this step",
            StepAction::Next => "Next",
            StepAction::Back => "Back",
            StepAction::Preview => "Preview JSON",
            StepAction::Submit => "Submit",
            StepAction::Cancel => "Cancel",
        }
    }
}

/// Actions offered after a step. Next and Submit only appear once the
/// current step is valid.
pub fn available_actions(wizard: &WizardController) -> Vec<StepAction> {
    let mut actions = Vec::new();
    if wizard.can_proceed() {
        if wizard.is_last_step() {
            actions.push(StepAction::Submit);
        } else {
            actions.push(StepAction::Next);
        }
    }
    actions.push(StepAction::EditStep);
    if wizard.current_step().previous().is_some() {
        actions.push(StepAction::Back);
    }
    actions.push(StepAction::Preview);
    actions.push(StepAction::Cancel);
    actions
}

pub fn choose_action(wizard: &WizardController) -> Result<StepAction, UiError> {
    let actions = available_actions(wizard);
    let items: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(actions.get(index).copied().unwrap_or(StepAction::EditStep))
}
