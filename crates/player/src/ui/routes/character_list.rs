//! Character list screen.

use std::sync::Arc;

use dialoguer::{Input, Select};

use pcm_shared::{SortField, SortOrder};

use super::Route;
use crate::application::list::{CharacterListView, DisplayState};
use crate::application::services::CharacterService;
use crate::ports::outbound::SleepProvider;
use crate::ui::presentation::views;
use crate::ui::UiError;

/// Query the screen opens with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialQuery {
    pub search: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Open,
    Create,
    NextPage,
    PreviousPage,
    GoToPage,
    Search,
    ClearSearch,
    Sort,
    Retry,
    Quit,
}

impl ListAction {
    pub fn label(self) -> &'static str {
        match self {
            ListAction::Open => "Open a character",
            ListAction::Create => "Create a character",
            ListAction::NextPage => "Next page",
            ListAction::PreviousPage => "Previous page",
            ListAction::GoToPage => "Go to page",
            ListAction::Search => "Search",
            ListAction::ClearSearch => "Clear search",
            ListAction::Sort => "Sort",
            ListAction::Retry => "Try again",
            ListAction::Quit => "Quit",
        }
    }
}

/// Actions that make sense for what the view currently shows.
pub fn list_actions(view: &CharacterListView) -> Vec<ListAction> {
    let mut actions = Vec::new();
    match view.display_state() {
        DisplayState::Loading | DisplayState::Error(_) => actions.push(ListAction::Retry),
        DisplayState::Empty => actions.push(ListAction::Create),
        DisplayState::EmptySearch(_) => {
            actions.push(ListAction::ClearSearch);
            actions.push(ListAction::Search);
        }
        DisplayState::Loaded => {
            actions.push(ListAction::Open);
            actions.push(ListAction::Create);
            if let Some(info) = view.page_info() {
                if info.has_next() {
                    actions.push(ListAction::NextPage);
                }
                if info.has_previous() {
                    actions.push(ListAction::PreviousPage);
                }
                if info.show_pagination() {
                    actions.push(ListAction::GoToPage);
                }
            }
            actions.push(ListAction::Search);
            if !view.query().search.is_empty() {
                actions.push(ListAction::ClearSearch);
            }
            actions.push(ListAction::Sort);
        }
    }
    actions.push(ListAction::Quit);
    actions
}

fn select(prompt: &str, items: &[String], default: usize) -> Result<usize, UiError> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?)
}

/// Print one page and return.
pub async fn print_once(
    service: &CharacterService,
    sleeper: Arc<dyn SleepProvider>,
    query: InitialQuery,
) {
    let mut view = seeded_view(sleeper, query);
    view.refresh(service).await;
    print!("{}", views::list_screen(&view));
}

fn seeded_view(sleeper: Arc<dyn SleepProvider>, query: InitialQuery) -> CharacterListView {
    let mut view = CharacterListView::new(sleeper);
    view.set_search(query.search);
    view.set_sort(query.sort_by, query.sort_order);
    view.set_page(query.page);
    view
}

pub async fn show(
    service: &CharacterService,
    sleeper: Arc<dyn SleepProvider>,
    query: InitialQuery,
    banner: Option<String>,
) -> Result<Option<Route>, UiError> {
    let mut view = seeded_view(sleeper, query);
    if let Some(message) = banner {
        // Detached; clears itself after the dismiss delay.
        let _dismissal = view.show_success(message);
    }
    view.refresh(service).await;

    loop {
        println!("{}", views::list_screen(&view));

        let actions = list_actions(&view);
        let items: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();
        let action = actions
            .get(select("Characters", &items, 0)?)
            .copied()
            .unwrap_or(ListAction::Quit);

        match action {
            ListAction::Open => {
                let names: Vec<String> = view.characters().iter().map(|c| c.summary()).collect();
                let index = select("Open", &names, 0)?;
                if let Some(character) = view.characters().get(index) {
                    return Ok(Some(Route::CharacterDetail { id: character.id }));
                }
            }
            ListAction::Create => return Ok(Some(Route::CreateCharacter)),
            ListAction::NextPage => {
                view.set_page(view.query().page.saturating_add(1));
            }
            ListAction::PreviousPage => {
                view.set_page(view.query().page.saturating_sub(1));
            }
            ListAction::GoToPage => {
                let pages = view.visible_pages();
                let labels: Vec<String> = pages.iter().map(u32::to_string).collect();
                let current = pages
                    .iter()
                    .position(|p| *p == view.query().page)
                    .unwrap_or(0);
                if let Some(page) = pages.get(select("Page", &labels, current)?) {
                    view.set_page(*page);
                }
            }
            ListAction::Search => {
                let term = Input::<String>::new()
                    .with_prompt("Search characters by name")
                    .with_initial_text(view.query().search.clone())
                    .allow_empty(true)
                    .interact_text()?;
                let debouncer = view.search_debouncer();
                if let Some(term) = debouncer.debounce(term).await {
                    view.set_search(term);
                }
            }
            ListAction::ClearSearch => {
                view.clear_search();
            }
            ListAction::Sort => {
                let fields: Vec<String> = SortField::ALL.iter().map(|f| f.label().to_string()).collect();
                let current = SortField::ALL
                    .iter()
                    .position(|f| *f == view.query().sort_by)
                    .unwrap_or(0);
                let field = SortField::ALL
                    .get(select("Sort by", &fields, current)?)
                    .copied()
                    .unwrap_or_default();
                let orders = ["Ascending".to_string(), "Descending".to_string()];
                let order = match select("Order", &orders, 1)? {
                    0 => SortOrder::Asc,
                    _ => SortOrder::Desc,
                };
                view.set_sort(field, order);
            }
            ListAction::Retry => {}
            ListAction::Quit => return Ok(None),
        }

        view.refresh(service).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures;
    use crate::infrastructure::TokioSleepProvider;
    use pcm_shared::PaginatedResponse;

    fn loaded(page: u32, total_pages: u32) -> CharacterListView {
        let mut view = CharacterListView::new(Arc::new(TokioSleepProvider));
        let ticket = view.begin_refresh();
        view.finish_refresh(
            ticket,
            Ok(PaginatedResponse {
                data: vec![fixtures::character()],
                total: 1,
                page,
                limit: 20,
                total_pages,
            }),
        );
        view
    }

    #[test]
    fn single_page_has_no_paging_actions() {
        let actions = list_actions(&loaded(1, 1));
        assert!(actions.contains(&ListAction::Open));
        assert!(!actions.contains(&ListAction::NextPage));
        assert!(!actions.contains(&ListAction::GoToPage));
        assert_eq!(actions.last(), Some(&ListAction::Quit));
    }

    #[test]
    fn middle_page_offers_both_directions() {
        let actions = list_actions(&loaded(2, 3));
        assert!(actions.contains(&ListAction::NextPage));
        assert!(actions.contains(&ListAction::PreviousPage));
        assert!(actions.contains(&ListAction::GoToPage));
    }

    #[test]
    fn error_offers_retry() {
        let mut view = CharacterListView::new(Arc::new(TokioSleepProvider));
        let ticket = view.begin_refresh();
        view.finish_refresh(
            ticket,
            Err(crate::ports::outbound::ApiError::transport("down").into()),
        );
        assert_eq!(list_actions(&view), vec![ListAction::Retry, ListAction::Quit]);
    }

    #[test]
    fn seeded_view_applies_query() {
        let view = seeded_view(
            Arc::new(TokioSleepProvider),
            InitialQuery {
                search: "Aria".into(),
                sort_by: SortField::Level,
                sort_order: SortOrder::Asc,
                page: 3,
            },
        );
        let params = view.params();
        assert_eq!(params.page, Some(3));
        assert_eq!(params.search.as_deref(), Some("Aria"));
        assert_eq!(params.sort_by, Some(SortField::Level));
    }
}
