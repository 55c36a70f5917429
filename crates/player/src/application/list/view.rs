//! Character list view: query state, fetched page, display state.

use std::sync::Arc;

use tokio::task::JoinHandle;

use pcm_domain::Character;
use pcm_shared::{ListCharactersParams, PaginatedResponse, SortField, SortOrder};

use super::banner::SuccessBanner;
use super::debounce::Debouncer;
use super::pagination::{visible_pages, PageInfo, MAX_VISIBLE_PAGES};
use crate::application::services::CharacterService;
use crate::application::ServiceError;
use crate::ports::outbound::SleepProvider;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const LOAD_ERROR_FALLBACK: &str = "Failed to load characters";

/// What the list query currently asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ListQuery {
    /// Wire parameters. A blank search is left out.
    pub fn params(&self) -> ListCharactersParams {
        let search = self.search.trim();
        ListCharactersParams {
            page: Some(self.page),
            limit: Some(self.limit),
            search: (!search.is_empty()).then(|| search.to_string()),
            sort_by: Some(self.sort_by),
            sort_order: Some(self.sort_order),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Error(String),
    /// No characters exist at all.
    Empty,
    /// The search matched nothing.
    EmptySearch(String),
    Loaded,
}

/// Identifies one list request; only the newest may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

pub struct CharacterListView {
    query: ListQuery,
    characters: Vec<Character>,
    page_info: Option<PageInfo>,
    loading: bool,
    error: Option<String>,
    request_seq: u64,
    debouncer: Debouncer,
    banner: SuccessBanner,
}

impl CharacterListView {
    pub fn new(sleeper: Arc<dyn SleepProvider>) -> Self {
        Self {
            query: ListQuery::default(),
            characters: Vec::new(),
            page_info: None,
            loading: true,
            error: None,
            request_seq: 0,
            debouncer: Debouncer::search(Arc::clone(&sleeper)),
            banner: SuccessBanner::new(sleeper),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.page_info
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn params(&self) -> ListCharactersParams {
        self.query.params()
    }

    /// Debouncer for raw search keystrokes. Feed each keystroke through it
    /// and call [`set_search`](Self::set_search) with what comes out.
    pub fn search_debouncer(&self) -> Debouncer {
        self.debouncer.clone()
    }

    /// Returns whether the query changed. Any change goes back to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.query.search {
            return false;
        }
        self.query.search = search;
        self.query.page = 1;
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.debouncer.cancel();
        self.set_search(String::new())
    }

    pub fn set_sort(&mut self, sort_by: SortField, sort_order: SortOrder) -> bool {
        if sort_by == self.query.sort_by && sort_order == self.query.sort_order {
            return false;
        }
        self.query.sort_by = sort_by;
        self.query.sort_order = sort_order;
        self.query.page = 1;
        true
    }

    /// Clamped to the known page range.
    pub fn set_page(&mut self, page: u32) -> bool {
        let last = self
            .page_info
            .map(|info| info.total_pages.max(1))
            .unwrap_or(u32::MAX);
        let page = page.clamp(1, last);
        if page == self.query.page {
            return false;
        }
        self.query.page = page;
        true
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.request_seq += 1;
        self.loading = true;
        self.error = None;
        RefreshTicket(self.request_seq)
    }

    /// Apply a list result. Returns `false` and changes nothing when a newer
    /// request has been issued since `ticket`.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<PaginatedResponse<Character>, ServiceError>,
    ) -> bool {
        if ticket.0 != self.request_seq {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.request_seq,
                "Dropping stale list response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.page_info = Some(PageInfo::from_response(&page));
                self.characters = page.data;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(operation = "list", error = %e, "Failed to load characters");
                let message = e.to_string();
                self.error = Some(if message.trim().is_empty() {
                    LOAD_ERROR_FALLBACK.to_string()
                } else {
                    message
                });
            }
        }
        true
    }

    /// Fetch the page the query describes.
    pub async fn refresh(&mut self, service: &CharacterService) -> bool {
        let ticket = self.begin_refresh();
        let params = self.params();
        let result = service.list(&params).await;
        self.finish_refresh(ticket, result)
    }

    pub fn display_state(&self) -> DisplayState {
        if self.loading {
            return DisplayState::Loading;
        }
        if let Some(error) = &self.error {
            return DisplayState::Error(error.clone());
        }
        if self.characters.is_empty() {
            let search = self.query.search.trim();
            return if search.is_empty() {
                DisplayState::Empty
            } else {
                DisplayState::EmptySearch(search.to_string())
            };
        }
        DisplayState::Loaded
    }

    /// Page buttons to show; empty when pagination is hidden.
    pub fn visible_pages(&self) -> Vec<u32> {
        match self.page_info {
            Some(info) if info.show_pagination() => {
                visible_pages(info.page, info.total_pages, MAX_VISIBLE_PAGES)
            }
            _ => Vec::new(),
        }
    }

    pub fn banner(&self) -> &SuccessBanner {
        &self.banner
    }

    pub fn show_success(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.banner.show(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures;
    use crate::infrastructure::TokioSleepProvider;
    use crate::ports::outbound::{ApiError, MockRawApiPort};
    use serde_json::json;

    fn view() -> CharacterListView {
        CharacterListView::new(Arc::new(TokioSleepProvider))
    }

    fn page_of(characters: Vec<Character>, page: u32, total_pages: u32) -> PaginatedResponse<Character> {
        PaginatedResponse {
            total: u64::from(total_pages) * u64::from(DEFAULT_PAGE_SIZE),
            data: characters,
            page,
            limit: DEFAULT_PAGE_SIZE,
            total_pages,
        }
    }

    #[test]
    fn default_query() {
        let params = view().params();
        assert_eq!(params.page, Some(1));
        assert_eq!(params.limit, Some(20));
        assert_eq!(params.search, None);
        assert_eq!(params.sort_by, Some(SortField::CreatedAt));
        assert_eq!(params.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn search_and_sort_reset_page() {
        let mut view = view();
        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(vec![fixtures::character()], 1, 5)));

        assert!(view.set_page(3));
        assert!(view.set_search("ari"));
        assert_eq!(view.query().page, 1);

        view.set_page(3);
        assert!(view.set_sort(SortField::Level, SortOrder::Asc));
        assert_eq!(view.query().page, 1);
        assert!(!view.set_sort(SortField::Level, SortOrder::Asc));
    }

    #[test]
    fn whitespace_search_is_not_sent() {
        let mut view = view();
        view.set_search("   ");
        assert_eq!(view.params().search, None);
        view.set_search(" Aria ");
        assert_eq!(view.params().search.as_deref(), Some("Aria"));
    }

    #[test]
    fn page_is_clamped_to_known_range() {
        let mut view = view();
        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(vec![fixtures::character()], 1, 3)));
        view.set_page(9);
        assert_eq!(view.query().page, 3);
        view.set_page(0);
        assert_eq!(view.query().page, 1);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut view = view();
        let old = view.begin_refresh();
        let new = view.begin_refresh();

        assert!(view.finish_refresh(new, Ok(page_of(vec![fixtures::character()], 1, 1))));
        assert!(!view.finish_refresh(old, Ok(page_of(Vec::new(), 1, 1))));
        assert_eq!(view.characters().len(), 1);
        assert_eq!(view.display_state(), DisplayState::Loaded);
    }

    #[test]
    fn display_states() {
        let mut view = view();
        assert_eq!(view.display_state(), DisplayState::Loading);

        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(Vec::new(), 1, 0)));
        assert_eq!(view.display_state(), DisplayState::Empty);

        view.set_search("zzz");
        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(Vec::new(), 1, 0)));
        assert_eq!(
            view.display_state(),
            DisplayState::EmptySearch("zzz".into())
        );

        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Err(ApiError::transport("connection refused").into()));
        assert_eq!(
            view.display_state(),
            DisplayState::Error("connection refused".into())
        );
    }

    #[test]
    fn blank_error_falls_back() {
        let mut view = view();
        let ticket = view.begin_refresh();
        let blank = ApiError {
            message: String::new(),
            status: Some(500),
            details: None,
        };
        view.finish_refresh(ticket, Err(blank.into()));
        assert_eq!(view.error(), Some(LOAD_ERROR_FALLBACK));
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let mut view = view();
        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(vec![fixtures::character()], 1, 1)));
        assert!(view.visible_pages().is_empty());

        let ticket = view.begin_refresh();
        view.finish_refresh(ticket, Ok(page_of(vec![fixtures::character()], 4, 9)));
        assert_eq!(view.visible_pages(), vec![2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn refresh_uses_current_query() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .withf(|path| {
                path.contains("page=1") && path.contains("search=Aria") && path.contains("sortBy=level")
            })
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "data": [fixtures::character_json()],
                    "total": 1,
                    "page": 1,
                    "limit": 20,
                    "totalPages": 1
                }))
            });
        let service = CharacterService::new(Arc::new(api));

        let mut view = view();
        view.set_search("Aria");
        view.set_sort(SortField::Level, SortOrder::Desc);
        assert!(view.refresh(&service).await);
        assert_eq!(view.display_state(), DisplayState::Loaded);
        assert_eq!(view.page_info().map(|p| p.total), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_search_applies_last_keystroke() {
        let mut view = view();
        let debouncer = view.search_debouncer();

        let early = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.debounce("Ar".to_string()).await }
        });
        tokio::task::yield_now().await;

        if let Some(term) = debouncer.debounce("Aria".to_string()).await {
            view.set_search(term);
        }
        assert_eq!(early.await.expect("task completes"), None);
        assert_eq!(view.query().search, "Aria");
    }
}
