//! Character list: paging, sorting, debounced search, success banner.

pub mod banner;
pub mod debounce;
pub mod pagination;
pub mod view;

pub use banner::{SuccessBanner, BANNER_DISMISS_MS};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
pub use pagination::{visible_pages, PageInfo, MAX_VISIBLE_PAGES};
pub use view::{
    CharacterListView, DisplayState, ListQuery, RefreshTicket, DEFAULT_PAGE_SIZE,
    LOAD_ERROR_FALLBACK,
};
