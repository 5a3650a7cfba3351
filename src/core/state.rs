//! # Listing State
//!
//! Everything the views read, in one struct. Presentation concerns live in
//! the shell; this is only data.
//!
//! ```text
//! State
//! ├── operadoras: Vec<Operadora>       // current page, replaced wholesale
//! ├── current_page: u32                // 1-indexed
//! ├── limit: u32                       // page size, fixed at construction
//! ├── total / total_pages              // mirror of the last PageResult
//! ├── loading: bool                    // listing fetch in flight
//! ├── error: Option<ApiError>          // last listing failure
//! ├── search_query: String             // "" = no filter
//! ├── estatisticas: Option<..>         // independent of the listing
//! └── estatisticas_loading: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{ApiError, Estatisticas, Operadora};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub operadoras: Vec<Operadora>,
    pub current_page: u32,
    limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub search_query: String,
    pub estatisticas: Option<Estatisticas>,
    pub estatisticas_loading: bool,
    /// Id of the most recently issued listing fetch. Completions carrying
    /// any other id are stale.
    pub(crate) listing_request: u64,
    /// Same, for statistics fetches.
    pub(crate) estatisticas_request: u64,
}

impl State {
    pub fn new(limit: u32) -> Self {
        Self {
            operadoras: Vec::new(),
            current_page: 1,
            limit,
            total: 0,
            total_pages: 0,
            loading: false,
            error: None,
            search_query: String::new(),
            estatisticas: None,
            estatisticas_loading: false,
            listing_request: 0,
            estatisticas_request: 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The user-facing message for the last listing failure.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
