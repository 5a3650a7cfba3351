//! # Actions
//!
//! Everything that can happen to the listing becomes an `Action`.
//! User asks for the next page? That's `Action::NextPage`.
//! Backend answers? That's `Action::OperadorasLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing any I/O that should follow. No I/O here;
//! the `Store` runs the effects and feeds their results back in as actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch is tagged with a request id. Only the completion matching the
//! latest id is applied; anything older is dropped, so a slow response can
//! never overwrite a newer page.

use log::{debug, error};

use crate::api::{ApiError, Estatisticas, PageResult};
use crate::core::state::State;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Load `page` of the listing filtered by `search` ("" = no filter).
    FetchOperadoras { page: u32, search: String },
    /// A listing fetch finished.
    OperadorasLoaded {
        request_id: u64,
        search: String,
        result: Result<PageResult, ApiError>,
    },
    FetchEstatisticas,
    /// A statistics fetch finished.
    EstatisticasLoaded {
        request_id: u64,
        result: Result<Estatisticas, ApiError>,
    },
    /// Jump to `page`, keeping the current search. Not checked against
    /// `total_pages`.
    SetPage(u32),
    NextPage,
    PrevPage,
    /// Fetch the current page again with the current search.
    Retry,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchOperadoras {
        request_id: u64,
        page: u32,
        limit: u32,
        search: String,
    },
    FetchEstatisticas { request_id: u64 },
}

pub fn update(state: &mut State, action: Action) -> Effect {
    match action {
        Action::FetchOperadoras { page, search } => start_listing_fetch(state, page, search),

        Action::OperadorasLoaded {
            request_id,
            search,
            result,
        } => {
            if request_id != state.listing_request {
                debug!(
                    "Dropping stale listing response (request {}, latest {})",
                    request_id, state.listing_request
                );
                return Effect::None;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    debug!(
                        "Listing loaded: page {}/{} ({} items, {} total)",
                        page.page,
                        page.total_pages,
                        page.data.len(),
                        page.total
                    );
                    state.operadoras = page.data;
                    state.current_page = page.page;
                    state.total = page.total;
                    state.total_pages = page.total_pages;
                    state.search_query = search;
                }
                Err(err) => {
                    debug!("Listing failed: {err:?}");
                    // Pagination metadata stays as it was so the pager does
                    // not collapse on a transient failure.
                    state.error = Some(err);
                    state.operadoras.clear();
                }
            }
            Effect::None
        }

        Action::FetchEstatisticas => {
            state.estatisticas_request += 1;
            state.estatisticas_loading = true;
            Effect::FetchEstatisticas {
                request_id: state.estatisticas_request,
            }
        }

        Action::EstatisticasLoaded { request_id, result } => {
            if request_id != state.estatisticas_request {
                debug!(
                    "Dropping stale statistics response (request {}, latest {})",
                    request_id, state.estatisticas_request
                );
                return Effect::None;
            }
            state.estatisticas_loading = false;
            match result {
                Ok(stats) => state.estatisticas = Some(stats),
                Err(err) => error!("Erro ao carregar estatísticas: {err} ({err:?})"),
            }
            Effect::None
        }

        Action::SetPage(page) => {
            state.current_page = page;
            let search = state.search_query.clone();
            start_listing_fetch(state, page, search)
        }

        Action::NextPage => {
            if state.has_next_page() {
                let next = state.current_page + 1;
                update(state, Action::SetPage(next))
            } else {
                Effect::None
            }
        }

        Action::PrevPage => {
            if state.has_prev_page() {
                let prev = state.current_page - 1;
                update(state, Action::SetPage(prev))
            } else {
                Effect::None
            }
        }

        Action::Retry => {
            let (page, search) = (state.current_page, state.search_query.clone());
            start_listing_fetch(state, page, search)
        }
    }
}

fn start_listing_fetch(state: &mut State, page: u32, search: String) -> Effect {
    state.listing_request += 1;
    state.loading = true;
    state.error = None;
    Effect::FetchOperadoras {
        request_id: state.listing_request,
        page,
        limit: state.limit(),
        search,
    }
}
