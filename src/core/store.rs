//! # Store
//!
//! The session's single source of listing state, plus the machinery that
//! runs the I/O `update()` asks for.
//!
//! ```text
//!  view ──► Store::next_page() ──► update() ──► Effect::FetchOperadoras
//!                                                    │
//!                                         tokio::spawn(api call)
//!                                                    │
//!  view ◄── state() ◄── update() ◄── Action::OperadorasLoaded ◄─┘
//! ```
//!
//! Actions are applied synchronously when dispatched. Completions queue up
//! on a channel and are applied one at a time by `process_next()` or
//! `settle()`, so state is only ever touched from the owner of the `Store`.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::api::{ApiError, OperadorasApi};
use crate::core::action::{Action, Effect, update};
use crate::core::state::State;

pub struct Store {
    state: State,
    api: Arc<dyn OperadorasApi>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    in_flight: usize,
}

impl Store {
    pub fn new(api: Arc<dyn OperadorasApi>, page_size: u32) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state: State::new(page_size),
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn api(&self) -> Arc<dyn OperadorasApi> {
        self.api.clone()
    }

    /// Applies `action` and starts whatever I/O it calls for.
    /// Must be called from inside a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatch: {:?}", action);
        let effect = update(&mut self.state, action);
        self.run(effect);
    }

    pub fn fetch_operadoras(&mut self, page: u32, search: impl Into<String>) {
        self.dispatch(Action::FetchOperadoras {
            page,
            search: search.into(),
        });
    }

    pub fn fetch_estatisticas(&mut self) {
        self.dispatch(Action::FetchEstatisticas);
    }

    pub fn set_page(&mut self, page: u32) {
        self.dispatch(Action::SetPage(page));
    }

    pub fn next_page(&mut self) {
        self.dispatch(Action::NextPage);
    }

    pub fn prev_page(&mut self) {
        self.dispatch(Action::PrevPage);
    }

    /// Number of spawned requests whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next completion and applies it. Returns `false` when
    /// nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(action) => {
                self.in_flight -= 1;
                self.dispatch(action);
                true
            }
            // The store holds a sender, so the channel cannot close while
            // `self` is alive.
            None => false,
        }
    }

    /// Applies completions until no request is left in flight.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    /// Applies every completion that has already arrived, without waiting.
    /// Returns how many were applied.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::FetchOperadoras {
                request_id,
                page,
                limit,
                search,
            } => {
                info!(
                    "Spawning listing request {} (page={}, limit={}, search={:?})",
                    request_id, page, limit, search
                );
                let api = self.api.clone();
                let query = search.clone();
                let request =
                    tokio::spawn(async move { api.get_operadoras(page, limit, &query).await });
                self.deliver(request_id, request, move |result| Action::OperadorasLoaded {
                    request_id,
                    search,
                    result,
                });
            }
            Effect::FetchEstatisticas { request_id } => {
                info!("Spawning statistics request {}", request_id);
                let api = self.api.clone();
                let request = tokio::spawn(async move { api.get_estatisticas().await });
                self.deliver(request_id, request, move |result| Action::EstatisticasLoaded {
                    request_id,
                    result,
                });
            }
        }
    }

    /// Waits on a spawned request and sends its completion back to the store.
    /// A request task that panics or is cancelled still completes, as
    /// `ApiError::Unknown`, so `in_flight` always drains.
    fn deliver<T, F>(
        &mut self,
        request_id: u64,
        request: JoinHandle<Result<T, ApiError>>,
        into_action: F,
    ) where
        T: Send + 'static,
        F: FnOnce(Result<T, ApiError>) -> Action + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = request.await.unwrap_or_else(|e| {
                error!("Request {request_id} task failed: {e}");
                Err(ApiError::Unknown(Some(format!("request task failed: {e}"))))
            });
            if tx.send(into_action(result)).is_err() {
                warn!("Failed to deliver request {request_id}: store dropped");
            }
        });
    }
}
