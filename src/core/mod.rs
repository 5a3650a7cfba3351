//! # Core Application Logic
//!
//! The listing data layer. It knows nothing about how views are drawn.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (listing data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (runs effects) │
//!                    │  • Routes (path → view) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ Shell/TUI  │      │    API     │      │   Tests    │
//!     │ (ratatui)  │      │  (reqwest) │      │ (fake API) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `State` struct, all listing state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`store`]: The `Store` that owns the state and runs effects
//! - [`routes`]: The static route table
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod routes;
pub mod state;
pub mod store;

pub use action::{Action, Effect};
pub use routes::{Route, View};
pub use state::State;
pub use store::Store;
