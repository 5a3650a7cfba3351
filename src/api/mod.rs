//! # Backend API
//!
//! Typed access to the operadoras REST backend.
//!
//! - [`client`]: `ApiClient` (reqwest) and the `OperadorasApi` trait
//! - [`error`]: `ApiError`, the single failure shape callers ever see
//! - [`types`]: response payloads

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, OperadorasApi, API_BASE_PATH, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use types::{
    DespesaPorUf, DespesaTrimestral, Estatisticas, HistoricoDespesas, Operadora, PageResult,
    TopOperadora, total_pages_for,
};
