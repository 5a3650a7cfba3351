//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::api::{
    ApiError, Estatisticas, HistoricoDespesas, Operadora, OperadorasApi, PageResult,
    total_pages_for,
};
use crate::core::state::{DEFAULT_PAGE_SIZE, State};

/// Fresh state with the default page size.
pub fn test_state() -> State {
    State::new(DEFAULT_PAGE_SIZE)
}

/// A well-formed page of `total` fake operators.
pub fn page_result(page: u32, limit: u32, total: u64) -> PageResult {
    let start = u64::from(page.saturating_sub(1)) * u64::from(limit);
    let end = (start + u64::from(limit)).min(total);
    let data = (start..end)
        .map(|i| Operadora {
            cnpj: Some(format!("{:014}", i + 1)),
            registro_ans: Some(format!("{:06}", i + 1)),
            razao_social: Some(format!("Operadora {}", i + 1)),
            ..Default::default()
        })
        .collect();
    PageResult {
        data,
        page,
        total,
        total_pages: total_pages_for(total, limit),
        limit: Some(limit),
    }
}

/// Records one listing call made against a fake API.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCall {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

/// Answers every call immediately from fixed results and records the
/// listing calls it receives.
pub struct StaticApi {
    pub listing: Result<PageResult, ApiError>,
    pub estatisticas: Result<Estatisticas, ApiError>,
    pub calls: Mutex<Vec<ListCall>>,
}

impl StaticApi {
    pub fn new(listing: Result<PageResult, ApiError>) -> Self {
        Self {
            listing,
            estatisticas: Ok(Estatisticas::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ListCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OperadorasApi for StaticApi {
    async fn get_operadoras(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<PageResult, ApiError> {
        self.calls.lock().unwrap().push(ListCall {
            page,
            limit,
            search: search.to_string(),
        });
        self.listing.clone()
    }

    async fn get_operadora(&self, _key: &str) -> Result<Operadora, ApiError> {
        Err(ApiError::NotFound { detail: None })
    }

    async fn get_operadora_despesas(&self, _key: &str) -> Result<HistoricoDespesas, ApiError> {
        Err(ApiError::NotFound { detail: None })
    }

    async fn get_estatisticas(&self) -> Result<Estatisticas, ApiError> {
        self.estatisticas.clone()
    }
}

/// Listing calls block until the test releases them, one page at a time.
/// Lets tests choose the order in which overlapping requests complete.
#[derive(Default)]
pub struct GatedApi {
    gates: Mutex<HashMap<u32, oneshot::Receiver<Result<PageResult, ApiError>>>>,
}

impl GatedApi {
    /// Registers a gate for `page` and returns the sender that releases it.
    pub fn gate(&self, page: u32) -> oneshot::Sender<Result<PageResult, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }
}

#[async_trait]
impl OperadorasApi for GatedApi {
    async fn get_operadoras(
        &self,
        page: u32,
        _limit: u32,
        _search: &str,
    ) -> Result<PageResult, ApiError> {
        let gate = self.gates.lock().unwrap().remove(&page);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string()))),
            None => Err(ApiError::Unknown(Some(format!("no gate for page {page}")))),
        }
    }

    async fn get_operadora(&self, _key: &str) -> Result<Operadora, ApiError> {
        Err(ApiError::NotFound { detail: None })
    }

    async fn get_operadora_despesas(&self, _key: &str) -> Result<HistoricoDespesas, ApiError> {
        Err(ApiError::NotFound { detail: None })
    }

    async fn get_estatisticas(&self) -> Result<Estatisticas, ApiError> {
        Err(ApiError::Unavailable)
    }
}

/// Every call panics, the way a bug inside a request task would.
pub struct PanickingApi;

#[async_trait]
impl OperadorasApi for PanickingApi {
    async fn get_operadoras(
        &self,
        page: u32,
        _limit: u32,
        _search: &str,
    ) -> Result<PageResult, ApiError> {
        panic!("listing request for page {page} blew up");
    }

    async fn get_operadora(&self, _key: &str) -> Result<Operadora, ApiError> {
        panic!("detail request blew up");
    }

    async fn get_operadora_despesas(&self, _key: &str) -> Result<HistoricoDespesas, ApiError> {
        panic!("despesas request blew up");
    }

    async fn get_estatisticas(&self) -> Result<Estatisticas, ApiError> {
        panic!("statistics request blew up");
    }
}
