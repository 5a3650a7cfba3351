use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A health-plan operator as returned by the backend.
///
/// Only `cnpj` (and `registro_ans` as fallback key) carry meaning for the
/// data layer. Everything else is passed through to the views untouched,
/// including attributes this struct does not name.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Operadora {
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub registro_ans: Option<String>,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub modalidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub data_cadastro: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operadora {
    /// Key used for detail lookups: the CNPJ, or the ANS registration when
    /// the operator has no CNPJ on file. The backend accepts either.
    pub fn key(&self) -> Option<&str> {
        self.cnpj
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.registro_ans.as_deref())
    }
}

/// One page of the operator listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageResult {
    pub data: Vec<Operadora>,
    pub page: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Number of pages needed to show `total` records at `limit` per page.
pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit)) as u32
}

/// Aggregate statistics over all operators and expenses.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Estatisticas {
    #[serde(default)]
    pub total_despesas: f64,
    #[serde(default)]
    pub media_despesas: f64,
    #[serde(default)]
    pub total_operadoras: u64,
    #[serde(default)]
    pub total_registros: u64,
    #[serde(default)]
    pub top_5_operadoras: Vec<TopOperadora>,
    #[serde(default)]
    pub despesas_por_uf: Vec<DespesaPorUf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TopOperadora {
    #[serde(default)]
    pub registro_ans: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub modalidade: Option<String>,
    #[serde(default)]
    pub total_despesas: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DespesaPorUf {
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub total_despesas: f64,
    #[serde(default)]
    pub num_operadoras: u64,
    #[serde(default)]
    pub percentual: f64,
}

/// Quarterly expense history of a single operator
/// (`/operadoras/{key}/despesas`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HistoricoDespesas {
    #[serde(default)]
    pub operadora: Option<Operadora>,
    #[serde(default)]
    pub despesas: Vec<DespesaTrimestral>,
    #[serde(default)]
    pub total_despesas: f64,
    #[serde(default)]
    pub num_trimestres: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DespesaTrimestral {
    pub trimestre: u8,
    pub ano: u16,
    pub valor_despesas: f64,
    #[serde(default)]
    pub data_importacao: Option<String>,
}

/// Query string of the listing endpoint. `search` is left out of the URL
/// entirely when there is no filter.
#[derive(Serialize, Debug)]
pub(crate) struct ListQuery<'a> {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
}

impl<'a> ListQuery<'a> {
    pub fn new(page: u32, limit: u32, search: &'a str) -> Self {
        Self {
            page,
            limit,
            search: (!search.is_empty()).then_some(search),
        }
    }
}

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}
