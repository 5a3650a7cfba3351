//! # API Errors
//!
//! Every failure the client can hit collapses into one `ApiError`. The
//! variant records what went wrong; `Display` produces the message the
//! views show to the user.
//!
//! ```text
//! server answered ──► NotFound | ServerError | Unavailable | Http
//! no answer       ──► Network
//! never sent      ──► Unknown
//! ```

use std::fmt;

use super::types::ErrorBody;

pub const MSG_NOT_FOUND: &str = "Recurso não encontrado";
pub const MSG_SERVER_ERROR: &str = "Erro no servidor. Por favor, tente novamente mais tarde.";
pub const MSG_UNAVAILABLE: &str = "Serviço temporariamente indisponível";
pub const MSG_NO_CONNECTION: &str = "Sem conexão com o servidor. Verifique sua internet.";
pub const MSG_UNKNOWN: &str = "Erro desconhecido. Tente novamente.";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP 404. `detail` comes from the server's error body when present.
    NotFound { detail: Option<String> },
    /// HTTP 500.
    ServerError,
    /// HTTP 503.
    Unavailable,
    /// Any other non-success status.
    Http { status: u16, detail: Option<String> },
    /// The request went out but no response came back (refused, reset, timeout).
    Network(String),
    /// The request was never sent, or the response could not be understood.
    Unknown(Option<String>),
}

impl ApiError {
    /// Classifies a non-success response by status code and error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            404 => ApiError::NotFound { detail },
            500 => ApiError::ServerError,
            503 => ApiError::Unavailable,
            _ => ApiError::Http { status, detail },
        }
    }

    /// Classifies a transport-level failure that produced no usable response.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            return ApiError::Unknown(non_empty(err.to_string()));
        }
        ApiError::Network(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { detail } => {
                write!(f, "{}", detail.as_deref().unwrap_or(MSG_NOT_FOUND))
            }
            ApiError::ServerError => write!(f, "{MSG_SERVER_ERROR}"),
            ApiError::Unavailable => write!(f, "{MSG_UNAVAILABLE}"),
            ApiError::Http { status, detail } => match detail {
                Some(detail) => write!(f, "{detail}"),
                None => write!(f, "Erro HTTP {status}"),
            },
            ApiError::Network(_) => write!(f, "{MSG_NO_CONNECTION}"),
            ApiError::Unknown(message) => {
                write!(f, "{}", message.as_deref().unwrap_or(MSG_UNKNOWN))
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Pulls a non-empty string `detail` out of a JSON error body.
/// FastAPI validation errors carry a list there; those count as no detail.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| d.as_str().map(str::to_string))
        .and_then(non_empty)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
