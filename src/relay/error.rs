use crate::gateway::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const MSG_MISSING_FIELDS: &str = "Campos obrigatórios ausentes: name, email, message";
pub const MSG_INVALID_EMAIL: &str = "Formato de email inválido";
pub const MSG_RATE_LIMITED: &str = "Muitas requisições. Tente novamente em 15 minutos.";
pub const MSG_UPSTREAM_FAILED: &str = "Erro ao processar requisição. Tente novamente mais tarde.";
pub const MSG_INTERNAL: &str = "Erro interno do servidor";

/// Failures of the relay, each rendered as `{ "error": ... }`.
///
/// Internal detail is logged, never put in the body.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid email shape")]
    InvalidEmail,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("upstream delivery failed: {0}")]
    Upstream(#[from] GatewayError),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) | Self::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingFields => MSG_MISSING_FIELDS,
            Self::InvalidEmail => MSG_INVALID_EMAIL,
            Self::RateLimited => MSG_RATE_LIMITED,
            Self::Upstream(_) => MSG_UPSTREAM_FAILED,
            Self::MalformedBody(_) => MSG_INTERNAL,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
