use super::error::RelayError;
use super::RelayState;
use crate::gateway::EmailMessage;
use crate::sanitize::{
    sanitize_email, sanitize_message, sanitize_message_within, sanitize_name, sanitize_phone,
    SUMMARY_MAX_LEN,
};
use crate::state::NOT_PROVIDED;
use crate::validate::is_valid_email;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

pub const MSG_SENT: &str = "Email enviado com sucesso";

/// Body of `POST /api/send-email`
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
}

impl SendEmailRequest {
    /// Sanitize every field, then apply the required and shape checks.
    pub fn into_message(self) -> Result<EmailMessage, RelayError> {
        let field = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();
        let name = sanitize_name(&field(&self.name));
        let email = sanitize_email(&field(&self.email));
        let message = sanitize_message_within(&field(&self.message), SUMMARY_MAX_LEN);
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(RelayError::MissingFields);
        }
        if !is_valid_email(&email) {
            return Err(RelayError::InvalidEmail);
        }
        let phone = match sanitize_phone(&field(&self.phone)) {
            p if p.is_empty() => NOT_PROVIDED.to_string(),
            p => p,
        };
        let timestamp = match sanitize_message(&field(&self.timestamp)) {
            t if t.is_empty() => now_iso(),
            t => t,
        };
        Ok(EmailMessage {
            name,
            email,
            phone,
            message,
            timestamp,
        })
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) async fn send_email(
    State(state): State<RelayState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let request = match payload {
        Ok(Json(request)) => request,
        // Without a JSON content type the body is simply absent.
        Err(JsonRejection::MissingJsonContentType(_)) => SendEmailRequest::default(),
        Err(rejection) => {
            error!("Unreadable request body: {rejection}");
            return Err(RelayError::MalformedBody(rejection.body_text()));
        }
    };
    let message = request.into_message()?;

    match state.gateway.send_email(&message).await {
        Ok(receipt) => {
            info!(status = receipt.status, "Email enviado com sucesso");
            Ok(Json(json!({ "success": true, "message": MSG_SENT })))
        }
        Err(e) => {
            error!(gateway = state.gateway.name(), "Erro ao enviar email: {e}");
            Err(RelayError::Upstream(e))
        }
    }
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": now_iso() }))
}
