//! Read-only submission snapshot

use crate::gateway::EmailMessage;
use crate::sanitize::{sanitize_message_within, SUMMARY_MAX_LEN};
use crate::state::{Answers, DIAGNOSTIC_STEPS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Placeholder for fields the user never answered
pub const NOT_PROVIDED: &str = "Não informado";
/// Origin marker attached to every diagnostic submission
pub const ORIGIN: &str = "diagnostico-tui";

/// Snapshot of a finished diagnostic, built once at submission time.
///
/// Every step key is present; unanswered ones carry [`NOT_PROVIDED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub submission_id: Uuid,
    pub fields: BTreeMap<String, String>,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    /// Seconds between the first render and submission
    pub time_spent: i64,
    pub origin: String,
}

impl SubmissionPayload {
    pub fn build(answers: &Answers, started_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let fields = DIAGNOSTIC_STEPS
            .iter()
            .map(|step| {
                let value = answers
                    .get(step.key)
                    .map(|a| a.display())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| NOT_PROVIDED.to_string());
                (step.key.to_string(), value)
            })
            .collect();
        Self {
            submission_id: Uuid::new_v4(),
            fields,
            started_at,
            submitted_at: now,
            time_spent: (now - started_at).num_seconds().max(0),
            origin: ORIGIN.to_string(),
        }
    }

    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map_or(NOT_PROVIDED, String::as_str)
    }

    /// `pergunta: resposta` lines in step order, plus the timing footer.
    ///
    /// Already in the shape the relay forwards, so it arrives unchanged.
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = DIAGNOSTIC_STEPS
            .iter()
            .map(|step| format!("{}: {}", step.prompt, self.field(step.key)))
            .collect();
        lines.push(String::new());
        lines.push(format!("Tempo de preenchimento: {}s", self.time_spent));
        lines.push(format!("Origem: {}", self.origin));
        sanitize_message_within(&lines.join("\n"), SUMMARY_MAX_LEN)
    }

    /// Map onto the gateway's message shape
    pub fn to_email_message(&self) -> EmailMessage {
        EmailMessage {
            name: self.field("nome").to_string(),
            email: self.field("email").to_string(),
            phone: self.field("whatsapp").to_string(),
            message: self.summary(),
            timestamp: self.submitted_at.to_rfc3339(),
        }
    }
}
