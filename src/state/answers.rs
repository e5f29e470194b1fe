//! Committed answers of a wizard session

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A committed, sanitized answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::Choices(_) => None,
        }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            Answer::Choices(c) => c,
            Answer::Text(_) => &[],
        }
    }

    /// Human-readable rendering used in summaries
    pub fn display(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::Choices(c) => c.join(", "),
        }
    }
}

/// Field key to answer. Keys are unique; order is irrelevant.
pub type Answers = BTreeMap<String, Answer>;
