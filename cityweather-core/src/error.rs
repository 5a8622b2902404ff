//! Typed outcome of every outbound lookup.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("{service} request failed: {reason}")]
    Network { service: &'static str, reason: String },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {service} response: {reason}")]
    Parse { service: &'static str, reason: String },

    #[error("{service} has no results for '{query}'")]
    NotFound { service: &'static str, query: String },
}

impl LookupError {
    pub(crate) fn network(service: &'static str, err: reqwest::Error) -> Self {
        Self::Network {
            service,
            reason: err.to_string(),
        }
    }

    /// The task running the lookup panicked or was cancelled.
    pub(crate) fn task_failed(service: &'static str, err: tokio::task::JoinError) -> Self {
        Self::Network {
            service,
            reason: format!("lookup task failed: {err}"),
        }
    }

    pub(crate) fn parse(service: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            service,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(service: &'static str, query: &str) -> Self {
        Self::NotFound {
            service,
            query: query.to_string(),
        }
    }

    /// Short, non-technical message for the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "Network error. Check your connection and try again.".to_string(),
            Self::Status { status, .. } if *status == 401 => {
                "The weather service rejected the API key. Run `cityweather configure`.".to_string()
            }
            Self::Status { service, status, .. } => {
                format!("{service} is unavailable right now (HTTP {status}).")
            }
            Self::Parse { service, .. } => format!("{service} sent a response we could not read."),
            Self::NotFound { query, .. } => format!("Could not find '{query}'."),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
