//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Why the catalog source could not answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl SourceFailure {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceFailure::Status { status: 404, .. })
    }
}

/// Application errors wrap domain errors and add source-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("catalog source unavailable: {context}")]
    SourceUnavailable {
        context: String,
        #[source]
        source: SourceFailure,
    },

    #[error("no entry found: {0}")]
    NotFound(String),

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn unavailable(context: impl Into<String>, source: SourceFailure) -> Self {
        Self::SourceUnavailable {
            context: context.into(),
            source,
        }
    }

    /// Transport, status, and malformed-body failures all count as unavailable.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, ApplicationError::SourceUnavailable { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ApplicationError::SourceUnavailable {
                source: SourceFailure::Malformed { .. },
                ..
            }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
