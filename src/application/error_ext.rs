//! Error conversion helpers for catalog source calls
//!
//! Provides extension traits for cleaner error handling with request context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::{ApplicationError, ApplicationResult, SourceFailure};

/// Extension trait for converting source results to `ApplicationResult` with context.
pub trait SourceResultExt<T> {
    /// Add request context to a source failure.
    ///
    /// # Example
    /// ```ignore
    /// source.get_json(&url).await
    ///     .with_request_context("fetch page", &url)?;
    /// ```
    fn with_request_context(self, action: &str, url: &str) -> ApplicationResult<T>;
}

impl<T> SourceResultExt<T> for Result<T, SourceFailure> {
    fn with_request_context(self, action: &str, url: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::unavailable(format!("{}: {}", action, url), e))
    }
}

/// Decode a JSON body into a typed shape, failing closed on missing fields.
pub fn decode<T: DeserializeOwned>(body: Value, action: &str, url: &str) -> ApplicationResult<T> {
    serde_json::from_value(body).map_err(|e| {
        ApplicationError::unavailable(
            format!("{}: {}", action, url),
            SourceFailure::Malformed {
                url: url.to_string(),
                reason: e.to_string(),
            },
        )
    })
}
