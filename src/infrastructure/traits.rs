//! I/O boundary traits for testability
//!
//! The catalog source abstracts the remote REST service, allowing services
//! to be tested with in-memory implementations.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::SourceFailure;

/// Read-only access to the remote catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// GET `url` and return the decoded JSON body.
    ///
    /// Transport errors, non-success statuses, and undecodable bodies are
    /// reported as `SourceFailure`; no retry is attempted.
    async fn get_json(&self, url: &str) -> Result<Value, SourceFailure>;
}

pub type SharedSource = Arc<dyn CatalogSource>;
