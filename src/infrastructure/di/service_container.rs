//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::CatalogService;
use crate::config::Settings;
use crate::infrastructure::http::HttpCatalogSource;
use crate::infrastructure::traits::SharedSource;
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Remote catalog abstraction
    pub source: SharedSource,

    /// Listing, search, detail, and lineage operations
    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with the real HTTP source.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let source = Arc::new(HttpCatalogSource::new(&settings)?);
        Ok(Self::with_deps(settings, source))
    }

    /// Create a service container with a custom source (for testing).
    pub fn with_deps(settings: Settings, source: SharedSource) -> Self {
        let settings = Arc::new(settings);
        let catalog = CatalogService::new(Arc::clone(&source), Arc::clone(&settings));

        Self {
            settings,
            source,
            catalog,
        }
    }
}
