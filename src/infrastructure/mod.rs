//! Infrastructure layer: HTTP source implementation and DI container
//!
//! This layer implements the catalog source trait and wires up services.

pub mod di;
pub mod error;
pub mod http;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use http::HttpCatalogSource;
pub use traits::{CatalogSource, SharedSource};
