//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on the catalog source trait.

pub mod error;
pub mod error_ext;
pub mod services;
pub mod wire;

pub use error::{ApplicationError, ApplicationResult, SourceFailure};
pub use error_ext::{decode, SourceResultExt};
