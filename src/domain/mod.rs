//! Domain layer: entities and listing logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod filter;
pub mod lineage;

pub use entities::*;
pub use error::DomainError;
pub use filter::{filter_by_name, MaxResults, SearchQuery};
pub use lineage::{flatten, LineageArena, LineageEntry, LineageNode};
