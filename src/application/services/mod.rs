//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the catalog source trait but are themselves concrete
//! structs, not traits.

mod browse;
mod catalog;
mod debounce;

pub use browse::{BrowseSession, LoadOutcome};
pub use catalog::CatalogService;
pub use debounce::SearchDebouncer;
