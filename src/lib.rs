//! Catalog browser library: paged listing, name search, and lineage flattening
//! over a read-only REST catalog.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
