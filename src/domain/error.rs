//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of listing invariants.
/// These are independent of transport concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("non-contiguous page: expected offset {expected}, got {actual}")]
    NonContiguousPage { expected: u32, actual: u32 },

    #[error("page limit must be greater than zero")]
    InvalidLimit,

    #[error("page at offset {offset} with limit {limit} exceeds the id range")]
    OffsetOverflow { offset: u32, limit: u32 },

    #[error("invalid entry id: {0}")]
    InvalidId(String),
}
