//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Only construction and the fallback path can fail; every other operation
/// is total, with missing, expired and empty reported as ordinary absent
/// outcomes rather than errors.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction was attempted with a zero capacity
    #[error("cache capacity must be greater than zero")]
    InvalidCapacity,

    /// The fallback loader failed; its error is passed through unchanged
    #[error(transparent)]
    Fallback(#[from] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
