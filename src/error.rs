//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.
//!
//! Misses and absent keys are normal outcomes and are reported as `None`
//! return values, never as errors.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and get-or-compute.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction was attempted with an unusable configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The caller-supplied value factory failed during get-or-compute
    #[error("value factory failed")]
    Factory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CacheError {
    /// Wraps a factory failure, keeping the caller's error as the source.
    pub fn factory<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CacheError::Factory(err.into())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
