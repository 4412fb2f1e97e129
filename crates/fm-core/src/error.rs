//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FmError` as one variant
//! where configuration problems can surface through them.

use thiserror::Error;

/// The top-level error type for `fm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fm-*` crates.
pub type FmResult<T> = Result<T, FmError>;
