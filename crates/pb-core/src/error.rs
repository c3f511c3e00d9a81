//! Suite-wide error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `BenchError` via `From` impls, or keep them separate and wrap `BenchError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `pb-core` and a common base for sub-crates.
///
/// Everything here is fatal at construction time.  There is deliberately no
/// recoverable-error variant for handler bodies: a failure mid-dispatch is a
/// programming defect and is allowed to propagate as a panic/abort.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown benchmark variant: {0:?}")]
    UnknownVariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `pb-*` crates.
pub type BenchResult<T> = Result<T, BenchError>;
