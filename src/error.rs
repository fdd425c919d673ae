//! Domain-specific error types for the Studio client library.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Every module returns typed errors; callers embedding the library in an
//! application can aggregate them through [`StudioError`] or convert them
//! to their own error type via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! StudioError
//! ├── Flag(FlagError)       — override key/value decoding, JSON shape
//! ├── Version(VersionError) — version number construction
//! └── Branch(BranchError)   — branch name resolution
//! ```
//!
//! Note that deployment log parsing is total and has no error type of its
//! own: unparseable sub-events are dropped and reported through
//! [`crate::deploy::DeploymentHistory::dropped`].

use thiserror::Error;

/// Top-level error type for the Studio client library.
#[derive(Error, Debug)]
pub enum StudioError {
    /// Flag codec error (filter format, override file JSON).
    #[error("Flag error: {0}")]
    Flag(#[from] FlagError),

    /// Version number construction error (arity, component format).
    #[error("Version number error: {0}")]
    Version(#[from] VersionError),

    /// Branch resolution error (unknown branch name).
    #[error("Branch error: {0}")]
    Branch(#[from] BranchError),
}

/// Errors that arise from decoding flag overrides.
///
/// Unrecognized key prefixes and infixes are *not* errors — the codec
/// degrades to an untyped descriptor instead. Only a recognized filter
/// suffix with a malformed value list, or a malformed override file,
/// produce a `FlagError`.
#[derive(Error, Debug)]
pub enum FlagError {
    /// A key carries a filter suffix but its value has no filter segments.
    #[error("flag '{key}' has a filter suffix but no filter values")]
    EmptyFilter {
        /// The raw override key.
        key: String,
    },

    /// A filter segment could not be parsed as an integer.
    #[error("flag '{key}' has a non-integer filter value '{value}'")]
    InvalidFilterValue {
        /// The raw override key.
        key: String,
        /// The offending filter segment.
        value: String,
    },

    /// The override file is not valid JSON.
    #[error("invalid override file JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The override file's JSON root is not an object.
    #[error("override file root is not a JSON object")]
    NotAnObject,
}

/// Errors that arise from constructing a [`crate::version::VersionNumber`].
#[derive(Error, Debug)]
pub enum VersionError {
    /// The input did not contain exactly 4 components.
    #[error("expected 4 version components, found {0}")]
    WrongArity(usize),

    /// A component was not a non-negative integer.
    #[error("invalid version component '{0}'")]
    InvalidComponent(String),
}

/// Errors that arise from resolving deployment branches.
#[derive(Error, Debug)]
pub enum BranchError {
    /// The name does not match any known branch.
    #[error("unknown branch '{0}'")]
    Unknown(String),
}
