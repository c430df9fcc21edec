// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for malformed job records.
//!
//! Every variant describes a problem confined to a single hole-group entry
//! (or a single job). Callers report it and move on to the next entry.

/// Result type alias for record and geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while interpreting a job record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The hole-group position format tag is not one we know how to read.
    #[error("unknown position format: {0:?}")]
    UnknownPositionFormat(String),

    /// Shape masks are positive digit strings.
    #[error("invalid shape mask: {0}")]
    InvalidShapeMask(i64),

    /// The raw position list does not split into whole records.
    #[error("position list of length {len} does not fit format {format}")]
    MalformedPositions { format: &'static str, len: usize },

    /// A home matrix must carry exactly 16 values.
    #[error("home matrix has {0} values, expected 16")]
    InvalidHomeMatrix(usize),

    /// A field the core cannot do without is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A hole cross-section needs at least one segment.
    #[error("hole cross-section has no segments")]
    EmptyShape,

    /// The record does not deserialize into the expected structure.
    #[error("malformed record: {0}")]
    InvalidRecord(String),
}
