// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for catalog operations.

use crate::keys::CatalogKey;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced catalog entity does not exist.
    #[error("{} not found: {0:?}", .0.kind())]
    NotFound(CatalogKey),

    /// A hole-group entry carries a malformed field.
    #[error(transparent)]
    Record(#[from] holemap_core::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the underlying record error, if this is one.
    pub fn as_record(&self) -> Option<&holemap_core::Error> {
        match self {
            Error::Record(e) => Some(e),
            _ => None,
        }
    }
}
