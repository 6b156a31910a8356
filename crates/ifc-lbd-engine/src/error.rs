// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for conversion runs

use ifc_lbd_model::ModelError;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort a conversion
///
/// Attribute shape anomalies are never errors; they end up in the audit
/// trail instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// An entity lacks a required identity field
    #[error("Data integrity error at {node}: {reason}")]
    DataIntegrity { node: String, reason: String },

    /// Model could not be loaded or accessed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audit table could not be encoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Temporary output could not be moved into place
    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ConvertError {
    /// Create a new data integrity error
    pub fn data_integrity(node: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvertError::DataIntegrity {
            node: node.into(),
            reason: reason.into(),
        }
    }
}
