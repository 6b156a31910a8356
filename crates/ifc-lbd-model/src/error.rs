// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building model loading

use crate::EntityId;
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while loading or accessing a building model
#[derive(Error, Debug)]
pub enum ModelError {
    /// Model document is not valid JSON or does not match the schema
    #[error("Invalid model document: {0}")]
    Json(#[from] serde_json::Error),

    /// The same entity id was declared twice
    #[error("Duplicate entity {0}")]
    DuplicateEntity(EntityId),

    /// A GlobalId could not be compressed or expanded
    #[error("Invalid GlobalId '{guid}': {reason}")]
    InvalidGuid { guid: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create a new GlobalId error
    pub fn invalid_guid(guid: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::InvalidGuid {
            guid: guid.into(),
            reason: reason.into(),
        }
    }
}
