// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property sets attached to building entities

use crate::AttributeValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved key carrying the property set's own entity id
///
/// Loaders that flatten property sets into plain maps often include it; it
/// is never an attribute of the owning entity.
pub const RESERVED_ID_KEY: &str = "id";

/// A named property set
///
/// Attributes keep their insertion order, which is the order they are
/// emitted in.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Property set name (e.g., "Pset_WallCommon")
    pub name: String,
    /// Attributes in this set
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeValue>,
}

impl AttributeSet {
    /// Create a new, empty property set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Add an attribute, replacing any previous value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`AttributeSet::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes, including a reserved `id` key if present
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the set has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
