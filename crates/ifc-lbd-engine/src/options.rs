// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion settings

use crate::filter::EntityFilter;
use crate::serializer::base_uri_at;
use serde::{Deserialize, Serialize};

/// Settings for one conversion run
///
/// ```ignore
/// let options = ConversionOptions::new()
///     .with_filter(EntityFilter::excluding([Category::Interface]))
///     .with_base_uri("http://example.org/project/");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Which categories are traversed
    pub filter: EntityFilter,
    /// Whether attached property sets are expanded into attribute triples
    pub include_properties: bool,
    /// Fixed base URI; a timestamped one is generated per run when absent
    pub base_uri: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            filter: EntityFilter::all(),
            include_properties: true,
            base_uri: None,
        }
    }
}

impl ConversionOptions {
    /// Create options with every category and property sets enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entity filter
    pub fn with_filter(mut self, filter: EntityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set whether property sets are expanded
    pub fn with_properties(mut self, enabled: bool) -> Self {
        self.include_properties = enabled;
        self
    }

    /// Fix the base URI
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Base URI for a run starting now
    pub fn resolve_base_uri(&self) -> String {
        match &self.base_uri {
            Some(base) => base.clone(),
            None => base_uri_at(&chrono::Local::now()),
        }
    }
}
