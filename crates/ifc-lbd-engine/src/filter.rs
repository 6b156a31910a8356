// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-category traversal switches

use ifc_lbd_model::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decides which entity categories are traversed at all
///
/// Defaults to every category enabled. Deserializes from a map such as
/// `{"interfaces": false}`; missing keys stay enabled and unknown keys are
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFilter {
    pub sites: bool,
    pub buildings: bool,
    pub storeys: bool,
    pub spaces: bool,
    pub elements: bool,
    pub interfaces: bool,
    pub zones: bool,
}

impl Default for EntityFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl EntityFilter {
    /// Every category enabled
    pub fn all() -> Self {
        Self {
            sites: true,
            buildings: true,
            storeys: true,
            spaces: true,
            elements: true,
            interfaces: true,
            zones: true,
        }
    }

    /// Every category disabled
    pub fn none() -> Self {
        Self {
            sites: false,
            buildings: false,
            storeys: false,
            spaces: false,
            elements: false,
            interfaces: false,
            zones: false,
        }
    }

    fn flag_mut(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Site => &mut self.sites,
            Category::Building => &mut self.buildings,
            Category::Storey => &mut self.storeys,
            Category::Space => &mut self.spaces,
            Category::Element => &mut self.elements,
            Category::Interface => &mut self.interfaces,
            Category::Zone => &mut self.zones,
        }
    }

    /// Enable or disable one category
    pub fn set(&mut self, category: Category, enabled: bool) {
        *self.flag_mut(category) = enabled;
    }

    /// Builder-style variant of [`EntityFilter::set`]
    pub fn with(mut self, category: Category, enabled: bool) -> Self {
        self.set(category, enabled);
        self
    }

    /// Check whether a category is traversed
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Site => self.sites,
            Category::Building => self.buildings,
            Category::Storey => self.storeys,
            Category::Space => self.spaces,
            Category::Element => self.elements,
            Category::Interface => self.interfaces,
            Category::Zone => self.zones,
        }
    }

    /// Enabled categories in traversal order
    pub fn enabled(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |c| self.is_enabled(*c))
    }

    /// Build from a key → flag map (`"sites"`, `"buildings"`, ...)
    ///
    /// Unknown keys are ignored.
    pub fn from_map<'a>(flags: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut filter = Self::all();
        for (key, enabled) in flags {
            match Category::ALL.into_iter().find(|c| c.filter_key() == key) {
                Some(category) => filter.set(category, enabled),
                None => log::debug!("Ignoring unknown entity filter key '{}'", key),
            }
        }
        filter
    }

    /// Every category enabled except the given ones
    pub fn excluding(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut filter = Self::all();
        for category in categories {
            filter.set(category, false);
        }
        filter
    }

    /// Flags as a key → flag map
    pub fn to_map(&self) -> HashMap<&'static str, bool> {
        Category::ALL
            .into_iter()
            .map(|c| (c.filter_key(), self.is_enabled(c)))
            .collect()
    }
}
