// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for building model representation
//!
//! This module defines the entities, categories and attribute values that a
//! model loader hands to the conversion engine.

use crate::AttributeSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Entity category
///
/// Every entity the engine can emit belongs to exactly one category. The
/// declaration order of the variants is the traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// IfcSite - geographic site
    Site,
    /// IfcBuilding - a building structure
    Building,
    /// IfcBuildingStorey - a floor/level
    Storey,
    /// IfcSpace - a room or area
    Space,
    /// IfcElement and subtypes (wall, door, etc.)
    Element,
    /// IfcRelSpaceBoundary - boundary between a space and an element
    Interface,
    /// IfcZone - a group of spaces
    Zone,
}

impl Category {
    /// All categories in traversal order
    pub const ALL: [Category; 7] = [
        Category::Site,
        Category::Building,
        Category::Storey,
        Category::Space,
        Category::Element,
        Category::Interface,
        Category::Zone,
    ];

    /// Key used by entity filters (e.g. "sites")
    pub fn filter_key(&self) -> &'static str {
        match self {
            Category::Site => "sites",
            Category::Building => "buildings",
            Category::Storey => "storeys",
            Category::Space => "spaces",
            Category::Element => "elements",
            Category::Interface => "interfaces",
            Category::Zone => "zones",
        }
    }

    /// Prefix of the local node identifier (e.g. "site" in `site_42`)
    pub fn node_prefix(&self) -> &'static str {
        match self {
            Category::Site => "site",
            Category::Building => "building",
            Category::Storey => "storey",
            Category::Space => "space",
            Category::Element => "element",
            Category::Interface => "interface",
            Category::Zone => "zone",
        }
    }

    /// Singular label used in audit rows
    pub fn label(&self) -> &'static str {
        match self {
            Category::Site => "Site",
            Category::Building => "Building",
            Category::Storey => "Storey",
            Category::Space => "Space",
            Category::Element => "Element",
            Category::Interface => "Interface",
            Category::Zone => "Zone",
        }
    }

    /// Plural display name for progress reporting
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Site => "Sites",
            Category::Building => "Buildings",
            Category::Storey => "Storeys",
            Category::Space => "Spaces",
            Category::Element => "Elements",
            Category::Interface => "Interfaces",
            Category::Zone => "Zones",
        }
    }

    /// Local node identifier for an entity of this category
    pub fn node_id(&self, id: EntityId) -> String {
        format!("{}_{}", self.node_prefix(), id.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the filter key, the node prefix or the label, case-insensitively
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.filter_key() == needle || c.node_prefix() == needle)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Attribute value as read from a property set
///
/// Deserializes from plain JSON scalars and arrays, so attribute maps can be
/// written as `{"Height": 200.0, "IsExternal": true}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Double(f64),
    /// Text value
    Text(String),
    /// List of values (enumerated or list properties)
    List(Vec<AttributeValue>),
    /// Missing value
    #[default]
    Null,
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Double(d) => f.write_str(&format_double(*d)),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            AttributeValue::Null => Ok(()),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Double(f)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

/// Format a double so it always reads as a floating point number
///
/// Integral values keep a trailing `.0` (`200.0`), non-finite values use the
/// XML Schema spellings `NaN`, `INF` and `-INF`.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Building model entity
///
/// Holds the identity fields shared by every category plus the attribute
/// sets attached to the entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity category
    pub category: Category,
    /// Compressed 22-character IFC GlobalId
    #[serde(default)]
    pub global_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Concrete IFC class (e.g. "IfcWall")
    #[serde(default)]
    pub ifc_class: Option<String>,
    /// Attached property sets
    #[serde(default)]
    pub attribute_sets: Vec<AttributeSet>,
}

impl BuildingEntity {
    /// Create a new entity without identity fields
    pub fn new(id: u32, category: Category) -> Self {
        Self {
            id: EntityId(id),
            category,
            global_id: None,
            name: None,
            description: None,
            ifc_class: None,
            attribute_sets: Vec::new(),
        }
    }

    /// Set the compressed GlobalId
    pub fn with_global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the concrete IFC class
    pub fn with_ifc_class(mut self, ifc_class: impl Into<String>) -> Self {
        self.ifc_class = Some(ifc_class.into());
        self
    }

    /// Attach a property set
    pub fn with_attribute_set(mut self, set: AttributeSet) -> Self {
        self.attribute_sets.push(set);
        self
    }

    /// Name, or the empty string when absent
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Local node identifier (e.g. `element_42`)
    pub fn node_id(&self) -> String {
        self.category.node_id(self.id)
    }

    /// Type label used in audit rows
    ///
    /// Elements report their concrete IFC class, all other categories their
    /// category label.
    pub fn type_label(&self) -> &str {
        match (&self.category, &self.ifc_class) {
            (Category::Element, Some(class)) if !class.is_empty() => class,
            _ => self.category.label(),
        }
    }
}
