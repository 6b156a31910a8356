// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-LBD Model - Building model types and access traits
//!
//! This crate provides the read-only view of a parsed building model that the
//! Linked Building Data engine consumes. It defines the entity categories, the
//! attribute sets attached to entities, the relationship edges between them
//! and the [`BuildingModel`] trait that any model loader implements.
//!
//! # Architecture
//!
//! - [`BuildingModel`] - Typed entity collections and relationship walks
//! - [`InMemoryModel`] - Indexed implementation backed by a [`ModelDocument`]
//! - [`guid`] - IFC GlobalId compression and expansion
//!
//! # Example
//!
//! ```ignore
//! use ifc_lbd_model::{BuildingModel, Category, InMemoryModel};
//!
//! let model = InMemoryModel::from_json(json)?;
//! for storey in model.entities(Category::Storey) {
//!     println!("{} contains {:?}", storey.id, model.contained_elements(storey.id));
//! }
//! ```

pub mod error;
pub mod guid;
pub mod memory;
pub mod properties;
pub mod traits;
pub mod types;

pub use error::*;
pub use memory::*;
pub use properties::*;
pub use traits::*;
pub use types::*;
