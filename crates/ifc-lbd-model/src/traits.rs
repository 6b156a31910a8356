// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for building model access
//!
//! These traits define the read-only view the conversion engine has of a
//! building model. Loaders (IFC readers, JSON documents, test fixtures)
//! implement them; the engine never mutates the model.

use crate::{AttributeSet, BuildingEntity, Category, EntityId};

/// Both sides of a space boundary record
///
/// Either side may be absent in real models (virtual boundaries, boundaries
/// toward the outside).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterfaceSides {
    /// The bounded space
    pub space: Option<EntityId>,
    /// The bounding element
    pub element: Option<EntityId>,
}

/// Read-only access to a building model
///
/// Relationship walks return targets in the relationship's natural iteration
/// order, which is the order relation triples are emitted in.
///
/// # Example
///
/// ```ignore
/// use ifc_lbd_model::{BuildingModel, Category};
///
/// fn list_storeys(model: &dyn BuildingModel) {
///     for storey in model.entities(Category::Storey) {
///         println!("{}: {} spaces, {} elements",
///             storey.display_name(),
///             model.decomposition(storey.id).len(),
///             model.contained_elements(storey.id).len());
///     }
/// }
/// ```
pub trait BuildingModel {
    /// Get all entities of a category, in model order
    fn entities(&self, category: Category) -> Vec<&BuildingEntity>;

    /// Get an entity by ID
    fn entity(&self, id: EntityId) -> Option<&BuildingEntity>;

    /// Sub-parts of an entity (Site→Building, Building→Storey,
    /// Storey→Space, Zone→Space)
    fn decomposition(&self, id: EntityId) -> Vec<EntityId>;

    /// Elements physically contained in a storey or space
    fn contained_elements(&self, id: EntityId) -> Vec<EntityId>;

    /// Elements bounding a space
    ///
    /// Derived from the space's boundary records that name an element.
    fn adjacent_elements(&self, space: EntityId) -> Vec<EntityId>;

    /// Openings voiding an element
    fn openings(&self, element: EntityId) -> Vec<EntityId>;

    /// Elements filling an opening
    fn fillings(&self, opening: EntityId) -> Vec<EntityId>;

    /// Both sides of a boundary interface
    fn interface_sides(&self, interface: EntityId) -> InterfaceSides;

    /// Property sets attached to an entity
    fn attribute_sets(&self, id: EntityId) -> &[AttributeSet] {
        self.entity(id)
            .map(|e| e.attribute_sets.as_slice())
            .unwrap_or(&[])
    }

    /// Elements hosted by an element through its openings
    ///
    /// Walks element → opening → filling element. May contain repeats when
    /// several openings share a filling.
    fn hosted_elements(&self, element: EntityId) -> Vec<EntityId> {
        self.openings(element)
            .into_iter()
            .flat_map(|opening| self.fillings(opening))
            .collect()
    }

    /// Count entities of a category
    fn count(&self, category: Category) -> usize {
        self.entities(category).len()
    }
}
