// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory building model backed by a serializable document

use crate::{
    BuildingEntity, BuildingModel, Category, EntityId, InterfaceSides, ModelError, Result,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Relationship edge between entities
///
/// Mirrors the objectified IFC relationships the engine walks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationEdge {
    /// IfcRelAggregates / group assignment: whole → parts
    Decomposition {
        relating: EntityId,
        related: Vec<EntityId>,
    },
    /// IfcRelContainedInSpatialStructure: structure → elements
    Containment {
        relating: EntityId,
        related: Vec<EntityId>,
    },
    /// IfcRelVoidsElement: element → opening
    Voiding { element: EntityId, opening: EntityId },
    /// IfcRelFillsElement: opening → filling element
    Filling { opening: EntityId, element: EntityId },
    /// IfcRelSpaceBoundary: interface record between a space and an element
    Boundary {
        interface: EntityId,
        #[serde(default)]
        space: Option<EntityId>,
        #[serde(default)]
        element: Option<EntityId>,
    },
}

/// Serializable building model
///
/// This is the exchange format produced by external IFC readers:
///
/// ```json
/// {
///   "entities": [
///     {"id": 1, "category": "building", "global_id": "2O2Fr$t4X7Zf8NOew3FNr2", "name": "B1"},
///     {"id": 2, "category": "storey", "global_id": "0$3AJYd51AFAvN3gNnR1h1", "name": "S1"}
///   ],
///   "relations": [
///     {"kind": "decomposition", "relating": 1, "related": [2]}
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// All entities, in model order
    #[serde(default)]
    pub entities: Vec<BuildingEntity>,
    /// Relationship edges, in model order
    #[serde(default)]
    pub relations: Vec<RelationEdge>,
}

/// Indexed, read-only building model
///
/// Built once from a [`ModelDocument`]; every relationship walk is a hash
/// lookup.
#[derive(Debug, Default)]
pub struct InMemoryModel {
    /// Entities in model order
    entities: Vec<BuildingEntity>,
    /// Entity ID -> position in `entities`
    index: FxHashMap<u32, usize>,
    /// Category -> positions in `entities`
    by_category: FxHashMap<Category, Vec<usize>>,
    decomposition: FxHashMap<u32, Vec<EntityId>>,
    containment: FxHashMap<u32, Vec<EntityId>>,
    openings: FxHashMap<u32, Vec<EntityId>>,
    fillings: FxHashMap<u32, Vec<EntityId>>,
    /// Space -> bounding elements
    adjacency: FxHashMap<u32, Vec<EntityId>>,
    /// Interface -> sides
    interfaces: FxHashMap<u32, InterfaceSides>,
}

impl InMemoryModel {
    /// Build the model indexes from a document
    pub fn from_document(document: ModelDocument) -> Result<Self> {
        let mut model = InMemoryModel::default();

        for entity in document.entities {
            let position = model.entities.len();
            if model.index.insert(entity.id.0, position).is_some() {
                return Err(ModelError::DuplicateEntity(entity.id));
            }
            model
                .by_category
                .entry(entity.category)
                .or_default()
                .push(position);
            model.entities.push(entity);
        }

        for edge in document.relations {
            model.add_edge(edge);
        }

        Ok(model)
    }

    /// Parse a JSON model document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Read a JSON model document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: ModelDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Load a JSON model document from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Total number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn add_edge(&mut self, edge: RelationEdge) {
        match edge {
            RelationEdge::Decomposition { relating, related } => {
                self.decomposition
                    .entry(relating.0)
                    .or_default()
                    .extend(related);
            }
            RelationEdge::Containment { relating, related } => {
                self.containment
                    .entry(relating.0)
                    .or_default()
                    .extend(related);
            }
            RelationEdge::Voiding { element, opening } => {
                self.openings.entry(element.0).or_default().push(opening);
            }
            RelationEdge::Filling { opening, element } => {
                self.fillings.entry(opening.0).or_default().push(element);
            }
            RelationEdge::Boundary {
                interface,
                space,
                element,
            } => {
                if let (Some(space), Some(element)) = (space, element) {
                    self.adjacency.entry(space.0).or_default().push(element);
                }
                self.interfaces
                    .insert(interface.0, InterfaceSides { space, element });
            }
        }
    }

    fn lookup(map: &FxHashMap<u32, Vec<EntityId>>, id: EntityId) -> Vec<EntityId> {
        map.get(&id.0).cloned().unwrap_or_default()
    }
}

impl BuildingModel for InMemoryModel {
    fn entities(&self, category: Category) -> Vec<&BuildingEntity> {
        self.by_category
            .get(&category)
            .map(|positions| positions.iter().map(|&p| &self.entities[p]).collect())
            .unwrap_or_default()
    }

    fn entity(&self, id: EntityId) -> Option<&BuildingEntity> {
        self.index.get(&id.0).map(|&p| &self.entities[p])
    }

    fn decomposition(&self, id: EntityId) -> Vec<EntityId> {
        Self::lookup(&self.decomposition, id)
    }

    fn contained_elements(&self, id: EntityId) -> Vec<EntityId> {
        Self::lookup(&self.containment, id)
    }

    fn adjacent_elements(&self, space: EntityId) -> Vec<EntityId> {
        Self::lookup(&self.adjacency, space)
    }

    fn openings(&self, element: EntityId) -> Vec<EntityId> {
        Self::lookup(&self.openings, element)
    }

    fn fillings(&self, opening: EntityId) -> Vec<EntityId> {
        Self::lookup(&self.fillings, opening)
    }

    fn interface_sides(&self, interface: EntityId) -> InterfaceSides {
        self.interfaces.get(&interface.0).copied().unwrap_or_default()
    }

    fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }
}

/// Incremental builder for [`InMemoryModel`]
///
/// # Example
///
/// ```ignore
/// let model = ModelBuilder::new()
///     .entity(BuildingEntity::new(1, Category::Building).with_global_id(gid))
///     .entity(BuildingEntity::new(2, Category::Storey).with_global_id(gid2))
///     .decompose(1, [2])
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    document: ModelDocument,
}

impl ModelBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity
    pub fn entity(mut self, entity: BuildingEntity) -> Self {
        self.document.entities.push(entity);
        self
    }

    /// Add a decomposition edge (whole → parts)
    pub fn decompose(
        mut self,
        relating: u32,
        related: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.document.relations.push(RelationEdge::Decomposition {
            relating: EntityId(relating),
            related: related.into_iter().map(EntityId).collect(),
        });
        self
    }

    /// Add a containment edge (structure → elements)
    pub fn contain(
        mut self,
        relating: u32,
        related: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.document.relations.push(RelationEdge::Containment {
            relating: EntityId(relating),
            related: related.into_iter().map(EntityId).collect(),
        });
        self
    }

    /// Add an opening in an element
    pub fn void(mut self, element: u32, opening: u32) -> Self {
        self.document.relations.push(RelationEdge::Voiding {
            element: EntityId(element),
            opening: EntityId(opening),
        });
        self
    }

    /// Fill an opening with an element
    pub fn fill(mut self, opening: u32, element: u32) -> Self {
        self.document.relations.push(RelationEdge::Filling {
            opening: EntityId(opening),
            element: EntityId(element),
        });
        self
    }

    /// Add a space boundary record
    pub fn boundary(
        mut self,
        interface: u32,
        space: Option<u32>,
        element: Option<u32>,
    ) -> Self {
        self.document.relations.push(RelationEdge::Boundary {
            interface: EntityId(interface),
            space: space.map(EntityId),
            element: element.map(EntityId),
        });
        self
    }

    /// Index the document into a model
    pub fn build(self) -> Result<InMemoryModel> {
        InMemoryModel::from_document(self.document)
    }
}
