// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph mapping engine
//!
//! Walks the enabled categories in a fixed order and turns every entity into
//! one [`EntityBlock`]: identity triples first, then the relations declared
//! in [`RELATION_PLAN`], then the flattened attribute sets.

use crate::audit::{AuditSubject, AuditTrail};
use crate::flatten::flatten_attribute_set;
use crate::namespace::{self, class_of, props_predicate};
use crate::options::ConversionOptions;
use crate::output::write_atomic;
use crate::serializer::render_document;
use crate::triple::{EntityBlock, Literal, Object, TripleKind};
use crate::{ConvertError, Result};
use ifc_lbd_model::{guid, BuildingEntity, BuildingModel, Category, EntityId};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Relationship walk used to find the targets of a relation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    /// Aggregation sub-parts
    Decomposition,
    /// Spatial containment
    Containment,
    /// Elements bounding a space
    Adjacency,
    /// Element → opening → filling element
    Hosting,
    /// Space side of a boundary interface
    InterfaceSpace,
    /// Element side of a boundary interface
    InterfaceElement,
}

/// One relation a category emits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationRule {
    pub source: Category,
    pub predicate: &'static str,
    pub target: Category,
    pub walk: Walk,
}

impl RelationRule {
    const fn new(
        source: Category,
        predicate: &'static str,
        target: Category,
        walk: Walk,
    ) -> Self {
        Self {
            source,
            predicate,
            target,
            walk,
        }
    }
}

/// Every relation the engine emits, in per-block emission order
pub const RELATION_PLAN: [RelationRule; 10] = [
    RelationRule::new(
        Category::Site,
        namespace::HAS_BUILDING,
        Category::Building,
        Walk::Decomposition,
    ),
    RelationRule::new(
        Category::Building,
        namespace::HAS_STOREY,
        Category::Storey,
        Walk::Decomposition,
    ),
    RelationRule::new(
        Category::Storey,
        namespace::HAS_SPACE,
        Category::Space,
        Walk::Decomposition,
    ),
    RelationRule::new(
        Category::Storey,
        namespace::CONTAINS_ELEMENT,
        Category::Element,
        Walk::Containment,
    ),
    RelationRule::new(
        Category::Space,
        namespace::ADJACENT_ELEMENT,
        Category::Element,
        Walk::Adjacency,
    ),
    RelationRule::new(
        Category::Space,
        namespace::CONTAINS_ELEMENT,
        Category::Element,
        Walk::Containment,
    ),
    RelationRule::new(
        Category::Element,
        namespace::HOSTS_ELEMENT,
        Category::Element,
        Walk::Hosting,
    ),
    RelationRule::new(
        Category::Interface,
        namespace::INTERFACE_OF,
        Category::Space,
        Walk::InterfaceSpace,
    ),
    RelationRule::new(
        Category::Interface,
        namespace::INTERFACE_OF,
        Category::Element,
        Walk::InterfaceElement,
    ),
    RelationRule::new(
        Category::Zone,
        namespace::HAS_SPACE,
        Category::Space,
        Walk::Decomposition,
    ),
];

/// A relation left out of the graph because its target would not resolve
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DanglingReference {
    /// The target category is disabled, so the whole rule is skipped
    DisabledTarget {
        source: Category,
        predicate: &'static str,
        target: Category,
    },
    /// A single target is missing from the model or has the wrong category
    UnresolvedTarget {
        node: String,
        predicate: &'static str,
        target: EntityId,
        expected: Category,
    },
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingReference::DisabledTarget {
                source,
                predicate,
                target,
            } => write!(
                f,
                "{} {} skipped: {} are disabled",
                source.display_name(),
                predicate,
                target.display_name()
            ),
            DanglingReference::UnresolvedTarget {
                node,
                predicate,
                target,
                expected,
            } => write!(
                f,
                "{} {} {} dropped: not a {} in the model",
                node,
                predicate,
                target,
                expected.label()
            ),
        }
    }
}

/// Summary of a finished conversion
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionReport {
    /// Emitted nodes per category, for every traversed category
    pub nodes: BTreeMap<Category, usize>,
    pub triples: usize,
    pub audit_rows: usize,
    pub warnings: Vec<DanglingReference>,
}

impl ConversionReport {
    pub fn node_count(&self) -> usize {
        self.nodes.values().sum()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, count) in &self.nodes {
            writeln!(f, "  {:<12} {}", category.display_name(), count)?;
        }
        writeln!(f, "  {:<12} {}", "Triples", self.triples)?;
        writeln!(f, "  {:<12} {}", "Audit rows", self.audit_rows)?;
        write!(f, "  {:<12} {}", "Warnings", self.warnings.len())
    }
}

/// The emitted graph: one block per node, in traversal order
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    pub base_uri: String,
    pub blocks: Vec<EntityBlock>,
}

impl Graph {
    /// Render as a Turtle document
    pub fn to_turtle(&self) -> String {
        render_document(&self.base_uri, &self.blocks)
    }

    /// Look up a block by local node identifier
    pub fn block(&self, node: &str) -> Option<&EntityBlock> {
        self.blocks.iter().find(|b| b.node == node)
    }

    pub fn node_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn triple_count(&self) -> usize {
        self.blocks.iter().map(EntityBlock::len).sum()
    }
}

/// Result of a successful conversion run
#[derive(Clone, Debug)]
pub struct Conversion {
    pub graph: Graph,
    pub audit: AuditTrail,
    pub report: ConversionReport,
}

impl Conversion {
    pub fn to_turtle(&self) -> String {
        self.graph.to_turtle()
    }

    /// Write the Turtle document atomically
    pub fn write_turtle(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path.as_ref(), self.to_turtle().as_bytes())
    }
}

/// Accumulators for a single run
#[derive(Default)]
struct ConversionContext {
    blocks: Vec<EntityBlock>,
    audit: AuditTrail,
    warnings: Vec<DanglingReference>,
    nodes: BTreeMap<Category, usize>,
}

/// Maps a building model onto BOT triples
pub struct GraphMapper<'a, M: BuildingModel + ?Sized> {
    model: &'a M,
    options: &'a ConversionOptions,
}

impl<'a, M: BuildingModel + ?Sized> GraphMapper<'a, M> {
    pub fn new(model: &'a M, options: &'a ConversionOptions) -> Self {
        Self { model, options }
    }

    /// Run the full traversal
    pub fn run(&self) -> Result<Conversion> {
        let base_uri = self.options.resolve_base_uri();
        let mut ctx = ConversionContext::default();
        let rules = self.active_rules(&mut ctx);

        for category in self.options.filter.enabled() {
            let entities = self.model.entities(category);
            for entity in &entities {
                let block = self.map_entity(entity, &rules, &mut ctx)?;
                ctx.blocks.push(block);
            }
            ctx.nodes.insert(category, entities.len());
            log::info!("Processed {} ({} nodes)", category.display_name(), entities.len());
        }

        let graph = Graph {
            base_uri,
            blocks: ctx.blocks,
        };
        let report = ConversionReport {
            nodes: ctx.nodes,
            triples: graph.triple_count(),
            audit_rows: ctx.audit.len(),
            warnings: ctx.warnings,
        };

        Ok(Conversion {
            graph,
            audit: ctx.audit,
            report,
        })
    }

    /// Plan rules whose source is traversed, minus those whose target is not
    fn active_rules(&self, ctx: &mut ConversionContext) -> Vec<RelationRule> {
        let filter = &self.options.filter;
        let mut rules = Vec::new();
        for rule in RELATION_PLAN.iter().filter(|r| filter.is_enabled(r.source)) {
            if filter.is_enabled(rule.target) {
                rules.push(*rule);
                continue;
            }
            let warning = DanglingReference::DisabledTarget {
                source: rule.source,
                predicate: rule.predicate,
                target: rule.target,
            };
            if !ctx.warnings.contains(&warning) {
                log::warn!("{}", warning);
                ctx.warnings.push(warning);
            }
        }
        rules
    }

    fn map_entity(
        &self,
        entity: &BuildingEntity,
        rules: &[RelationRule],
        ctx: &mut ConversionContext,
    ) -> Result<EntityBlock> {
        let node = entity.node_id();
        let mut block = EntityBlock::new(node.clone(), entity.category, class_of(entity.category));

        self.push_identity(entity, &mut block)?;

        let mut seen: FxHashSet<(&'static str, EntityId)> = FxHashSet::default();
        for rule in rules.iter().filter(|r| r.source == entity.category) {
            for target in self.walk(entity.id, rule.walk) {
                if !seen.insert((rule.predicate, target)) {
                    continue;
                }
                match self.model.entity(target) {
                    Some(t) if t.category == rule.target => {
                        block.push(
                            TripleKind::Relation,
                            rule.predicate,
                            Object::Node(t.node_id()),
                        );
                    }
                    _ => {
                        let warning = DanglingReference::UnresolvedTarget {
                            node: node.clone(),
                            predicate: rule.predicate,
                            target,
                            expected: rule.target,
                        };
                        log::warn!("{}", warning);
                        ctx.warnings.push(warning);
                    }
                }
            }
        }

        if self.options.include_properties {
            let subject = AuditSubject::from_entity(entity);
            for set in self.model.attribute_sets(entity.id) {
                for attribute in flatten_attribute_set(set) {
                    block.push(
                        TripleKind::Attribute,
                        props_predicate(&attribute.name),
                        Object::Literal(attribute.literal.clone()),
                    );
                    ctx.audit.record(&subject, &attribute);
                }
            }
        }

        Ok(block)
    }

    fn push_identity(&self, entity: &BuildingEntity, block: &mut EntityBlock) -> Result<()> {
        let compact = entity
            .global_id
            .as_deref()
            .filter(|g| !g.is_empty())
            .ok_or_else(|| ConvertError::data_integrity(&block.node, "missing GlobalId"))?;
        let expanded = guid::expand(compact)
            .map_err(|e| ConvertError::data_integrity(&block.node, e.to_string()))?;

        if let Some(name) = entity.name.as_deref().filter(|n| !n.is_empty()) {
            block.push(
                TripleKind::Identity,
                namespace::RDFS_LABEL,
                Object::Literal(Literal::string(name)),
            );
        }
        if let Some(description) = entity.description.as_deref().filter(|d| !d.is_empty()) {
            block.push(
                TripleKind::Identity,
                namespace::RDFS_COMMENT,
                Object::Literal(Literal::string(description)),
            );
        }
        block.push(
            TripleKind::Identity,
            namespace::HAS_GUID,
            Object::Literal(Literal::string(expanded)),
        );
        block.push(
            TripleKind::Identity,
            namespace::HAS_COMPRESSED_GUID,
            Object::Literal(Literal::string(compact)),
        );
        Ok(())
    }

    fn walk(&self, id: EntityId, walk: Walk) -> Vec<EntityId> {
        match walk {
            Walk::Decomposition => self.model.decomposition(id),
            Walk::Containment => self.model.contained_elements(id),
            Walk::Adjacency => self.model.adjacent_elements(id),
            Walk::Hosting => self.model.hosted_elements(id),
            Walk::InterfaceSpace => self.model.interface_sides(id).space.into_iter().collect(),
            Walk::InterfaceElement => self.model.interface_sides(id).element.into_iter().collect(),
        }
    }
}

/// Convert a building model into a BOT graph and audit trail
///
/// Either the whole model converts or nothing is returned.
pub fn convert<M: BuildingModel + ?Sized>(
    model: &M,
    options: &ConversionOptions,
) -> Result<Conversion> {
    GraphMapper::new(model, options).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::EntityFilter;
    use ifc_lbd_model::{BuildingEntity, ModelBuilder};

    const GUID_A: &str = "0$3AJYd51AFAvN3gNnR1h1";
    const GUID_B: &str = "2O2Fr$t4X7Zf8NOew3FNr2";

    fn options() -> ConversionOptions {
        ConversionOptions::new().with_base_uri("http://example.org/test/")
    }

    #[test]
    fn test_relation_plan_covers_every_category() {
        for category in Category::ALL {
            assert!(RELATION_PLAN.iter().any(|r| r.source == category));
        }
    }

    #[test]
    fn test_identity_order() {
        let model = ModelBuilder::new()
            .entity(
                BuildingEntity::new(1, Category::Site)
                    .with_global_id(GUID_A)
                    .with_name("Campus")
                    .with_description("North"),
            )
            .build()
            .unwrap();

        let conversion = convert(&model, &options()).unwrap();
        let block = conversion.graph.block("site_1").unwrap();
        let predicates: Vec<&str> = block.triples.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(
            predicates,
            vec!["a", "rdfs:label", "rdfs:comment", "bot:hasGuid", "props:hasCompressedGuid"]
        );
    }

    #[test]
    fn test_wrong_category_target_dropped() {
        let model = ModelBuilder::new()
            .entity(BuildingEntity::new(1, Category::Site).with_global_id(GUID_A))
            .entity(BuildingEntity::new(2, Category::Storey).with_global_id(GUID_B))
            .decompose(1, [2])
            .build()
            .unwrap();

        let conversion = convert(&model, &options()).unwrap();
        let site = conversion.graph.block("site_1").unwrap();
        assert_eq!(site.with_predicate("bot:hasBuilding").count(), 0);
        assert_eq!(
            conversion.report.warnings,
            vec![DanglingReference::UnresolvedTarget {
                node: "site_1".to_string(),
                predicate: "bot:hasBuilding",
                target: EntityId(2),
                expected: Category::Building,
            }]
        );
    }

    #[test]
    fn test_disabled_target_warned_once() {
        let model = ModelBuilder::new()
            .entity(BuildingEntity::new(1, Category::Storey).with_global_id(GUID_A))
            .entity(BuildingEntity::new(2, Category::Storey).with_global_id(GUID_B))
            .build()
            .unwrap();
        let options = options().with_filter(EntityFilter::none().with(Category::Storey, true));

        let conversion = convert(&model, &options).unwrap();
        assert_eq!(
            conversion.report.warnings,
            vec![
                DanglingReference::DisabledTarget {
                    source: Category::Storey,
                    predicate: "bot:hasSpace",
                    target: Category::Space,
                },
                DanglingReference::DisabledTarget {
                    source: Category::Storey,
                    predicate: "bot:containsElement",
                    target: Category::Element,
                },
            ]
        );
        assert_eq!(conversion.report.nodes.get(&Category::Storey), Some(&2));
        assert_eq!(conversion.report.nodes.get(&Category::Site), None);
    }

    #[test]
    fn test_properties_disabled() {
        let model = ModelBuilder::new()
            .entity(
                BuildingEntity::new(1, Category::Space)
                    .with_global_id(GUID_A)
                    .with_attribute_set(
                        ifc_lbd_model::AttributeSet::new("Pset").with("Area", 12.5),
                    ),
            )
            .build()
            .unwrap();

        let conversion = convert(&model, &options().with_properties(false)).unwrap();
        assert!(conversion.audit.is_empty());
        assert_eq!(conversion.graph.triple_count(), 3);
    }
}
