// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed triple records built during traversal
//!
//! The engine never writes Turtle directly; it produces these records and
//! the serializer renders them.

use ifc_lbd_model::Category;

/// Datatype of a literal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XsdType {
    Boolean,
    Int,
    Double,
    String,
}

impl XsdType {
    /// Turtle datatype suffix (e.g. `^^xsd:int`)
    pub fn suffix(&self) -> &'static str {
        match self {
            XsdType::Boolean => "^^xsd:boolean",
            XsdType::Int => "^^xsd:int",
            XsdType::Double => "^^xsd:double",
            XsdType::String => "^^xsd:string",
        }
    }

    /// Type tag reported in audit rows
    pub fn audit_tag(&self) -> &'static str {
        match self {
            XsdType::Boolean => "boolean",
            XsdType::Int => "integer",
            XsdType::Double => "double",
            XsdType::String => "string",
        }
    }

    /// Whether units are inferred for this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, XsdType::Int | XsdType::Double)
    }
}

/// Typed literal; the lexical form is stored unescaped
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub lexical: String,
    pub datatype: XsdType,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: XsdType) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }

    pub fn string(lexical: impl Into<String>) -> Self {
        Self::new(lexical, XsdType::String)
    }
}

/// Object position of a triple
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    /// Ontology class (e.g. `bot:Storey`)
    Class(&'static str),
    /// Another instance node, by local identifier (e.g. `storey_3`)
    Node(String),
    /// Literal value
    Literal(Literal),
}

/// Position of a triple within its entity block
///
/// Blocks are always ordered identity → relation → attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TripleKind {
    Identity,
    Relation,
    Attribute,
}

/// A single statement about an entity node
#[derive(Clone, Debug, PartialEq)]
pub struct Triple {
    /// Local node identifier of the subject
    pub subject: String,
    /// Prefixed predicate, or `a` for the type statement
    pub predicate: String,
    pub object: Object,
    pub kind: TripleKind,
}

/// All triples about one entity, in emission order
#[derive(Clone, Debug, PartialEq)]
pub struct EntityBlock {
    /// Local node identifier (e.g. `site_42`)
    pub node: String,
    pub category: Category,
    pub triples: Vec<Triple>,
}

impl EntityBlock {
    /// Start a block with its type statement
    pub fn new(node: impl Into<String>, category: Category, class: &'static str) -> Self {
        let node = node.into();
        let mut block = Self {
            node,
            category,
            triples: Vec::new(),
        };
        block.push(TripleKind::Identity, "a", Object::Class(class));
        block
    }

    /// Append a statement
    pub fn push(&mut self, kind: TripleKind, predicate: impl Into<String>, object: Object) {
        self.triples.push(Triple {
            subject: self.node.clone(),
            predicate: predicate.into(),
            object,
            kind,
        });
    }

    /// Statements with a given predicate
    pub fn with_predicate<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| t.predicate == predicate)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_starts_with_type() {
        let block = EntityBlock::new("site_1", Category::Site, "bot:Site");
        assert_eq!(block.len(), 1);
        assert_eq!(block.triples[0].predicate, "a");
        assert_eq!(block.triples[0].object, Object::Class("bot:Site"));
        assert_eq!(block.triples[0].subject, "site_1");
    }

    #[test]
    fn test_kind_ordering() {
        assert!(TripleKind::Identity < TripleKind::Relation);
        assert!(TripleKind::Relation < TripleKind::Attribute);
    }

    #[test]
    fn test_xsd_tags() {
        assert_eq!(XsdType::Int.suffix(), "^^xsd:int");
        assert_eq!(XsdType::Int.audit_tag(), "integer");
        assert!(XsdType::Double.is_numeric());
        assert!(!XsdType::Boolean.is_numeric());
    }
}
