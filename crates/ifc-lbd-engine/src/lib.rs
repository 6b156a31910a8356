// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-LBD Engine - Linked Building Data conversion
//!
//! This crate turns any [`BuildingModel`](ifc_lbd_model::BuildingModel) into
//! a Building Topology Ontology graph serialized as Turtle, together with an
//! audit trail of every attribute it emitted.
//!
//! # Features
//!
//! - **Category filter** - choose which of sites, buildings, storeys,
//!   spaces, elements, interfaces and zones are traversed
//! - **Declared relation plan** - relations to disabled or missing targets
//!   are dropped with a warning instead of dangling
//! - **Typed attributes** - property values become `xsd:boolean`, `xsd:int`,
//!   `xsd:double` or `xsd:string` literals with inferred units
//! - **Atomic output** - documents and audit tables never land half-written
//!
//! # Example
//!
//! ```ignore
//! use ifc_lbd_engine::{convert, ConversionOptions, EntityFilter};
//! use ifc_lbd_model::{Category, InMemoryModel};
//!
//! let model = InMemoryModel::open("model.json")?;
//! let options = ConversionOptions::new()
//!     .with_filter(EntityFilter::excluding([Category::Interface]));
//!
//! let conversion = convert(&model, &options)?;
//! conversion.write_turtle("model.ttl")?;
//! conversion.audit.write_csv("model.csv")?;
//! ```

pub mod audit;
mod engine;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod namespace;
pub mod options;
pub mod output;
pub mod serializer;
pub mod triple;
pub mod units;

pub use audit::{AuditRow, AuditSubject, AuditTrail, AUDIT_COLUMNS};
pub use engine::{
    convert, Conversion, ConversionReport, DanglingReference, Graph, GraphMapper, RelationRule,
    Walk, RELATION_PLAN,
};
pub use error::{ConvertError, Result};
pub use filter::EntityFilter;
pub use flatten::{flatten_attribute, flatten_attribute_set, FlatAttribute};
pub use options::ConversionOptions;
pub use triple::{EntityBlock, Literal, Object, Triple, TripleKind, XsdType};
