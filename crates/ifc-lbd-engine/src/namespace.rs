// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed vocabulary set of the output document

use ifc_lbd_model::Category;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const BOT: &str = "https://w3id.org/bot#";
pub const BEO: &str = "https://pi.pauwel.be/voc/buildingelement#";
pub const MEP: &str = "https://pi.pauwel.be/voc/distributionelement#";
pub const GEOM: &str = "https://w3id.org/geom#";
pub const PROPS: &str = "https://w3id.org/props#";
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

/// Prefix of instance nodes; bound to the run's base URI
pub const INST: &str = "inst";

/// Default base URI stem, completed with a timestamp per run
pub const DEFAULT_BASE_STEM: &str = "http://linkedbuildingdata.net/ifc/resources";

/// Prefix bindings in header order
pub const PREFIXES: [(&str, &str); 8] = [
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("bot", BOT),
    ("beo", BEO),
    ("mep", MEP),
    ("geom", GEOM),
    ("props", PROPS),
];

pub const RDFS_LABEL: &str = "rdfs:label";
pub const RDFS_COMMENT: &str = "rdfs:comment";
pub const HAS_GUID: &str = "bot:hasGuid";
pub const HAS_COMPRESSED_GUID: &str = "props:hasCompressedGuid";
pub const HAS_BUILDING: &str = "bot:hasBuilding";
pub const HAS_STOREY: &str = "bot:hasStorey";
pub const HAS_SPACE: &str = "bot:hasSpace";
pub const CONTAINS_ELEMENT: &str = "bot:containsElement";
pub const ADJACENT_ELEMENT: &str = "bot:adjacentElement";
pub const HOSTS_ELEMENT: &str = "bot:hostsElement";
pub const INTERFACE_OF: &str = "bot:interfaceOf";

/// BOT class of a category
pub fn class_of(category: Category) -> &'static str {
    match category {
        Category::Site => "bot:Site",
        Category::Building => "bot:Building",
        Category::Storey => "bot:Storey",
        Category::Space => "bot:Space",
        Category::Element => "bot:Element",
        Category::Interface => "bot:Interface",
        Category::Zone => "bot:Zone",
    }
}

/// Attribute predicate for a cleaned attribute name
pub fn props_predicate(name: &str) -> String {
    format!("props:{}", name)
}
