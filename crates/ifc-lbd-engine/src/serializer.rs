// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turtle rendering of entity blocks
//!
//! Output layout:
//!
//! ```text
//! # baseURI: <base>
//! @prefix inst: <base> .
//! @prefix rdf:  <...> .
//! ...
//!
//! inst: rdf:type <http://www.w3.org/2002/07/owl#Ontology> .
//!
//! inst:storey_3
//! 	a bot:Storey ;
//! 	rdfs:label "S1"^^xsd:string ;
//! 	bot:containsElement inst:element_4, inst:element_5 .
//! ```

use crate::namespace::{DEFAULT_BASE_STEM, INST, OWL_ONTOLOGY, PREFIXES, PROPS};
use crate::triple::{EntityBlock, Literal, Object};
use chrono::{DateTime, TimeZone};
use std::fmt::Write;

/// Base URI for a run started at `now`
pub fn base_uri_at<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}/", DEFAULT_BASE_STEM, now.format("%Y%m%d_%H%M%S"))
}

/// Escape a lexical form for a double-quoted Turtle string
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn render_literal(literal: &Literal) -> String {
    format!(
        "\"{}\"{}",
        escape_literal(&literal.lexical),
        literal.datatype.suffix()
    )
}

/// Characters that may appear in a prefixed local name only when escaped
const LOCAL_NAME_ESCAPES: &str = "~.-!$&'()*+,;=/?#@%";

/// Turtle `PN_CHARS_BASE`
fn is_name_start(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Remaining `PN_CHARS` that may not start a local name
fn is_name_continue(c: char) -> bool {
    matches!(c, '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Make an attribute name usable as the local part of a prefixed name
///
/// Reserved punctuation is backslash-escaped, which denotes the same IRI.
/// Returns `None` when some character has no prefixed-name spelling at all.
pub fn escape_local_name(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '_' || c == ':' || c.is_ascii_digit() || is_name_start(c) {
            out.push(c);
        } else if is_name_continue(c) && !out.is_empty() {
            out.push(c);
        } else if LOCAL_NAME_ESCAPES.contains(c) {
            out.push('\\');
            out.push(c);
        } else {
            return None;
        }
    }
    Some(out)
}

/// Escape text for the inside of an `<IRIREF>`
pub fn escape_iri(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c <= ' ' || "<>\"{}|^`\\".contains(c) {
            let _ = write!(out, "\\u{:04X}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

/// Attribute predicates fall back to a full IRI when the cleaned name cannot
/// be spelled as `props:<name>`
fn render_predicate(predicate: &str) -> String {
    match predicate.strip_prefix("props:") {
        Some(local) => match escape_local_name(local) {
            Some(escaped) => format!("props:{}", escaped),
            None => format!("<{}{}>", PROPS, escape_iri(local)),
        },
        None => predicate.to_string(),
    }
}

fn render_object(object: &Object) -> String {
    match object {
        Object::Class(class) => class.to_string(),
        Object::Node(node) => format!("{}:{}", INST, node),
        Object::Literal(literal) => render_literal(literal),
    }
}

/// Document header: base URI comment, prefixes and the ontology statement
pub fn render_header(base_uri: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# baseURI: {}", base_uri);
    let _ = writeln!(s, "@prefix {}: <{}> .", INST, base_uri);
    for (prefix, iri) in PREFIXES {
        let _ = writeln!(s, "@prefix {}:  <{}> .", prefix, iri);
    }
    s.push('\n');
    let _ = writeln!(s, "{}: rdf:type <{}> .", INST, OWL_ONTOLOGY);
    s.push('\n');
    s
}

/// Render one entity block
///
/// Consecutive statements with the same predicate share one line with
/// comma-separated objects.
pub fn render_block(block: &EntityBlock) -> String {
    let mut statements: Vec<(String, Vec<String>)> = Vec::new();
    for triple in &block.triples {
        let object = render_object(&triple.object);
        match statements.last_mut() {
            Some((predicate, objects)) if *predicate == triple.predicate => objects.push(object),
            _ => statements.push((triple.predicate.clone(), vec![object])),
        }
    }

    let body = statements
        .iter()
        .map(|(predicate, objects)| {
            format!("\t{} {}", render_predicate(predicate), objects.join(", "))
        })
        .collect::<Vec<_>>()
        .join(" ;\n");

    format!("{}:{}\n{} .\n\n", INST, block.node, body)
}

/// Render the full document
pub fn render_document(base_uri: &str, blocks: &[EntityBlock]) -> String {
    let mut out = render_header(base_uri);
    for block in blocks {
        out.push_str(&render_block(block));
    }
    out
}
