// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute flattening and typing
//!
//! Turns a property set into typed literals. Property sets are user-authored
//! and heterogeneous, so nothing here fails: unknown shapes become strings and
//! unmatched names get an empty unit.

use crate::triple::{Literal, XsdType};
use crate::units::infer_unit;
use ifc_lbd_model::{format_double, AttributeSet, AttributeValue, RESERVED_ID_KEY};

/// One attribute after flattening
#[derive(Clone, Debug, PartialEq)]
pub struct FlatAttribute {
    /// Cleaned attribute name, used as the `props:` predicate
    pub name: String,
    /// Typed literal to emit
    pub literal: Literal,
    /// Original value, stringified, for the audit trail
    pub original: String,
    /// Inferred unit, empty if none
    pub unit: &'static str,
}

/// Clean an attribute name into a predicate-safe identifier
///
/// Each run of letters is title-cased (first letter upper, rest lower),
/// then whitespace, `\` and `/` are removed: `"fire rating"` becomes
/// `FireRating`, `"Dpp_Dim_Height_mm"` becomes `Dpp_Dim_Height_Mm`.
pub fn clean_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;

    for c in name.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else if !c.is_whitespace() && c != '\\' && c != '/' {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}

/// Collapse line breaks the way string literals are emitted
fn collapse_lines(text: &str) -> String {
    text.replace('\n', ", ").replace('\r', "")
}

/// Type a single value
///
/// Priority: boolean, integer, double, then string for everything else.
pub fn type_value(value: &AttributeValue) -> Literal {
    match value {
        AttributeValue::Boolean(b) => Literal::new(b.to_string(), XsdType::Boolean),
        AttributeValue::Integer(i) => Literal::new(i.to_string(), XsdType::Int),
        AttributeValue::Double(d) => Literal::new(format_double(*d), XsdType::Double),
        AttributeValue::Text(s) => Literal::string(collapse_lines(s)),
        other => Literal::string(collapse_lines(&other.to_string())),
    }
}

/// Flatten one attribute pair
pub fn flatten_attribute(name: &str, value: &AttributeValue) -> FlatAttribute {
    let name = clean_name(name);
    let literal = type_value(value);
    let unit = if literal.datatype.is_numeric() {
        infer_unit(&name)
    } else {
        ""
    };

    FlatAttribute {
        name,
        literal,
        original: value.to_string(),
        unit,
    }
}

/// Flatten a property set, skipping the reserved `id` key
pub fn flatten_attribute_set(set: &AttributeSet) -> Vec<FlatAttribute> {
    set.iter()
        .filter(|(name, _)| *name != RESERVED_ID_KEY)
        .map(|(name, value)| flatten_attribute(name, value))
        .collect()
}
