// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit inference from attribute names
//!
//! Authoring tools encode the unit as a name suffix (`Dpp_Dim_Height_Mm`,
//! `Gwp_Total_Kgco2Eq`). The table is searched case-insensitively in order;
//! the first match wins, so compound units sit above the bare units they
//! contain and `_M` only matches at the end of the name or before `_`.

use once_cell::sync::Lazy;
use regex::Regex;

/// (pattern, unit) pairs in priority order
const UNIT_TABLE: &[(&str, &str)] = &[
    (r"_Kgco[2₂]?Eq", "kgCO₂eq"),
    (r"_Kgso[2₂]?Eq", "kgSO₂eq"),
    (r"_Mjkg", "MJ/kg"),
    (r"_Mpa", "MPa"),
    (r"_Eur", "EUR"),
    (r"_Years", "years"),
    (r"_Ctuh", "CTUh"),
    (r"_Mm(?:$|_)", "mm"),
    (r"_Cm(?:$|_)", "cm"),
    (r"_Km(?:$|_)", "km"),
    (r"_Kg(?:$|_)", "kg"),
    (r"_M(?:$|_)", "m"),
    (r"_M2", "m²"),
    (r"_M3", "m³"),
    (r"_M²", "m²"),
    (r"_M³", "m³"),
];

static UNIT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    UNIT_TABLE
        .iter()
        .filter_map(|(pattern, unit)| match Regex::new(&format!("(?i){}", pattern)) {
            Ok(re) => Some((re, *unit)),
            Err(e) => {
                log::error!("Invalid unit pattern {}: {}", pattern, e);
                None
            }
        })
        .collect()
});

/// Infer a unit from a cleaned attribute name
///
/// Returns the empty string when no pattern matches.
pub fn infer_unit(name: &str) -> &'static str {
    UNIT_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map(|(_, unit)| *unit)
        .unwrap_or("")
}

/// Number of unit mappings
pub fn unit_count() -> usize {
    UNIT_PATTERNS.len()
}
