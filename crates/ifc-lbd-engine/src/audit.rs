// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Audit trail of emitted attributes
//!
//! One row per attribute triple, in emission order, so the graph can be
//! cross-checked against a spreadsheet view of the same data.

use crate::flatten::FlatAttribute;
use crate::output::write_atomic;
use crate::Result;
use ifc_lbd_model::BuildingEntity;
use serde::Serialize;
use std::path::Path;

/// Column headers of the exported table
pub const AUDIT_COLUMNS: [&str; 7] = [
    "Element_ID",
    "Element_Type",
    "Element_Name",
    "Parameter",
    "Value",
    "Data_Type",
    "Unit",
];

/// Owning entity of a group of audit rows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditSubject {
    /// Local node identifier (e.g. `element_42`)
    pub node: String,
    /// IFC class for elements, category label otherwise
    pub entity_type: String,
    /// Entity name, empty if absent
    pub name: String,
}

impl AuditSubject {
    pub fn from_entity(entity: &BuildingEntity) -> Self {
        Self {
            node: entity.node_id(),
            entity_type: entity.type_label().to_string(),
            name: entity.display_name().to_string(),
        }
    }
}

/// One audited attribute
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditRow {
    #[serde(rename = "Element_ID")]
    pub element_id: String,
    #[serde(rename = "Element_Type")]
    pub element_type: String,
    #[serde(rename = "Element_Name")]
    pub element_name: String,
    #[serde(rename = "Parameter")]
    pub parameter: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Data_Type")]
    pub data_type: String,
    #[serde(rename = "Unit")]
    pub unit: String,
}

impl AuditRow {
    pub fn new(subject: &AuditSubject, attribute: &FlatAttribute) -> Self {
        Self {
            element_id: subject.node.clone(),
            element_type: subject.entity_type.clone(),
            element_name: subject.name.clone(),
            parameter: attribute.name.clone(),
            value: attribute.original.clone(),
            data_type: attribute.literal.datatype.audit_tag().to_string(),
            unit: attribute.unit.to_string(),
        }
    }
}

/// Rows collected during one conversion run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditTrail {
    rows: Vec<AuditRow>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attribute of a subject
    pub fn record(&mut self, subject: &AuditSubject, attribute: &FlatAttribute) {
        self.rows.push(AuditRow::new(subject, attribute));
    }

    pub fn rows(&self) -> &[AuditRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Encode the rows as CSV with a header line
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| crate::ConvertError::Io(e.into_error()))
    }

    /// Export the rows as CSV
    ///
    /// An empty trail writes nothing and returns `false`.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<bool> {
        if self.rows.is_empty() {
            log::info!("No attribute rows to export");
            return Ok(false);
        }
        let bytes = self.to_csv()?;
        write_atomic(path.as_ref(), &bytes)?;
        log::info!(
            "Audit table written: {} ({} rows)",
            path.as_ref().display(),
            self.rows.len()
        );
        Ok(true)
    }
}
