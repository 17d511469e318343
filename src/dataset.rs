//! CSV-backed adverse-event dataset.
//!
//! Loaded once at startup and never mutated afterwards. Header validation
//! happens at load time so a well-formed dataset can serve any rule-resolved
//! query without per-query schema checks.

use crate::schema::REQUIRED_HEADERS;
use crate::types::{AgentError, Column, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// One reported adverse event for a subject.
///
/// Cells are optional because CSV exports routinely leave fields blank; an
/// absent cell never matches any filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdverseEvent {
    #[serde(rename = "USUBJID")]
    pub usubjid: String,
    #[serde(rename = "AETERM")]
    pub term: Option<String>,
    #[serde(rename = "AESEV")]
    pub severity: Option<String>,
    #[serde(rename = "AESOC")]
    pub system_organ_class: Option<String>,
    #[serde(rename = "AEBODSYS")]
    pub body_system: Option<String>,
    #[serde(rename = "AESER")]
    pub serious: Option<String>,
    #[serde(rename = "AEREL")]
    pub relationship: Option<String>,
    #[serde(rename = "AEOUT")]
    pub outcome: Option<String>,
    #[serde(rename = "AESTDTC", default)]
    pub start_date: Option<String>,
    #[serde(rename = "AEENDTC", default)]
    pub end_date: Option<String>,
}

impl AdverseEvent {
    /// Cell value for a filterable column, if present.
    pub fn field(&self, column: Column) -> Option<&str> {
        match column {
            Column::Term => self.term.as_deref(),
            Column::Severity => self.severity.as_deref(),
            Column::SystemOrganClass => self.system_organ_class.as_deref(),
            Column::BodySystem => self.body_system.as_deref(),
            Column::Serious => self.serious.as_deref(),
            Column::Relationship => self.relationship.as_deref(),
            Column::Outcome => self.outcome.as_deref(),
        }
    }
}

/// Immutable in-memory adverse-event table.
#[derive(Debug)]
pub struct Dataset {
    headers: HashSet<String>,
    rows: Vec<AdverseEvent>,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::MissingColumn` if a required header is absent,
    /// `AgentError::CsvError` on malformed rows.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: HashSet<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        for required in REQUIRED_HEADERS {
            if !headers.contains(required) {
                return Err(AgentError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let row: AdverseEvent = record?;
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Whether the loaded file carried the given filterable column.
    pub fn has_column(&self, column: Column) -> bool {
        self.headers.contains(column.as_str())
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[AdverseEvent] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
