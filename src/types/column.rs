//! Filterable columns of the adverse-event dataset.

use crate::types::error::AgentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven columns a query may filter on.
///
/// `USUBJID` is deliberately absent: it identifies subjects in results and
/// is never a filter target. Date columns are loaded but not filterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "AETERM")]
    Term,
    #[serde(rename = "AESEV")]
    Severity,
    #[serde(rename = "AESOC")]
    SystemOrganClass,
    #[serde(rename = "AEBODSYS")]
    BodySystem,
    #[serde(rename = "AESER")]
    Serious,
    #[serde(rename = "AEREL")]
    Relationship,
    #[serde(rename = "AEOUT")]
    Outcome,
}

impl Column {
    /// All filterable columns, in dataset order.
    pub const ALL: [Column; 7] = [
        Column::Term,
        Column::Severity,
        Column::SystemOrganClass,
        Column::BodySystem,
        Column::Serious,
        Column::Relationship,
        Column::Outcome,
    ];

    /// CDISC header name as it appears in the data file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Term => "AETERM",
            Column::Severity => "AESEV",
            Column::SystemOrganClass => "AESOC",
            Column::BodySystem => "AEBODSYS",
            Column::Serious => "AESER",
            Column::Relationship => "AEREL",
            Column::Outcome => "AEOUT",
        }
    }
}

impl FromStr for Column {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AETERM" => Ok(Column::Term),
            "AESEV" => Ok(Column::Severity),
            "AESOC" => Ok(Column::SystemOrganClass),
            "AEBODSYS" => Ok(Column::BodySystem),
            "AESER" => Ok(Column::Serious),
            "AEREL" => Ok(Column::Relationship),
            "AEOUT" => Ok(Column::Outcome),
            other => Err(AgentError::InvalidColumn(other.to_string())),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-predicate filter produced by the resolver or remote classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// Column to filter on.
    pub column: Column,
    /// Value to match, compared case-insensitively.
    pub value: String,
}

impl ParsedQuery {
    pub fn new(column: Column, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}
