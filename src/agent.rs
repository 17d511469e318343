//! Agent facade wiring dataset, resolver and classifier together.

use crate::classifier::Classifier;
use crate::dataset::Dataset;
use crate::filter::{FilterExecutor, QueryResult};
use crate::resolver::QuestionResolver;
use crate::types::{Column, ParsedQuery, Result};
use std::fmt::Write as _;
use tracing::{info, warn};

/// Headers of the preview block: subject identifier plus the term,
/// severity and organ-class columns.
const PREVIEW_HEADER: [&str; 4] = ["USUBJID", "AETERM", "AESEV", "AESOC"];

const PREVIEW_ROWS: usize = 5;

/// Question-answering agent over an immutable adverse-event dataset.
///
/// With a classifier attached, questions are sent to the remote model first;
/// on any classifier failure the rule resolver answers instead, so resolution
/// never fails.
pub struct ClinicalAgent {
    dataset: Dataset,
    classifier: Option<Box<dyn Classifier>>,
}

impl ClinicalAgent {
    /// Rules-only agent.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            classifier: None,
        }
    }

    /// Agent with a remote classifier in front of the rule resolver.
    pub fn with_classifier(dataset: Dataset, classifier: Box<dyn Classifier>) -> Self {
        Self {
            dataset,
            classifier: Some(classifier),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Resolve a question to a filter. Infallible: classifier errors are
    /// logged and the rule resolver answers instead.
    pub async fn resolve(&self, question: &str) -> ParsedQuery {
        if let Some(classifier) = &self.classifier {
            match classifier.classify(question).await {
                Ok(parsed) => {
                    info!(column = %parsed.column, value = %parsed.value, "classifier resolved question");
                    return parsed;
                }
                Err(e) => {
                    warn!("classifier failed, falling back to rules: {}", e);
                }
            }
        }

        let parsed = QuestionResolver::resolve(question);
        info!(column = %parsed.column, value = %parsed.value, "rules resolved question");
        parsed
    }

    /// Answer a question: resolve, filter, shape.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::InvalidColumn` if the resolved column is absent
    /// from the loaded file. Rule-resolved queries cannot hit this because
    /// the filterable columns are validated at load time.
    pub async fn query(&self, question: &str) -> Result<QueryResult> {
        let parsed = self.resolve(question).await;
        FilterExecutor::execute(&self.dataset, &parsed)
    }

    /// Answer a question and format the result as a human-readable report.
    pub async fn display(&self, question: &str) -> Result<String> {
        let parsed = self.resolve(question).await;
        let result = FilterExecutor::execute(&self.dataset, &parsed)?;

        let mut out = String::new();
        let banner = "=".repeat(80);
        writeln!(out, "{}", banner).ok();
        writeln!(out, "Question: {}", question).ok();
        writeln!(out, "{}", banner).ok();
        writeln!(out).ok();
        writeln!(out, "Parsed query: {} = {}", parsed.column, parsed.value).ok();
        writeln!(out).ok();
        writeln!(out, "Total matching records: {}", result.matched_rows.len()).ok();
        writeln!(out, "Unique subjects: {}", result.match_count).ok();

        if !result.subject_ids.is_empty() {
            writeln!(out).ok();
            writeln!(out, "Subject IDs:").ok();
            for (i, subject_id) in result.subject_ids.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, subject_id).ok();
            }
        }

        if !result.matched_rows.is_empty() {
            writeln!(out).ok();
            writeln!(out, "Sample records (first {}):", PREVIEW_ROWS).ok();
            out.push_str(&Self::format_preview(&result));
        }

        Ok(out)
    }

    /// Fixed-width preview of up to five matched rows.
    fn format_preview(result: &QueryResult) -> String {
        let rows = &result.matched_rows[..result.matched_rows.len().min(PREVIEW_ROWS)];

        let cells: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| {
                vec![
                    row.usubjid.as_str(),
                    row.field(Column::Term).unwrap_or(""),
                    row.field(Column::Severity).unwrap_or(""),
                    row.field(Column::SystemOrganClass).unwrap_or(""),
                ]
            })
            .collect();

        let mut widths: Vec<usize> = PREVIEW_HEADER.iter().map(|h| h.len()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let mut out = String::new();
        for (i, name) in PREVIEW_HEADER.iter().enumerate() {
            write!(out, "  {:<width$}", name, width = widths[i]).ok();
        }
        out.push('\n');
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                write!(out, "  {:<width$}", cell, width = widths[i]).ok();
            }
            out.push('\n');
        }

        out
    }
}
