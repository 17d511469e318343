//! Filter execution and result shaping.

use crate::dataset::{AdverseEvent, Dataset};
use crate::types::{AgentError, ParsedQuery, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of running one filter against the dataset.
///
/// `match_count` counts distinct subjects, not rows; a subject with several
/// matching events is counted once. An empty result is a normal outcome.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Number of distinct subjects with at least one matching row.
    pub match_count: usize,
    /// Distinct subject identifiers, first-seen order.
    pub subject_ids: Vec<String>,
    /// All matching rows, in dataset order.
    pub matched_rows: Vec<AdverseEvent>,
}

/// Applies a single case-insensitive equality predicate to the dataset.
pub struct FilterExecutor;

impl FilterExecutor {
    /// Execute a filter and shape the result.
    ///
    /// A row matches iff its cell for the queried column equals the query
    /// value, compared uppercased. Absent cells never match.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::InvalidColumn` if the loaded file lacks the
    /// queried column.
    pub fn execute(dataset: &Dataset, query: &ParsedQuery) -> Result<QueryResult> {
        if !dataset.has_column(query.column) {
            return Err(AgentError::InvalidColumn(query.column.to_string()));
        }

        let wanted = query.value.to_uppercase();
        let matched_rows: Vec<AdverseEvent> = dataset
            .rows()
            .iter()
            .filter(|row| {
                row.field(query.column)
                    .map(|cell| cell.to_uppercase() == wanted)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let mut subject_ids = Vec::new();
        for row in &matched_rows {
            if seen.insert(row.usubjid.clone()) {
                subject_ids.push(row.usubjid.clone());
            }
        }

        Ok(QueryResult {
            match_count: subject_ids.len(),
            subject_ids,
            matched_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    const SAMPLE: &str = "\
USUBJID,AETERM,AESEV,AESOC,AEBODSYS,AESER,AEREL,AEOUT
SUBJ-002,HEADACHE,Moderate,NERVOUS SYSTEM DISORDERS,NERVOUS SYSTEM DISORDERS,N,REMOTE,RECOVERED/RESOLVED
SUBJ-001,ERYTHEMA,MODERATE,SKIN AND SUBCUTANEOUS TISSUE DISORDERS,SKIN AND SUBCUTANEOUS TISSUE DISORDERS,N,POSSIBLE,RECOVERED/RESOLVED
SUBJ-002,NAUSEA,moderate,GASTROINTESTINAL DISORDERS,GASTROINTESTINAL DISORDERS,N,PROBABLE,RECOVERED/RESOLVED
SUBJ-003,FATIGUE,MILD,,GENERAL DISORDERS,N,NONE,RECOVERED/RESOLVED
";

    fn dataset() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_case_insensitive_match() {
        let ds = dataset();
        let result = FilterExecutor::execute(
            &ds,
            &ParsedQuery::new(Column::Severity, "moderate"),
        )
        .unwrap();

        // Cells "Moderate", "MODERATE" and "moderate" all match.
        assert_eq!(result.matched_rows.len(), 3);
    }

    #[test]
    fn test_distinct_subject_count_first_seen_order() {
        let ds = dataset();
        let result = FilterExecutor::execute(
            &ds,
            &ParsedQuery::new(Column::Severity, "MODERATE"),
        )
        .unwrap();

        // SUBJ-002 has two matching rows but is counted once, and keeps its
        // first-seen position ahead of SUBJ-001.
        assert_eq!(result.match_count, 2);
        assert_eq!(result.subject_ids, vec!["SUBJ-002", "SUBJ-001"]);
        assert!(result.match_count <= result.matched_rows.len());
    }

    #[test]
    fn test_matched_rows_in_dataset_order() {
        let ds = dataset();
        let result = FilterExecutor::execute(
            &ds,
            &ParsedQuery::new(Column::Severity, "MODERATE"),
        )
        .unwrap();

        let terms: Vec<_> = result
            .matched_rows
            .iter()
            .map(|r| r.term.as_deref().unwrap())
            .collect();
        assert_eq!(terms, vec!["HEADACHE", "ERYTHEMA", "NAUSEA"]);
    }

    #[test]
    fn test_empty_result_is_ok() {
        let ds = dataset();
        let result = FilterExecutor::execute(
            &ds,
            &ParsedQuery::new(Column::Term, "VERTIGO"),
        )
        .unwrap();

        assert_eq!(result.match_count, 0);
        assert!(result.subject_ids.is_empty());
        assert!(result.matched_rows.is_empty());
    }

    #[test]
    fn test_missing_cell_never_matches() {
        let ds = dataset();
        // SUBJ-003 has an empty AESOC cell; filtering on an empty value must
        // not match it.
        let result = FilterExecutor::execute(
            &ds,
            &ParsedQuery::new(Column::SystemOrganClass, ""),
        )
        .unwrap();

        assert_eq!(result.match_count, 0);
    }
}
