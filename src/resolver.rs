//! Rule-based question resolver.
//!
//! Maps a free-text question to a single column/value filter using an
//! ordered list of keyword rules. Matching is substring containment on the
//! lowercased question; no tokenization or stemming. The resolver is total:
//! any input, including the empty string, yields a well-formed query.

use crate::types::{Column, ParsedQuery};

const SEVERITY_TRIGGERS: [&str; 4] = ["severity", "severe", "intensity", "intense"];

// Checked in this order; "mild" wins over "moderate" wins over "severe"
// when a question names more than one level.
const SEVERITY_LEVELS: [&str; 3] = ["mild", "moderate", "severe"];

// Body-system keyword groups, checked in fixed order.
const BODY_SYSTEM_GROUPS: [(&[&str], &str); 5] = [
    (&["cardiac", "heart", "cardiovascular"], "CARDIAC DISORDERS"),
    (
        &["skin", "dermal", "dermatologic"],
        "SKIN AND SUBCUTANEOUS TISSUE DISORDERS",
    ),
    (
        &["gastrointestinal", "digestive", "gi", "stomach"],
        "GASTROINTESTINAL DISORDERS",
    ),
    (&["infection", "infectious"], "INFECTIONS AND INFESTATIONS"),
    (
        &["general disorder", "administration site"],
        "GENERAL DISORDERS AND ADMINISTRATION SITE CONDITIONS",
    ),
];

// Symptom keyword -> exact AETERM value, scanned in this order.
const CONDITION_TERMS: [(&str, &str); 11] = [
    ("erythema", "ERYTHEMA"),
    ("diarrhea", "DIARRHOEA"),
    ("diarrhoea", "DIARRHOEA"),
    ("fatigue", "FATIGUE"),
    ("pruritus", "APPLICATION SITE PRURITUS"),
    ("itching", "APPLICATION SITE PRURITUS"),
    ("headache", "HEADACHE"),
    ("nausea", "NAUSEA"),
    ("hiatus hernia", "HIATUS HERNIA"),
    ("bundle branch block", "BUNDLE BRANCH BLOCK LEFT"),
    ("respiratory infection", "UPPER RESPIRATORY TRACT INFECTION"),
];

const RELATIONSHIP_LEVELS: [&str; 4] = ["probable", "possible", "remote", "none"];

/// One keyword rule. Rules are evaluated in the order of [`RULES`]; the
/// first rule returning a query wins. Order matters: later rules would
/// over-match on shared keywords ("serious" vs "severe").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Severity,
    BodySystem,
    Condition,
    Seriousness,
    Relationship,
    Outcome,
}

/// Rule precedence, highest first.
pub const RULES: [Rule; 6] = [
    Rule::Severity,
    Rule::BodySystem,
    Rule::Condition,
    Rule::Seriousness,
    Rule::Relationship,
    Rule::Outcome,
];

impl Rule {
    /// Apply this rule to an already-lowercased question.
    fn apply(&self, question: &str) -> Option<ParsedQuery> {
        match self {
            Rule::Severity => {
                if !SEVERITY_TRIGGERS.iter().any(|t| question.contains(t)) {
                    return None;
                }
                // Trigger without a level word falls through to later rules.
                SEVERITY_LEVELS
                    .iter()
                    .find(|level| question.contains(*level))
                    .map(|level| ParsedQuery::new(Column::Severity, level.to_uppercase()))
            }
            Rule::BodySystem => BODY_SYSTEM_GROUPS
                .iter()
                .find(|(keywords, _)| keywords.iter().any(|k| question.contains(k)))
                .map(|(_, soc)| ParsedQuery::new(Column::SystemOrganClass, *soc)),
            Rule::Condition => CONDITION_TERMS
                .iter()
                .find(|(keyword, _)| question.contains(keyword))
                .map(|(_, term)| ParsedQuery::new(Column::Term, *term)),
            Rule::Seriousness => {
                if !question.contains("serious") {
                    return None;
                }
                // The trigger word "serious" also satisfies the "Y" disjunct,
                // leaving the "N" arm unreachable under the current wording.
                let value = if question.contains("yes") || question.contains("serious") {
                    "Y"
                } else {
                    "N"
                };
                Some(ParsedQuery::new(Column::Serious, value))
            }
            Rule::Relationship => {
                if !question.contains("relationship") && !question.contains("related") {
                    return None;
                }
                RELATIONSHIP_LEVELS
                    .iter()
                    .find(|level| question.contains(*level))
                    .map(|level| ParsedQuery::new(Column::Relationship, level.to_uppercase()))
            }
            Rule::Outcome => {
                if !question.contains("outcome")
                    && !question.contains("resolved")
                    && !question.contains("recovered")
                {
                    return None;
                }
                let value = if question.contains("not") {
                    "NOT RECOVERED/NOT RESOLVED"
                } else {
                    "RECOVERED/RESOLVED"
                };
                Some(ParsedQuery::new(Column::Outcome, value))
            }
        }
    }
}

/// Deterministic keyword classifier, the guaranteed backstop behind the
/// remote classifier.
pub struct QuestionResolver;

impl QuestionResolver {
    /// Resolve a question to a column/value filter. Never fails; questions
    /// matching no rule map to the mild-severity default.
    pub fn resolve(question: &str) -> ParsedQuery {
        let question = question.to_lowercase();
        RULES
            .iter()
            .find_map(|rule| rule.apply(&question))
            .unwrap_or_else(|| ParsedQuery::new(Column::Severity, "MILD"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolve(q: &str) -> (Column, String) {
        let parsed = QuestionResolver::resolve(q);
        (parsed.column, parsed.value)
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(
            resolve("Give me the subjects who had Adverse events of Moderate severity"),
            (Column::Severity, "MODERATE".into())
        );
        assert_eq!(
            resolve("Which subjects had mild intensity events?"),
            (Column::Severity, "MILD".into())
        );
        // "severe" is both trigger and level
        assert_eq!(
            resolve("severe reactions"),
            (Column::Severity, "SEVERE".into())
        );
    }

    #[test]
    fn test_severity_trigger_without_level_falls_through() {
        // "intensity" triggers the severity rule but names no level, so the
        // question falls through to the body-system rule.
        assert_eq!(
            resolve("what was the intensity of cardiac events?"),
            (Column::SystemOrganClass, "CARDIAC DISORDERS".into())
        );
    }

    #[test]
    fn test_body_system_groups() {
        assert_eq!(
            resolve("Which subjects experienced cardiac disorders?"),
            (Column::SystemOrganClass, "CARDIAC DISORDERS".into())
        );
        assert_eq!(
            resolve("any dermal reactions?"),
            (
                Column::SystemOrganClass,
                "SKIN AND SUBCUTANEOUS TISSUE DISORDERS".into()
            )
        );
        assert_eq!(
            resolve("stomach problems"),
            (Column::SystemOrganClass, "GASTROINTESTINAL DISORDERS".into())
        );
        assert_eq!(
            resolve("who caught an infection?"),
            (Column::SystemOrganClass, "INFECTIONS AND INFESTATIONS".into())
        );
        assert_eq!(
            resolve("administration site reactions"),
            (
                Column::SystemOrganClass,
                "GENERAL DISORDERS AND ADMINISTRATION SITE CONDITIONS".into()
            )
        );
    }

    #[test]
    fn test_condition_lookup() {
        assert_eq!(
            resolve("Show me patients with erythema"),
            (Column::Term, "ERYTHEMA".into())
        );
        // Both spellings map to the dataset spelling.
        assert_eq!(resolve("who had diarrhea?"), (Column::Term, "DIARRHOEA".into()));
        assert_eq!(resolve("who had diarrhoea?"), (Column::Term, "DIARRHOEA".into()));
        assert_eq!(
            resolve("patients reporting itching"),
            (Column::Term, "APPLICATION SITE PRURITUS".into())
        );
        assert_eq!(
            resolve("anyone with a hiatus hernia?"),
            (Column::Term, "HIATUS HERNIA".into())
        );
    }

    #[test]
    fn test_severity_wins_over_condition() {
        // "headache" is in the condition table, but the severity rule has
        // higher precedence.
        assert_eq!(
            resolve("how severe were the mild headache events?"),
            (Column::Severity, "MILD".into())
        );
    }

    #[test]
    fn test_serious_alone_maps_to_yes() {
        // The "N" arm of the seriousness rule is unreachable: "serious"
        // itself forces "Y".
        assert_eq!(resolve("were there serious events?"), (Column::Serious, "Y".into()));
        assert_eq!(
            resolve("serious adverse events, yes or no"),
            (Column::Serious, "Y".into())
        );
    }

    #[test]
    fn test_relationship_levels() {
        assert_eq!(
            resolve("events with probable relationship to the drug"),
            (Column::Relationship, "PROBABLE".into())
        );
        assert_eq!(
            resolve("which events had a possible relationship to treatment?"),
            (Column::Relationship, "POSSIBLE".into())
        );
        assert_eq!(
            resolve("events related with remote likelihood"),
            (Column::Relationship, "REMOTE".into())
        );
        assert_eq!(
            resolve("events with none relationship"),
            (Column::Relationship, "NONE".into())
        );
    }

    #[test]
    fn test_relationship_trigger_without_level_falls_through() {
        assert_eq!(resolve("drug related events"), (Column::Severity, "MILD".into()));
    }

    #[test]
    fn test_outcome() {
        assert_eq!(
            resolve("Which subjects had outcomes that were not resolved?"),
            (Column::Outcome, "NOT RECOVERED/NOT RESOLVED".into())
        );
        assert_eq!(
            resolve("who recovered?"),
            (Column::Outcome, "RECOVERED/RESOLVED".into())
        );
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(resolve(""), (Column::Severity, "MILD".into()));
        assert_eq!(resolve("tell me about the weather"), (Column::Severity, "MILD".into()));
    }

    proptest! {
        // Totality: any input resolves to a well-formed query.
        #[test]
        fn resolver_is_total(question in ".*") {
            let parsed = QuestionResolver::resolve(&question);
            prop_assert!(Column::ALL.contains(&parsed.column));
            prop_assert!(!parsed.value.is_empty());
        }

        // Any question with a severity trigger and exactly one level word
        // resolves to that level.
        #[test]
        fn severity_trigger_plus_level(
            prefix in "[qxz ]{0,20}",
            level in prop::sample::select(vec!["mild", "moderate", "severe"]),
        ) {
            let question = format!("{} severity {}", prefix, level);
            let parsed = QuestionResolver::resolve(&question);
            prop_assert_eq!(parsed.column, Column::Severity);
            prop_assert_eq!(parsed.value, level.to_uppercase());
        }
    }
}
