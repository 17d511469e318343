//! Dataset schema description shared with the remote classifier.

/// Headers that must be present in the data file. The seven filterable
/// columns plus the subject identifier; validated once at load time so
/// rule-resolved queries can never reference an absent column.
pub const REQUIRED_HEADERS: [&str; 8] = [
    "USUBJID", "AETERM", "AESEV", "AESOC", "AEBODSYS", "AESER", "AEREL", "AEOUT",
];

/// Static schema context handed to the remote classifier as its system
/// prompt. Kept as one block so the prompt is reviewable in isolation.
pub const SCHEMA_DESCRIPTION: &str = r#"Clinical Trial Adverse Events Dataset Schema:

Key Columns:
- USUBJID: Unique Subject Identifier (used to count unique subjects)
- AETERM: Adverse Event Term (the name/description of the adverse event, e.g., "ERYTHEMA", "DIARRHOEA", "FATIGUE")
- AESEV: Severity of the Adverse Event (values: "MILD", "MODERATE", "SEVERE")
- AESOC: System Organ Class (body system affected, e.g., "CARDIAC DISORDERS", "SKIN AND SUBCUTANEOUS TISSUE DISORDERS", "GASTROINTESTINAL DISORDERS")
- AEBODSYS: Body System (similar to AESOC, the organ system classification)
- AESER: Serious Event Flag (Y/N)
- AEREL: Relationship to Study Drug (e.g., "PROBABLE", "POSSIBLE", "REMOTE", "NONE")
- AEOUT: Outcome (e.g., "RECOVERED/RESOLVED", "NOT RECOVERED/NOT RESOLVED")
- AESTDTC: Start Date of Adverse Event
- AEENDTC: End Date of Adverse Event

Common Question Mappings:
- Questions about "severity", "intensity", "how severe" -> Use AESEV column
- Questions about specific conditions, symptoms, or event names (e.g., "headache", "diarrhea", "erythema") -> Use AETERM column
- Questions about body systems, organ classes (e.g., "cardiac", "skin", "gastrointestinal") -> Use AESOC or AEBODSYS column
- Questions about serious events -> Use AESER column
- Questions about relationship/relatedness to drug -> Use AEREL column
- Questions about outcomes, resolution -> Use AEOUT column

Task: Parse the user's question and return ONLY a JSON object with two fields:
1. "target_column": The column name to filter on (must be exactly one of: AETERM, AESEV, AESOC, AEBODSYS, AESER, AEREL, AEOUT)
2. "filter_value": The exact value to search for (use uppercase for consistency)

Example response format:
{"target_column": "AESEV", "filter_value": "MODERATE"}

OUTPUT: Valid JSON only, no markdown, no explanation outside JSON."#;
