//! Natural language query agent for clinical trial adverse event data.
//!
//! Maps a free-text question to a single column/value filter on an
//! immutable, CSV-loaded adverse-event table and returns the matching rows
//! together with a distinct-subject summary. Resolution is rule-based by
//! default; an optional LLM classifier can sit in front of the rules, with
//! a mandatory fallback so a question always resolves.
//!
//! ```no_run
//! use adae_agent::{ClinicalAgent, Dataset};
//!
//! # async fn run() -> adae_agent::Result<()> {
//! let dataset = Dataset::load("adae.csv")?;
//! let agent = ClinicalAgent::new(dataset);
//! let result = agent.query("Which subjects experienced cardiac disorders?").await?;
//! println!("{} subjects", result.match_count);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod classifier;
pub mod dataset;
pub mod filter;
pub mod resolver;
pub mod schema;
pub mod types;

pub use agent::ClinicalAgent;
pub use classifier::{Classifier, RemoteClassifier};
pub use dataset::{AdverseEvent, Dataset};
pub use filter::{FilterExecutor, QueryResult};
pub use resolver::QuestionResolver;
pub use types::{AgentError, Column, ParsedQuery, Result};
