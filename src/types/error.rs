//! Error types for the adverse-event query agent.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Column not present in dataset: {0}")]
    InvalidColumn(String),

    #[error("Required column missing from data file: {0}")]
    MissingColumn(String),

    #[error("Classifier error: {0}")]
    ClassifierError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
