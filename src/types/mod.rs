//! Core types for the adverse-event query agent.

pub mod column;
pub mod error;

pub use column::{Column, ParsedQuery};
pub use error::{AgentError, Result};
