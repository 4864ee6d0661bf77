//! Error types for netswitch collaborators.
//!
//! The engine itself is total and returns no errors; everything here
//! belongs to the I/O glue around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetswitchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Config error: {0}")]
    Config(String),
}
