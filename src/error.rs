//! Error types for libify operations.
//!
//! Stage-level pipeline failures never surface here; they are converted to
//! [`crate::pipeline::PipelineResult`] variants at each stage boundary. These
//! types cover what can go wrong before a pipeline run exists: argument
//! handling, missing external tools, and session setup I/O.

use thiserror::Error;

/// Result type alias for libify operations
pub type Result<T> = std::result::Result<T, LibifyError>;

/// Main error type for all libify operations
#[derive(Error, Debug)]
pub enum LibifyError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool errors
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Errors from locating or launching the external npm/webpack tooling
#[derive(Error, Debug)]
pub enum ToolError {
    /// Required tool is not on PATH
    #[error(
        "`{tool}` was not found on PATH: {source}\n\
         \n\
         libify drives npm and webpack as external tools.\n\
         Install Node.js (which provides npm and npx) from https://nodejs.org"
    )]
    Missing {
        /// Tool binary name
        tool: String,
        /// Lookup failure detail
        #[source]
        source: which::Error,
    },
}
