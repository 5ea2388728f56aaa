//! Error types and exit codes for emmyjar

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for emmyjar operations
#[derive(Error, Debug)]
pub enum StubGenError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Failed to parse source: {message}")]
    ParseFailure { message: String },

    #[error("Declaration extraction failed: {message}")]
    ExtractionFailure { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StubGenError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Invalid input (not a jar, directory, or .java file)
    /// - 3: Unreadable archive
    /// - 4: Parse or extraction failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::InvalidInput { .. } => ExitCode::from(2),
            Self::Archive { .. } => ExitCode::from(3),
            Self::ParseFailure { .. } => ExitCode::from(4),
            Self::ExtractionFailure { .. } => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for emmyjar operations
pub type Result<T> = std::result::Result<T, StubGenError>;
