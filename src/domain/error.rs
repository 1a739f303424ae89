use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    /// Uploaded file name does not carry the accepted extension
    InvalidFileType(String),
    /// Fewer than two non-blank lines (no header, or header only)
    EmptyOrHeaderOnlyFile,
    /// Holds a description of the missing column(s), already quoted
    MissingRequiredColumn(String),
    AnalysisInProgress,
    ConfigError(String),
    SerializationError(String),
    Internal(String),
    IoError(String),
}

impl AppError {
    /// Short title used when surfacing the error as a notification
    pub fn title(&self) -> &'static str {
        match self {
            AppError::InvalidFileType(_) => "Invalid File Type",
            _ => "Processing Error",
        }
    }

    /// Whether the error was caused by the uploaded content rather than the service
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFileType(_)
                | AppError::EmptyOrHeaderOnlyFile
                | AppError::MissingRequiredColumn(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidFileType(_) => write!(f, "Please upload a CSV file."),
            AppError::EmptyOrHeaderOnlyFile => write!(
                f,
                "CSV file must contain headers and at least one row of data."
            ),
            AppError::MissingRequiredColumn(columns) => {
                write!(f, "CSV must contain {} column.", columns)
            }
            AppError::AnalysisInProgress => {
                write!(f, "An analysis is already in progress, try again when it finishes.")
            }
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
