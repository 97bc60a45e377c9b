use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiCaseError {
    #[error("Malformed template {path}: {reason}")]
    MalformedTemplate { path: String, reason: String },

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input is not a directory: {}", .0.display())]
    InputNotADirectory(PathBuf),

    #[error("Input is not a file: {}", .0.display())]
    InputNotAFile(PathBuf),

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ApiCaseError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process status code reported by the CLI for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_) => 3,
            Self::InputNotADirectory(_) | Self::InputNotAFile(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiCaseError>;
