use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PracticeGenError {
    #[error("Invalid input. Please submit a valid input")]
    Parse { reason: String },

    #[error("Invalid categories: {}", .names.join(", "))]
    UnknownCategory { names: Vec<String> },

    #[error("Categories listed more than once: {}", .names.join(", "))]
    DuplicateCategory { names: Vec<String> },

    #[error("Invalid number of problems for {category}: {token}")]
    InvalidCount { category: String, token: String },

    #[error("Output directory already exists: {path}")]
    OutputExists { path: PathBuf },

    #[error("Two problems would be written to the same path: {path}")]
    PathCollision { path: PathBuf },

    #[error("Categories directory not found: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("Templates directory not found: {path}")]
    TemplatesNotFound { path: PathBuf },

    #[error("Problem '{problem}' in category '{category}' has no spec file (expected {spec})")]
    MissingSpec {
        category: String,
        problem: PathBuf,
        spec: PathBuf,
    },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PracticeGenError>;

impl PracticeGenError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Errors the user can fix by answering the prompt again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::UnknownCategory { .. }
                | Self::DuplicateCategory { .. }
                | Self::InvalidCount { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse { .. } => 2,
            Self::UnknownCategory { .. } | Self::DuplicateCategory { .. } => 3,
            Self::InvalidCount { .. } => 4,
            Self::OutputExists { .. } | Self::PathCollision { .. } => 5,
            Self::CatalogNotFound { .. }
            | Self::TemplatesNotFound { .. }
            | Self::MissingSpec { .. } => 6,
            _ => 1,
        }
    }
}
