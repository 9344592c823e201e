use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocatorError>;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    #[error("'{column}' 컬럼이 CSV 파일에 존재하지 않습니다 (missing column '{column}')")]
    MissingColumn { column: String },

    #[error("Invalid coordinate format: {0}")]
    CoordinateParse(String),

    #[error("Region selection is not complete")]
    EmptySelection,

    #[error("Unknown {kind} '{value}'")]
    InvalidSelection { kind: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl LocatorError {
    /// Errors that stand for a normal intermediate state rather than a fault.
    pub fn is_benign(&self) -> bool {
        matches!(self, LocatorError::EmptySelection)
    }
}
