use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Scryfall request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockError,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFoundError { what: String },

    #[error("Recognition error: {message}")]
    RecognitionError { message: String },

    #[error("Unknown command: {command}")]
    UnknownCommandError { command: String },
}

impl VaultError {
    pub fn validation(message: impl Into<String>) -> Self {
        VaultError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        VaultError::NotFoundError { what: what.into() }
    }

    pub fn recognition(message: impl Into<String>) -> Self {
        VaultError::RecognitionError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
