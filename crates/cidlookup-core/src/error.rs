//! Error types for cidlookup

/// Result type alias using cidlookup's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cidlookup operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input table is missing, unreadable, empty, or lacks required columns.
    ///
    /// The message is meant to be shown to the user as-is.
    #[error("{0}")]
    DataFormat(String),

    /// Classifier policy errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new data format error
    pub fn data_format(msg: impl Into<String>) -> Self {
        Self::DataFormat(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from validating the input table
    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat(_))
    }
}
