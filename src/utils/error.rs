use thiserror::Error;

/// Failure at the network boundary. Never aborts a run; the coordinator
/// turns it into a per-source warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP status error: {0}")]
    HttpStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if let Some(status) = err.status() {
            return FetchError::HttpStatus(status.as_u16());
        }
        FetchError::ConnectionFailed(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl HarvestError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HarvestError::ConfigValidationError { .. }
                | HarvestError::MissingConfigError { .. }
                | HarvestError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarvestError::HttpClientError(_) => "Could not initialise the HTTP client".to_string(),
            HarvestError::CsvError(e) => format!("Could not write the CSV report: {}", e),
            HarvestError::IoError(e) => format!("File system error: {}", e),
            HarvestError::SerializationError(e) => {
                format!("Could not write the JSON report: {}", e)
            }
            HarvestError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            HarvestError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            HarvestError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarvestError::HttpClientError(_) => "Check the TLS setup and the configured user agent",
            HarvestError::CsvError(_) | HarvestError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            HarvestError::SerializationError(_) => "Disable the json output format and retry",
            HarvestError::ConfigValidationError { .. }
            | HarvestError::MissingConfigError { .. }
            | HarvestError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or run without --config to use the built-in defaults"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
