use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Task API error: {0}")]
    TaskApi(#[from] TaskApiError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskApiError {
    #[error("Task start rejected with status {status_code}")]
    StartRejected { status_code: u16 },

    #[error("Task status query failed with status {status_code}")]
    StatusUnavailable { status_code: u16 },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Invalid view transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
