use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!(code = %self.error_code(), "CoreError: {}", self);
        match self {
            CoreError::TaskApi(e) => {
                error!(code = %e.error_code(), "Task API error details: {:?}", e);
            }
            CoreError::View(e) => {
                error!(code = %e.error_code(), "View error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!(code = %e.error_code(), "Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = %self.error_code(), "CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::TaskApi(e) => e.user_friendly_message(),
            CoreError::View(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check that the backend is reachable.".to_string()
            }
            CoreError::InvalidInput { message } => message.clone(),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::TaskApi(_) => "TASK_API".to_string(),
            CoreError::View(_) => "VIEW".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for TaskApiError {
    fn log_error(&self) -> &Self {
        error!(code = %self.error_code(), "TaskApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = %self.error_code(), "TaskApiError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            TaskApiError::StartRejected { status_code } => format!(
                "The backend refused to start the task (HTTP {}).",
                status_code
            ),
            TaskApiError::StatusUnavailable { status_code } => format!(
                "The backend could not report task progress (HTTP {}).",
                status_code
            ),
            TaskApiError::RequestTimeout => {
                "The backend did not answer in time. Please try again.".to_string()
            }
            TaskApiError::InvalidResponse { .. } => {
                "The backend sent a response that could not be understood.".to_string()
            }
            TaskApiError::InvalidEndpoint { url } => {
                format!("'{}' is not a usable backend address.", url)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            TaskApiError::StartRejected { .. } => "TASK_START_REJECTED".to_string(),
            TaskApiError::StatusUnavailable { .. } => "TASK_STATUS_UNAVAILABLE".to_string(),
            TaskApiError::RequestTimeout => "TASK_TIMEOUT".to_string(),
            TaskApiError::InvalidResponse { .. } => "TASK_INVALID_RESPONSE".to_string(),
            TaskApiError::InvalidEndpoint { .. } => "TASK_INVALID_ENDPOINT".to_string(),
        }
    }
}

impl ErrorExt for ViewError {
    fn log_error(&self) -> &Self {
        error!(code = %self.error_code(), "ViewError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = %self.error_code(), "ViewError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ViewError::InvalidTransition { from, to } => {
                format!("The page cannot switch from {} to {} right now.", from, to)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ViewError::InvalidTransition { .. } => "VIEW_INVALID_TRANSITION".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!(code = %self.error_code(), "ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = %self.error_code(), "ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' was not found.", path)
            }
            ConfigError::InvalidValue { field, value } => {
                format!("Configuration field '{}' has an invalid value '{}'.", field, value)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file is not valid TOML. Please check the syntax.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}
