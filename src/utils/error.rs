use thiserror::Error;

/// Banner text used when the backend gives no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get career recommendations. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Configuration,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ApiError(_) | AppError::Timeout { .. } | AppError::Cancelled => {
                ErrorCategory::Network
            }
            AppError::Http { .. } => ErrorCategory::Server,
            AppError::IoError(_) => ErrorCategory::Storage,
            AppError::SerializationError(_) | AppError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cancelled => ErrorSeverity::Low,
            AppError::ApiError(_) | AppError::Timeout { .. } => ErrorSeverity::Medium,
            AppError::Http { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            AppError::Http { .. }
            | AppError::SerializationError(_)
            | AppError::ValidationError { .. } => ErrorSeverity::High,
            AppError::IoError(_)
            | AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and reachable, then resubmit",
            ErrorCategory::Server => "Review the profile fields and resubmit; the backend may be overloaded",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::Data => "The backend response could not be read; try again later",
        }
    }

    /// Text suitable for the inline error banner.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            AppError::Http { .. } | AppError::ApiError(_) | AppError::SerializationError(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
