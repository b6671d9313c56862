use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Content API returned status {status}: {body}")]
    UpstreamStatusError { status: u16, body: String },

    #[error("GraphQL query failed: {message}")]
    QueryError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Content,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PageError::ApiError(_) | PageError::UpstreamStatusError { .. } => ErrorCategory::Network,
            PageError::QueryError { .. } | PageError::SerializationError(_) => ErrorCategory::Content,
            PageError::IoError(_) => ErrorCategory::Storage,
            PageError::MissingConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Content => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the content API: {}", self),
            ErrorCategory::Content => format!("The content API returned unusable data: {}", self),
            ErrorCategory::Storage => format!("Could not read local content: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PageError::ApiError(_) => "Check network connectivity and the source.endpoint setting",
            PageError::UpstreamStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check source.access_token"
            }
            PageError::UpstreamStatusError { .. } => "Retry later or check the content API status",
            PageError::QueryError { .. } => "Check that the content model still matches the query catalog",
            PageError::SerializationError(_) => "Check the shape of the fetched content entries",
            PageError::IoError(_) => "Check that source.content_dir exists and is readable",
            PageError::MissingConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::ConfigValidationError { .. } => "Fix the configuration file and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
