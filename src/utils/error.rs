use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("GitHub API error {status} for {url}: {body}")]
    GitHubApiError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unexpected {what} response: {found}")]
    UnexpectedResponse { what: String, found: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProfileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfileError::ApiError(_) | ProfileError::GitHubApiError { .. } => {
                ErrorCategory::Network
            }
            ProfileError::ConfigError { .. }
            | ProfileError::MissingConfigError { .. }
            | ProfileError::InvalidConfigValueError { .. }
            | ProfileError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ProfileError::UnexpectedResponse { .. }
            | ProfileError::SerializationError(_)
            | ProfileError::ProcessingError { .. }
            | ProfileError::ValidationError { .. } => ErrorCategory::Data,
            ProfileError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 速率限制與暫時性網路錯誤可重試
            ProfileError::ApiError(e) if e.is_timeout() || e.is_connect() => {
                ErrorSeverity::Medium
            }
            ProfileError::GitHubApiError { status, .. } if *status == 403 || *status == 429 => {
                ErrorSeverity::Medium
            }
            ProfileError::GitHubApiError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            ProfileError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProfileError::ApiError(_) => "Check network connectivity and retry",
            ProfileError::GitHubApiError { status: 401, .. } => {
                "The token was rejected; refresh GITHUB_TOKEN or GH_TOKEN"
            }
            ProfileError::GitHubApiError { status: 403 | 429, .. } => {
                "Rate limit reached; set GITHUB_TOKEN or wait for the limit to reset"
            }
            ProfileError::GitHubApiError { status: 404, .. } => {
                "Check that the username exists on GitHub"
            }
            ProfileError::GitHubApiError { .. } => "GitHub returned an error; retry later",
            ProfileError::UnexpectedResponse { .. } => {
                "The API base may not point at a GitHub REST API"
            }
            ProfileError::IoError(_) => "Check that output paths are writable",
            ProfileError::SerializationError(_) => "The API returned malformed JSON; retry later",
            ProfileError::ConfigError { .. }
            | ProfileError::MissingConfigError { .. }
            | ProfileError::InvalidConfigValueError { .. }
            | ProfileError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
            ProfileError::ProcessingError { .. } | ProfileError::ValidationError { .. } => {
                "Inspect the input data with --verbose"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProfileError::GitHubApiError { status, url, .. } => {
                format!("GitHub answered {} for {}", status, url)
            }
            ProfileError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            ProfileError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ProfileError {
        ProfileError::GitHubApiError {
            status,
            url: "https://api.github.com/users/virgoone".to_string(),
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        assert_eq!(api_error(403).severity(), ErrorSeverity::Medium);
        assert_eq!(api_error(429).severity(), ErrorSeverity::Medium);
        assert_eq!(api_error(502).severity(), ErrorSeverity::Medium);
        assert_eq!(api_error(404).severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_categories() {
        assert_eq!(api_error(404).category(), ErrorCategory::Network);
        let missing = ProfileError::MissingConfigError {
            field: "profile.username".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        let io = ProfileError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.category(), ErrorCategory::System);
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_display_keeps_response_body() {
        let err = ProfileError::GitHubApiError {
            status: 404,
            url: "https://api.github.com/users/ghost".to_string(),
            body: "{\"message\":\"Not Found\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API error 404 for https://api.github.com/users/ghost: {\"message\":\"Not Found\"}"
        );
        assert_eq!(
            err.recovery_suggestion(),
            "Check that the username exists on GitHub"
        );
    }

    #[test]
    fn test_user_friendly_message_for_invalid_value() {
        let err = ProfileError::InvalidConfigValueError {
            field: "per_page".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 100".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Setting 'per_page' is invalid: Value must be between 1 and 100"
        );
    }
}
