use crate::utils::error::{ProfileError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ProfileError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProfileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// GitHub 登入名稱：1-39 個英數字或連字號，不可以連字號開頭或結尾，也不可連續
pub fn validate_github_username(field_name: &str, username: &str) -> Result<()> {
    let invalid = |reason: &str| ProfileError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: username.to_string(),
        reason: reason.to_string(),
    };

    if username.is_empty() {
        return Err(ProfileError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    if username.len() > 39 {
        return Err(invalid("Username cannot be longer than 39 characters"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(invalid(
            "Username may only contain alphanumeric characters or hyphens",
        ));
    }
    if username.starts_with('-') || username.ends_with('-') {
        return Err(invalid("Username cannot begin or end with a hyphen"));
    }
    if username.contains("--") {
        return Err(invalid("Username cannot contain consecutive hyphens"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base", "https://api.github.com").is_ok());
        assert!(validate_url("api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("api_base", "").is_err());
        assert!(validate_url("api_base", "invalid-url").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrent_requests", 5, 1).is_ok());
        assert!(validate_positive_number("concurrent_requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("per_page", 100u32, 1, 100).is_ok());
        assert!(validate_range("per_page", 101u32, 1, 100).is_err());
        assert!(validate_range("per_page", 0u32, 1, 100).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("stats_output", "assets/github-stats.svg").is_ok());
        assert!(validate_path("stats_output", "  ").is_err());
        assert!(validate_path("stats_output", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_github_username() {
        assert!(validate_github_username("username", "virgoone").is_ok());
        assert!(validate_github_username("username", "octo-cat42").is_ok());
        assert!(validate_github_username("username", &"a".repeat(39)).is_ok());

        assert!(matches!(
            validate_github_username("username", ""),
            Err(ProfileError::MissingConfigError { .. })
        ));
        assert!(validate_github_username("username", &"a".repeat(40)).is_err());
        assert!(validate_github_username("username", "-virgoone").is_err());
        assert!(validate_github_username("username", "virgoone-").is_err());
        assert!(validate_github_username("username", "virgo--one").is_err());
        assert!(validate_github_username("username", "virgo_one").is_err());
        assert!(validate_github_username("username", "virgo one").is_err());
    }
}
