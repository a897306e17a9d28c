use url::Url;
use validator::ValidationError;

/// Accepts any well-formed absolute URL (a scheme is mandatory).
///
/// Callers trim the input first; surrounding whitespace is not re-checked here.
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    if url_str.is_empty() {
        let mut err = ValidationError::new("url_empty");
        err.message = Some("URL must not be empty".into());
        return Err(err);
    }

    // The parser silently drops tabs and newlines; the stored text would keep them.
    if url_str.chars().any(|c| c.is_ascii_control()) {
        let mut err = ValidationError::new("url_control_chars");
        err.message = Some("URL must not contain control characters".into());
        return Err(err);
    }

    match Url::parse(url_str) {
        Ok(_) => Ok(()),
        Err(e) => {
            let mut err = ValidationError::new("url_invalid");
            err.message = Some(format!("Invalid URL format: {}", e).into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        // Valid URLs
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?query=value#frag").is_ok());
        assert!(validate_url("https://example.org/page").is_ok());
        assert!(validate_url("ftp://files.example.com/a.txt").is_ok());
        assert!(validate_url("mailto:someone@example.com").is_ok());
        assert!(validate_url("https://example.com/ü").is_ok());

        // Invalid URLs
        assert!(validate_url("").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("http://").is_err());
        assert!(validate_url("https://example.com/a\nb").is_err());
        assert!(validate_url("https://example.com/a\tb").is_err());
        assert!(validate_url("https://exa\u{7f}mple.com").is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(validate_url("").unwrap_err().code, "url_empty");
        assert_eq!(validate_url("not a url").unwrap_err().code, "url_invalid");
        assert_eq!(
            validate_url("https://example.com/a\r\nb").unwrap_err().code,
            "url_control_chars"
        );
    }
}
