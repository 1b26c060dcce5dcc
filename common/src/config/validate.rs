pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn validate_duration_ms(name: &str, value: u64) -> Result<(), String> {
    if value == 0 {
        return Err(format!("{} must be greater than 0", name));
    }
    Ok(())
}

pub fn validate_http_url(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", name));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(format!("{} must start with http:// or https://, got '{}'", name, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url_validation() {
        assert!(validate_http_url("base_url", "http://localhost:8000").is_ok());
        assert!(validate_http_url("base_url", "https://games.example.org").is_ok());
        assert!(validate_http_url("base_url", "").is_err());
        assert!(validate_http_url("base_url", "ws://localhost").is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(validate_duration_ms("notice_duration_ms", 0).is_err());
        assert!(validate_duration_ms("notice_duration_ms", 1).is_ok());
    }
}
