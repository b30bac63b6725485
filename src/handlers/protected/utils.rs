use crate::error::ApiError;

/// Parse a numeric path segment, rejecting anything else with 400
pub fn parse_id(raw: &str, what: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_only() {
        assert_eq!(parse_id("42", "asset").unwrap(), 42);
        assert!(parse_id("abc", "asset").is_err());
        assert!(parse_id("4.2", "asset").is_err());
        assert_eq!(parse_id("x", "maintenance record").unwrap_err().message(), "Invalid maintenance record ID");
    }
}
