use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

static COUPON_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn coupon_code_regex() -> &'static Regex {
    COUPON_CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Z0-9_-]{4,32}$").expect("coupon code pattern is valid")
    })
}

/// Codes are matched case-insensitively; store and look up the upper-case form
pub fn normalize_coupon_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Check an already-normalized code
pub fn validate_coupon_code(code: &str) -> AppResult<()> {
    if !coupon_code_regex().is_match(code) {
        return Err(AppError::ValidationError(
            "Coupon code must be 4-32 characters of A-Z, 0-9, '_' or '-'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_coupon_code() {
        assert_eq!(normalize_coupon_code("  spring-25 "), "SPRING-25");
        assert_eq!(normalize_coupon_code("BLITZ"), "BLITZ");
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SPRING25").is_ok());
        assert!(validate_coupon_code("OPEN_2026-A").is_ok());
        assert!(validate_coupon_code("ABC").is_err());
        assert!(validate_coupon_code("spring25").is_err());
        assert!(validate_coupon_code("HAS SPACE").is_err());
        assert!(validate_coupon_code(&"A".repeat(33)).is_err());
    }
}
