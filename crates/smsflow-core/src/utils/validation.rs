/// Input validation utilities
use crate::constants::{PHONE_MAX_DIGITS, PHONE_MIN_DIGITS};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Normalizes a phone number into `+<digits>` form.
///
/// The input must start with `+`; every non-digit is dropped and the
/// remaining digit count must lie in `[8, 15]`. Anything else yields `None`.
///
/// # Examples
/// ```
/// use smsflow_core::utils::validation::normalize_phone_number;
///
/// assert_eq!(normalize_phone_number("+1 (555) 123-4567").as_deref(), Some("+15551234567"));
/// assert_eq!(normalize_phone_number("15551234567"), None);
/// assert_eq!(normalize_phone_number("+123"), None);
/// ```
pub fn normalize_phone_number(input: &str) -> Option<String> {
    if !input.starts_with('+') {
        return None;
    }

    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        Some(format!("+{}", digits))
    } else {
        None
    }
}

pub fn is_valid_email_address(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_requires_plus() {
        assert_eq!(normalize_phone_number("15551234567"), None);
        assert_eq!(normalize_phone_number(" +15551234567"), None);
        assert_eq!(normalize_phone_number(""), None);
        assert_eq!(normalize_phone_number("(555) 123-4567"), None);
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(
            normalize_phone_number("+1 (555) 123-4567").as_deref(),
            Some("+15551234567")
        );
        assert_eq!(
            normalize_phone_number("+44 20 7946.0958").as_deref(),
            Some("+442079460958")
        );
        assert_eq!(
            normalize_phone_number("+15551234567").as_deref(),
            Some("+15551234567")
        );
    }

    #[test]
    fn test_normalize_digit_bounds() {
        assert_eq!(normalize_phone_number("+123"), None);
        assert_eq!(normalize_phone_number("+1234567"), None);
        assert_eq!(
            normalize_phone_number("+12345678").as_deref(),
            Some("+12345678")
        );
        assert_eq!(
            normalize_phone_number("+123456789012345").as_deref(),
            Some("+123456789012345")
        );
        assert_eq!(normalize_phone_number("+1234567890123456"), None);
    }

    #[test]
    fn test_normalize_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not counted
        assert_eq!(normalize_phone_number("+١٢٣٤٥٦٧٨٩"), None);
    }

    #[test]
    fn test_validate_email() {
        assert!(is_valid_email_address("test@example.com"));
        assert!(is_valid_email_address("user+tag@example.co.uk"));
        assert!(!is_valid_email_address("invalid"));
        assert!(!is_valid_email_address("@example.com"));
    }
}
