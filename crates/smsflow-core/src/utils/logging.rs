/// Logging utilities for PII redaction and secure logging
///
/// Phone numbers, email addresses and message bodies pass through these
/// helpers before they reach a log line.
use regex::Regex;
use std::sync::LazyLock;

// Email redaction regex
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Redacts a phone number, keeping the country prefix and the last 4 digits
///
/// # Examples
/// ```
/// use smsflow_core::utils::logging::redact_phone;
///
/// assert_eq!(redact_phone("+15551234567"), "+15***4567");
/// assert_eq!(redact_phone("+1234"), "***");
/// ```
pub fn redact_phone(number: &str) -> String {
    const VISIBLE_PREFIX: usize = 3;
    const VISIBLE_SUFFIX: usize = 4;

    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return "***".to_string();
    }

    let prefix: String = chars[..VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("{}***{}", prefix, suffix)
}

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use smsflow_core::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// assert_eq!(redact_email("Contact: test@acme.com for help"), "Contact: ***@acme.com for help");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if let Some(at_pos) = email.find('@') {
                format!("***{}", &email[at_pos..])
            } else {
                "***@***".to_string()
            }
        })
        .to_string()
}

/// Redacts message body for logging (shows length only)
pub fn redact_body(body: &str) -> String {
    format!("[{} bytes]", body.len())
}
