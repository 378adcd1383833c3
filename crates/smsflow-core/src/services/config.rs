/// Configuration service - loads config from environment variables
use crate::constants::{
    DEFAULT_DISPLAY_TIMEZONE, DEFAULT_MAILGUN_API_BASE, DEFAULT_SIGNATURE_TOLERANCE_SECS,
    DEFAULT_TELNYX_API_BASE,
};
use crate::error::RelayError;
use crate::models::{MailgunConfig, RelayConfig, TelnyxConfig};
use chrono_tz::Tz;
use secrecy::SecretString;
use url::Url;

/// Loads the relay configuration from the process environment
pub fn load_config() -> Result<RelayConfig, RelayError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Loads the relay configuration through an arbitrary variable lookup
pub fn load_config_from<F>(lookup: F) -> Result<RelayConfig, RelayError>
where
    F: Fn(&str) -> Option<String>,
{
    let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let required = |name: &str| {
        optional(name).ok_or_else(|| RelayError::Config(format!("Missing {} env var", name)))
    };
    let url = |name: &str, default: &str| {
        let raw = optional(name).unwrap_or_else(|| default.to_string());
        Url::parse(&raw).map_err(|e| RelayError::Config(format!("Invalid {}: {}", name, e)))
    };

    let timezone_name =
        optional("DISPLAY_TIMEZONE").unwrap_or_else(|| DEFAULT_DISPLAY_TIMEZONE.to_string());
    let display_timezone: Tz = timezone_name.parse().map_err(|e| {
        RelayError::Config(format!(
            "Invalid DISPLAY_TIMEZONE '{}': {}",
            timezone_name, e
        ))
    })?;

    let webhook_tolerance_secs = match optional("WEBHOOK_TOLERANCE_SECS") {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
            RelayError::Config(format!("Invalid WEBHOOK_TOLERANCE_SECS '{}': {}", raw, e))
        })?,
        None => DEFAULT_SIGNATURE_TOLERANCE_SECS,
    };

    let metrics_enabled = !matches!(
        optional("METRICS_ENABLED")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref(),
        Some("false" | "0" | "no" | "off")
    );

    let config = RelayConfig {
        telnyx: TelnyxConfig {
            api_key: SecretString::from(required("TELNYX_API_KEY")?),
            api_base: url("TELNYX_API_BASE", DEFAULT_TELNYX_API_BASE)?,
        },
        mailgun: MailgunConfig {
            api_key: SecretString::from(required("MAILGUN_API_KEY")?),
            domain: required("MAILGUN_DOMAIN")?,
            from: required("EMAIL_FROM")?,
            api_base: url("MAILGUN_API_BASE", DEFAULT_MAILGUN_API_BASE)?,
        },
        routes_table: required("ROUTES_TABLE")?,
        display_timezone,
        webhook_public_key: optional("TELNYX_PUBLIC_KEY"),
        webhook_tolerance_secs,
        metrics_enabled,
    };

    config
        .validate()
        .map_err(|e| RelayError::Config(format!("Invalid configuration: {}", e)))?;

    tracing::info!(
        timezone = %config.display_timezone,
        signature_check = config.webhook_public_key.is_some(),
        metrics = config.metrics_enabled,
        "Configuration validated successfully"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("TELNYX_API_KEY", "KEY0123".to_string()),
            ("MAILGUN_API_KEY", "key-abc".to_string()),
            ("MAILGUN_DOMAIN", "mg.acme.com".to_string()),
            ("EMAIL_FROM", "sms@acme.com".to_string()),
            ("ROUTES_TABLE", "smsflow-routes-dev".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<RelayConfig, RelayError> {
        load_config_from(|name| env.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.telnyx.api_base.as_str(), "https://api.telnyx.com/");
        assert_eq!(config.mailgun.api_base.as_str(), "https://api.mailgun.net/");
        assert_eq!(config.display_timezone, chrono_tz::America::New_York);
        assert_eq!(config.telnyx.api_key.expose_secret(), "KEY0123");
        assert!(config.webhook_public_key.is_none());
        assert_eq!(config.webhook_tolerance_secs, 300);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_missing_required_var() {
        let mut env = base_env();
        env.remove("MAILGUN_DOMAIN");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("MAILGUN_DOMAIN"));
    }

    #[test]
    fn test_blank_required_var() {
        let mut env = base_env();
        env.insert("TELNYX_API_KEY", "   ".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut env = base_env();
        env.insert("DISPLAY_TIMEZONE", "Asia/Tokyo".to_string());
        env.insert("TELNYX_API_BASE", "http://localhost:9000".to_string());
        env.insert(
            "TELNYX_PUBLIC_KEY",
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".to_string(),
        );
        env.insert("WEBHOOK_TOLERANCE_SECS", "60".to_string());
        env.insert("METRICS_ENABLED", "false".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.display_timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(config.telnyx.api_base.as_str(), "http://localhost:9000/");
        assert!(config.webhook_public_key.is_some());
        assert_eq!(config.webhook_tolerance_secs, 60);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_invalid_timezone() {
        let mut env = base_env();
        env.insert("DISPLAY_TIMEZONE", "Mars/Olympus".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("DISPLAY_TIMEZONE"));
    }

    #[test]
    fn test_invalid_webhook_settings() {
        let mut env = base_env();
        env.insert("TELNYX_PUBLIC_KEY", "c2hvcnQ=".to_string());
        assert!(matches!(load(&env), Err(RelayError::Config(_))));

        let mut env = base_env();
        env.insert("WEBHOOK_TOLERANCE_SECS", "five minutes".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_TOLERANCE_SECS"));
    }

    #[test]
    fn test_invalid_sender() {
        let mut env = base_env();
        env.insert("EMAIL_FROM", "sms-relay".to_string());
        assert!(matches!(load(&env), Err(RelayError::Config(_))));
    }
}
