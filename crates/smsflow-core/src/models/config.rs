/// Configuration models
use crate::error::RelayError;
use crate::utils::signature::WebhookVerifier;
use crate::utils::validation::is_valid_email_address;
use chrono_tz::Tz;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Relay configuration, built once per cold start
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub telnyx: TelnyxConfig,
    pub mailgun: MailgunConfig,
    /// DynamoDB table holding `route:<number>` entries
    pub routes_table: String,
    /// Zone used to render message timestamps in forwarded emails
    pub display_timezone: Tz,
    /// Base64 Ed25519 public key; webhook signatures are checked when set
    pub webhook_public_key: Option<String>,
    /// Allowed age of a signed webhook timestamp
    pub webhook_tolerance_secs: u64,
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct TelnyxConfig {
    pub api_key: SecretString,
    pub api_base: Url,
}

#[derive(Debug, Clone)]
pub struct MailgunConfig {
    pub api_key: SecretString,
    /// Sending domain, part of the messages endpoint path
    pub domain: String,
    /// Sender address of forwarded emails
    pub from: String,
    pub api_base: Url,
}

impl RelayConfig {
    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.telnyx.api_key.expose_secret().trim().is_empty() {
            return Err("Telnyx API key is empty".to_string());
        }

        if self.mailgun.api_key.expose_secret().trim().is_empty() {
            return Err("Mailgun API key is empty".to_string());
        }

        if self.mailgun.domain.trim().is_empty() {
            return Err("Mailgun domain is empty".to_string());
        }

        if !is_valid_email_address(&self.mailgun.from) {
            return Err(format!("Invalid sender address: {}", self.mailgun.from));
        }

        if self.routes_table.trim().is_empty() {
            return Err("Routes table not configured".to_string());
        }

        for base in [&self.telnyx.api_base, &self.mailgun.api_base] {
            if !matches!(base.scheme(), "http" | "https") {
                return Err(format!("Unsupported API base URL: {}", base));
            }
        }

        self.webhook_verifier().map_err(|e| e.to_string())?;

        Ok(())
    }

    /// Signature verifier for incoming webhooks, if a public key is configured
    pub fn webhook_verifier(&self) -> Result<Option<WebhookVerifier>, RelayError> {
        self.webhook_public_key
            .as_deref()
            .map(|key| WebhookVerifier::from_base64(key, self.webhook_tolerance_secs))
            .transpose()
    }
}

#[cfg(test)]
pub(crate) fn test_config(telnyx_base: &str, mailgun_base: &str) -> RelayConfig {
    RelayConfig {
        telnyx: TelnyxConfig {
            api_key: SecretString::from("telnyx-test-key"),
            api_base: Url::parse(telnyx_base).unwrap(),
        },
        mailgun: MailgunConfig {
            api_key: SecretString::from("mailgun-test-key"),
            domain: "mg.acme.com".to_string(),
            from: "relay@acme.com".to_string(),
            api_base: Url::parse(mailgun_base).unwrap(),
        },
        routes_table: "smsflow-routes".to_string(),
        display_timezone: chrono_tz::America::New_York,
        webhook_public_key: None,
        webhook_tolerance_secs: crate::constants::DEFAULT_SIGNATURE_TOLERANCE_SECS,
        metrics_enabled: false,
    }
}
