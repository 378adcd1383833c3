/// Email delivery through the Mailgun messages API
use crate::constants::MAILGUN_API_USER;
use crate::error::RelayError;
use crate::models::{ForwardedEmail, MailgunConfig};
use crate::utils::logging::redact_email;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{error, info};

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, email: &ForwardedEmail) -> Result<(), RelayError>;
}

pub struct MailgunEmailSender {
    client: reqwest::Client,
    config: MailgunConfig,
}

impl MailgunEmailSender {
    pub fn new(client: reqwest::Client, config: MailgunConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl EmailSender for MailgunEmailSender {
    async fn send_email(&self, email: &ForwardedEmail) -> Result<(), RelayError> {
        let endpoint = self
            .config
            .api_base
            .join(&format!("/v3/{}/messages", self.config.domain))
            .map_err(|e| RelayError::Email(format!("Invalid messages endpoint: {}", e)))?;

        let response = self
            .client
            .post(endpoint)
            .basic_auth(MAILGUN_API_USER, Some(self.config.api_key.expose_secret()))
            .form(email)
            .send()
            .await
            .map_err(|e| RelayError::Email(format!("Failed to send email: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                to = %redact_email(&email.to),
                body = %body,
                "Mailgun rejected forwarded email"
            );
            return Err(RelayError::Email(format!(
                "Mailgun returned {}: {}",
                status, body
            )));
        }

        info!(to = %redact_email(&email.to), subject = %email.subject, "Email forwarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use url::Url;
    use wiremock::matchers::{basic_auth, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender(server: &MockServer) -> MailgunEmailSender {
        MailgunEmailSender::new(
            reqwest::Client::new(),
            MailgunConfig {
                api_key: SecretString::from("key-test"),
                domain: "mg.acme.com".to_string(),
                from: "sms@acme.com".to_string(),
                api_base: Url::parse(&server.uri()).unwrap(),
            },
        )
    }

    fn email() -> ForwardedEmail {
        ForwardedEmail {
            from: "sms@acme.com".to_string(),
            to: "ops@acme.com".to_string(),
            subject: "New SMS from +15551234567".to_string(),
            html: "<p>hi</p>".to_string(),
            text: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mg.acme.com/messages"))
            .and(basic_auth("api", "key-test"))
            .and(body_string_contains("to=ops%40acme.com"))
            .and(body_string_contains("subject=New+SMS+from+%2B15551234567"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "<20240501.1@mg.acme.com>",
                "message": "Queued. Thank you."
            })))
            .expect(1)
            .mount(&server)
            .await;

        sender(&server).send_email(&email()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_email_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let err = sender(&server).send_email(&email()).await.unwrap_err();
        assert!(matches!(err, RelayError::Email(_)));
    }
}
