/// Auto-reply delivery through the Telnyx messaging API
use crate::constants::TELNYX_MESSAGES_PATH;
use crate::error::RelayError;
use crate::models::{OutboundReply, TelnyxConfig};
use crate::utils::logging::redact_phone;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{error, info};

#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), RelayError>;
}

pub struct TelnyxReplySender {
    client: reqwest::Client,
    config: TelnyxConfig,
}

impl TelnyxReplySender {
    pub fn new(client: reqwest::Client, config: TelnyxConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ReplySender for TelnyxReplySender {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), RelayError> {
        let endpoint = self
            .config
            .api_base
            .join(TELNYX_MESSAGES_PATH)
            .map_err(|e| RelayError::Telephony(format!("Invalid messages endpoint: {}", e)))?;

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(reply)
            .send()
            .await
            .map_err(|e| RelayError::Telephony(format!("Failed to send reply: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                to = %redact_phone(&reply.to),
                body = %body,
                "Telnyx rejected auto-reply"
            );
            return Err(RelayError::Telephony(format!(
                "Telnyx returned {}: {}",
                status, body
            )));
        }

        info!(
            from = %redact_phone(&reply.from),
            to = %redact_phone(&reply.to),
            "Auto-reply sent"
        );
        Ok(())
    }
}
