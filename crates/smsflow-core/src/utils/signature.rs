/// Telnyx webhook signature verification
///
/// Telnyx signs `"{timestamp}|{raw body}"` with Ed25519 and sends the base64
/// signature and the unix timestamp in two headers.
use crate::error::RelayError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::signature::{ED25519, UnparsedPublicKey};
use tracing::warn;

const ED25519_PUBLIC_KEY_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    public_key: Vec<u8>,
    tolerance_secs: u64,
}

impl WebhookVerifier {
    /// Builds a verifier from the base64 public key shown in the Telnyx portal
    pub fn from_base64(public_key: &str, tolerance_secs: u64) -> Result<Self, RelayError> {
        let public_key = STANDARD
            .decode(public_key.trim())
            .map_err(|e| RelayError::Config(format!("Webhook public key is not base64: {}", e)))?;

        if public_key.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(RelayError::Config(format!(
                "Webhook public key must be {} bytes, got {}",
                ED25519_PUBLIC_KEY_LEN,
                public_key.len()
            )));
        }

        Ok(Self {
            public_key,
            tolerance_secs,
        })
    }

    /// Checks the signature of a raw body against its timestamp header.
    ///
    /// `now` is the current unix time in seconds.
    pub fn verify(
        &self,
        body: &[u8],
        signature: &str,
        timestamp: &str,
        now: i64,
    ) -> Result<(), RelayError> {
        let signed_at: i64 = timestamp.trim().parse().map_err(|_| {
            warn!(timestamp, "Webhook timestamp is not a unix time");
            RelayError::Signature("invalid timestamp".to_string())
        })?;

        if now.abs_diff(signed_at) > self.tolerance_secs {
            warn!(signed_at, now, "Webhook timestamp outside tolerance");
            return Err(RelayError::Signature("stale timestamp".to_string()));
        }

        let signature = STANDARD.decode(signature.trim()).map_err(|_| {
            warn!("Webhook signature is not base64");
            RelayError::Signature("invalid signature encoding".to_string())
        })?;

        let mut message = Vec::with_capacity(timestamp.len() + 1 + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.push(b'|');
        message.extend_from_slice(body);

        UnparsedPublicKey::new(&ED25519, &self.public_key)
            .verify(&message, &signature)
            .map_err(|_| RelayError::Signature("signature mismatch".to_string()))
    }
}
