/// Route configuration stored per destination number
use crate::constants::{MODE_AUTO_REPLY, MODE_FORWARD_EMAIL};
use crate::models::lenient::lenient;
use serde::{Deserialize, Serialize};

/// Route record as written by an administrator into the key-value store.
///
/// Any JSON object loads; a field of the wrong type reads as absent. Whether
/// the fields required by the mode are present is checked at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode<'a> {
    AutoReply,
    ForwardEmail,
    /// Anything else, including a missing mode (empty string)
    Unsupported(&'a str),
}

impl RouteConfig {
    pub fn auto_reply(reply_text: impl Into<String>) -> Self {
        Self {
            mode: Some(MODE_AUTO_REPLY.to_string()),
            reply_text: Some(reply_text.into()),
            email: None,
        }
    }

    pub fn forward_email(email: impl Into<String>) -> Self {
        Self {
            mode: Some(MODE_FORWARD_EMAIL.to_string()),
            reply_text: None,
            email: Some(email.into()),
        }
    }

    pub fn mode(&self) -> RouteMode<'_> {
        match self.mode.as_deref() {
            Some(MODE_AUTO_REPLY) => RouteMode::AutoReply,
            Some(MODE_FORWARD_EMAIL) => RouteMode::ForwardEmail,
            Some(other) => RouteMode::Unsupported(other),
            None => RouteMode::Unsupported(""),
        }
    }

    /// Reply text exactly as configured, unless missing or blank
    pub fn reply_text(&self) -> Option<&str> {
        self.reply_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Forwarding address with surrounding whitespace removed, unless blank
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
