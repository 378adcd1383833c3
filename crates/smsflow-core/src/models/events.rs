/// Telephony webhook event types
///
/// Every field is decoded leniently: a value of the wrong JSON type reads as
/// absent, so a malformed event is filtered or skipped instead of failing the
/// whole request.
use crate::constants::{
    DIRECTION_INBOUND, EMPTY_MESSAGE_TEXT, EVENT_MESSAGE_RECEIVED, UNKNOWN_SENDER,
};
use crate::models::lenient::{lenient, lenient_list, lenient_or_default};
use crate::utils::validation::normalize_phone_number;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Webhook envelope as delivered by the telephony provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<EventData>,
}

impl InboundEvent {
    /// Builds an event from any JSON value; a non-object body yields an
    /// event without data, which is never an inbound message.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!(error = %e, "Webhook body is not an event envelope");
            Self::default()
        })
    }

    pub fn event_type(&self) -> Option<&str> {
        self.data.as_ref()?.event_type.as_deref()
    }

    /// Event data, only for inbound `message.received` notifications
    pub fn inbound_message(&self) -> Option<&EventData> {
        self.data.as_ref().filter(|data| data.is_inbound_message())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default, deserialize_with = "lenient")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub occurred_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub payload: MessagePayload,
}

impl EventData {
    /// True for message-received notifications about inbound messages
    pub fn is_inbound_message(&self) -> bool {
        self.event_type.as_deref() == Some(EVENT_MESSAGE_RECEIVED)
            && self.payload.direction.as_deref() == Some(DIRECTION_INBOUND)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePayload {
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub from: Option<PhoneIdentity>,
    #[serde(default, deserialize_with = "lenient")]
    pub to: Option<Recipients>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    /// Entries that are not objects are dropped
    #[serde(default, deserialize_with = "lenient_list")]
    pub media: Vec<MediaAttachment>,
}

impl MessagePayload {
    /// Raw destination number, taken from the first recipient when `to` is a list
    pub fn destination_raw(&self) -> Option<&str> {
        match self.to.as_ref()? {
            Recipients::List(list) => list.first()?.phone_number.as_deref(),
            Recipients::Single(identity) => identity.phone_number.as_deref(),
            Recipients::Bare(number) => Some(number.as_str()),
        }
    }

    /// Canonical destination number, used as the routing key
    pub fn destination_number(&self) -> Option<String> {
        self.destination_raw().and_then(normalize_phone_number)
    }

    /// Canonical sender number; `None` means we must not reply to it
    pub fn sender_number(&self) -> Option<String> {
        self.from
            .as_ref()
            .and_then(|from| from.phone_number.as_deref())
            .and_then(normalize_phone_number)
    }

    /// Sender as shown in forwarded emails, never empty
    pub fn sender_display(&self) -> String {
        self.sender_number()
            .unwrap_or_else(|| UNKNOWN_SENDER.to_string())
    }

    pub fn message_text(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => EMPTY_MESSAGE_TEXT,
        }
    }

    pub fn media(&self) -> &[MediaAttachment] {
        &self.media
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneIdentity {
    #[serde(default, deserialize_with = "lenient")]
    pub phone_number: Option<String>,
}

/// The `to` field comes in three shapes; variants are tried in this order
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    List(Vec<PhoneIdentity>),
    Single(PhoneIdentity),
    Bare(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaAttachment {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub content_type: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub url: String,
}
