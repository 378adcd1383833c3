/// Outbound message types sent to the providers
use serde::Serialize;

/// SMS reply sent through the telephony API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundReply {
    pub from: String,
    pub to: String,
    pub text: String,
}

/// Forwarded message, encoded as a form for the email API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardedEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}
