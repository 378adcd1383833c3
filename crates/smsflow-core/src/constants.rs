/// Application constants
///
/// This module contains all hardcoded values used throughout the relay.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Webhook Event Constants
// ============================================================================
/// Event type of an incoming message notification
pub const EVENT_MESSAGE_RECEIVED: &str = "message.received";

/// Direction tag of messages sent to one of our numbers
pub const DIRECTION_INBOUND: &str = "inbound";

/// Header carrying the base64 Ed25519 signature of a Telnyx webhook
pub const SIGNATURE_HEADER: &str = "telnyx-signature-ed25519";

/// Header carrying the unix timestamp covered by the signature
pub const TIMESTAMP_HEADER: &str = "telnyx-timestamp";

/// Accepted clock difference between the signed timestamp and now
pub const DEFAULT_SIGNATURE_TOLERANCE_SECS: u64 = 300;

// ============================================================================
// Phone Number Constants
// ============================================================================

/// Minimum number of digits in a canonical phone number
pub const PHONE_MIN_DIGITS: usize = 8;

/// Maximum number of digits in a canonical phone number (E.164)
pub const PHONE_MAX_DIGITS: usize = 15;

/// Display value used when the sender number is missing or malformed
pub const UNKNOWN_SENDER: &str = "(Unknown)";

/// Text used when the message carries no body
pub const EMPTY_MESSAGE_TEXT: &str = "(no text)";

// ============================================================================
// Routing Constants
// ============================================================================

/// Key prefix of route entries in the key-value store
pub const ROUTE_KEY_PREFIX: &str = "route:";

/// Route mode that answers with an SMS
pub const MODE_AUTO_REPLY: &str = "auto_reply";

/// Route mode that forwards the message by email
pub const MODE_FORWARD_EMAIL: &str = "forward_email";

/// DynamoDB attribute holding the route key
pub const STORE_KEY_ATTRIBUTE: &str = "key";

/// DynamoDB attribute holding the route JSON
pub const STORE_VALUE_ATTRIBUTE: &str = "value";

// ============================================================================
// Provider Constants
// ============================================================================

/// Default Telnyx API base URL
pub const DEFAULT_TELNYX_API_BASE: &str = "https://api.telnyx.com";

/// Telnyx message send path
pub const TELNYX_MESSAGES_PATH: &str = "/v2/messages";

/// Default Mailgun API base URL
pub const DEFAULT_MAILGUN_API_BASE: &str = "https://api.mailgun.net";

/// Basic auth user name for Mailgun
pub const MAILGUN_API_USER: &str = "api";

// ============================================================================
// Email Rendering Constants
// ============================================================================

/// Time zone used to render message timestamps
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "America/New_York";

/// Timestamp format, including the zone abbreviation
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Maximum display width of inlined images in pixels
pub const MEDIA_MAX_WIDTH_PX: u32 = 600;

/// Content type prefix of media we inline
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

// ============================================================================
// Metrics Constants
// ============================================================================

/// CloudWatch metrics namespace
pub const METRICS_NAMESPACE: &str = "SmsFlow";
