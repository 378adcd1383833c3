/// Renders inbound messages as forwarded emails
use crate::constants::TIMESTAMP_FORMAT;
use crate::models::ForwardedEmail;
use crate::utils::sanitization::{escape_html, strip_tags};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Renders the provider timestamp in `timezone` with its zone abbreviation.
/// Missing or unparseable values fall back to the current time.
pub fn format_timestamp(occurred_at: Option<&str>, timezone: Tz) -> String {
    let instant = occurred_at
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| {
            if let Some(raw) = occurred_at {
                tracing::debug!(occurred_at = %raw, "Unparseable timestamp, using current time");
            }
            Utc::now()
        });

    instant
        .with_timezone(&timezone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub struct EmailComposer {
    from: String,
    timezone: Tz,
}

impl EmailComposer {
    pub fn new(from: impl Into<String>, timezone: Tz) -> Self {
        Self {
            from: from.into(),
            timezone,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Builds the HTML body and its plain-text fallback
    pub fn compose(
        &self,
        recipient: &str,
        sender: &str,
        received_at: &str,
        text: &str,
        media_html: &str,
    ) -> ForwardedEmail {
        let message = escape_html(text).replace("\r\n", "\n").replace('\n', "<br>");

        let html = format!(
            concat!(
                r#"<div style="font-family: Arial, sans-serif;">"#,
                "<p><strong>From:</strong> {}</p>",
                "<p><strong>Received:</strong> {}</p>",
                "<p><strong>Message:</strong></p>",
                "<p>{}</p>",
                "{}",
                "</div>"
            ),
            escape_html(sender),
            escape_html(received_at),
            message,
            media_html
        );
        let text = strip_tags(&html).trim().to_string();

        ForwardedEmail {
            from: self.from.clone(),
            to: recipient.to_string(),
            subject: format!("New SMS from {}", sender),
            html,
            text,
        }
    }
}
