/// Routing and dispatch of inbound message events
use crate::email::{EmailComposer, format_timestamp};
use crate::error::RelayError;
use crate::models::{
    InboundEvent, MessagePayload, OutboundReply, RelayConfig, RouteConfig, RouteMode,
};
use crate::routing::{KeyValueStore, RouteResolver};
use crate::services::mailgun::{EmailSender, MailgunEmailSender};
use crate::services::media::MediaInliner;
use crate::services::metrics::{Metrics, MetricsService};
use crate::services::telnyx::{ReplySender, TelnyxReplySender};
use crate::utils::logging::{redact_body, redact_email, redact_phone};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// How an event was handled. Every variant is acknowledged with 200; only
/// an `Err` from [`Relay::process`] turns into a failed webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not an inbound `message.received` event
    Ignored,
    InvalidDestination,
    NoRoute,
    MissingReplyText,
    /// Sender failed normalization, so there is nobody to reply to
    InvalidSender,
    MissingEmail,
    UnsupportedMode(String),
    Replied { delivered: bool },
    Forwarded { delivered: bool },
}

pub struct Relay {
    resolver: RouteResolver,
    replies: Arc<dyn ReplySender>,
    emails: Arc<dyn EmailSender>,
    inliner: MediaInliner,
    composer: EmailComposer,
    metrics: Arc<dyn MetricsService>,
}

impl Relay {
    pub fn new(
        resolver: RouteResolver,
        replies: Arc<dyn ReplySender>,
        emails: Arc<dyn EmailSender>,
        inliner: MediaInliner,
        composer: EmailComposer,
        metrics: Arc<dyn MetricsService>,
    ) -> Self {
        Self {
            resolver,
            replies,
            emails,
            inliner,
            composer,
            metrics,
        }
    }

    /// Wires the Telnyx and Mailgun clients from configuration
    pub fn from_config(
        config: &RelayConfig,
        client: reqwest::Client,
        store: Arc<dyn KeyValueStore>,
        metrics: Arc<dyn MetricsService>,
    ) -> Self {
        Self::new(
            RouteResolver::new(store),
            Arc::new(TelnyxReplySender::new(client.clone(), config.telnyx.clone())),
            Arc::new(MailgunEmailSender::new(client.clone(), config.mailgun.clone())),
            MediaInliner::new(client),
            EmailComposer::new(config.mailgun.from.clone(), config.display_timezone),
            metrics,
        )
    }

    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> &Arc<dyn MetricsService> {
        &self.metrics
    }

    /// Handles one webhook event.
    ///
    /// Delivery failures are logged and reported through [`Outcome`]; only
    /// store failures propagate as errors.
    #[tracing::instrument(skip(self, event), fields(event_type = ?event.event_type()))]
    pub async fn process(&self, event: &InboundEvent) -> Result<Outcome, RelayError> {
        let start = Instant::now();
        let outcome = self.dispatch(event).await;
        Metrics::processing_time(self.metrics.as_ref(), start.elapsed().as_millis() as f64).await;
        outcome
    }

    async fn dispatch(&self, event: &InboundEvent) -> Result<Outcome, RelayError> {
        let Some(data) = event.inbound_message() else {
            info!(
                direction = ?event.data.as_ref().and_then(|d| d.payload.direction.as_deref()),
                "Ignoring event that is not an inbound message"
            );
            Metrics::event_ignored(self.metrics.as_ref()).await;
            return Ok(Outcome::Ignored);
        };

        let payload = &data.payload;
        let Some(destination) = payload.destination_number() else {
            error!(
                destination = ?payload.destination_raw().map(redact_phone),
                "Invalid destination number"
            );
            return Ok(Outcome::InvalidDestination);
        };

        let Some(route) = self.resolver.get_route(&destination).await? else {
            error!(destination = %redact_phone(&destination), "No route configured");
            Metrics::route_missing(self.metrics.as_ref()).await;
            return Ok(Outcome::NoRoute);
        };

        match route.mode() {
            RouteMode::AutoReply => Ok(self.auto_reply(&route, &destination, payload).await),
            RouteMode::ForwardEmail => {
                Ok(self
                    .forward_email(&route, data.occurred_at.as_deref(), payload)
                    .await)
            }
            RouteMode::Unsupported(mode) => {
                warn!(
                    destination = %redact_phone(&destination),
                    mode = %mode,
                    "Unsupported route mode"
                );
                Metrics::unsupported_mode(self.metrics.as_ref(), mode).await;
                Ok(Outcome::UnsupportedMode(mode.to_string()))
            }
        }
    }

    async fn auto_reply(
        &self,
        route: &RouteConfig,
        destination: &str,
        payload: &MessagePayload,
    ) -> Outcome {
        let Some(reply_text) = route.reply_text() else {
            error!(
                destination = %redact_phone(destination),
                "auto_reply route has no reply_text"
            );
            return Outcome::MissingReplyText;
        };

        let Some(sender) = payload.sender_number() else {
            warn!(
                destination = %redact_phone(destination),
                "Sender number invalid, skipping auto-reply"
            );
            return Outcome::InvalidSender;
        };

        let reply = OutboundReply {
            from: destination.to_string(),
            to: sender,
            text: reply_text.to_string(),
        };

        let delivered = match self.replies.send_reply(&reply).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, to = %redact_phone(&reply.to), "Auto-reply failed");
                false
            }
        };
        Metrics::reply_attempted(self.metrics.as_ref(), delivered).await;

        Outcome::Replied { delivered }
    }

    async fn forward_email(
        &self,
        route: &RouteConfig,
        occurred_at: Option<&str>,
        payload: &MessagePayload,
    ) -> Outcome {
        let Some(recipient) = route.email() else {
            error!("forward_email route has no email");
            return Outcome::MissingEmail;
        };

        let received_at = format_timestamp(occurred_at, self.composer.timezone());
        let media = self.inliner.inline(payload.media()).await;
        Metrics::media_inlined(self.metrics.as_ref(), media.inlined, media.failed).await;

        let sender = payload.sender_display();
        let text = payload.message_text();
        let email = self
            .composer
            .compose(recipient, &sender, &received_at, text, &media.html);

        info!(
            to = %redact_email(recipient),
            from = %redact_phone(&sender),
            text = %redact_body(text),
            media = media.inlined,
            "Forwarding message as email"
        );

        let delivered = match self.emails.send_email(&email).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, to = %redact_email(recipient), "Email forward failed");
                false
            }
        };
        Metrics::email_attempted(self.metrics.as_ref(), delivered).await;

        Outcome::Forwarded { delivered }
    }
}
