/// Inlines MMS image attachments into forwarded emails as data URIs
use crate::constants::{IMAGE_CONTENT_TYPE_PREFIX, MEDIA_MAX_WIDTH_PX};
use crate::error::RelayError;
use crate::models::MediaAttachment;
use crate::utils::sanitization::escape_html;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};
use url::Url;

/// HTML produced for one message's attachments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlinedMedia {
    pub html: String,
    pub inlined: usize,
    pub failed: usize,
}

pub struct MediaInliner {
    client: reqwest::Client,
}

impl MediaInliner {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetches every image attachment in order. A failed fetch renders a
    /// placeholder and never stops the remaining attachments.
    pub async fn inline(&self, media: &[MediaAttachment]) -> InlinedMedia {
        let mut result = InlinedMedia::default();

        for attachment in media {
            if !attachment.content_type.starts_with(IMAGE_CONTENT_TYPE_PREFIX) {
                debug!(content_type = %attachment.content_type, "Skipping non-image attachment");
                continue;
            }

            match self.fetch(&attachment.url).await {
                Ok(data) => {
                    debug!(
                        content_type = %attachment.content_type,
                        size = data.len(),
                        "Inlined image attachment"
                    );
                    result
                        .html
                        .push_str(&image_fragment(&attachment.content_type, &data));
                    result.inlined += 1;
                }
                Err(e) => {
                    warn!(url = %attachment.url, error = %e, "Failed to fetch media attachment");
                    result.html.push_str(&failure_fragment(&attachment.url));
                    result.failed += 1;
                }
            }
        }

        result
    }

    async fn fetch(&self, raw_url: &str) -> Result<Vec<u8>, RelayError> {
        let url = Url::parse(raw_url)
            .map_err(|e| RelayError::Media(format!("Invalid media URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::Media(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Media(format!("Media host returned {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Media(format!("Failed to read body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

fn image_fragment(content_type: &str, data: &[u8]) -> String {
    format!(
        r#"<div><img src="data:{};base64,{}" alt="MMS image" style="max-width: {}px; height: auto;"></div>"#,
        escape_html(content_type),
        STANDARD.encode(data),
        MEDIA_MAX_WIDTH_PX
    )
}

fn failure_fragment(url: &str) -> String {
    format!("<p>[failed to load {}]</p>", escape_html(url))
}
