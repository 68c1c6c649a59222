use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from the external text moderation service
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Failed to build moderation HTTP client: {source}")]
    ClientInit { source: reqwest::Error },

    #[error("Moderation request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("Moderation service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Moderation service returned an unparseable body: {body}")]
    UnexpectedBody { body: String },
}

/// Trait defining the interface to the external profanity check
#[async_trait]
pub trait ProfanityClient: Send + Sync {
    /// Whether the given text contains disallowed words
    async fn contains_profanity(&self, text: &str) -> Result<bool, ModerationError>;
}

/// Purgomalum-style HTTP implementation of the ProfanityClient trait
///
/// The service answers `GET {base_url}/containsprofanity?text=...` with a
/// plain `true` or `false` body.
pub struct PurgomalumClient {
    http: reqwest::Client,
    base_url: String,
}

impl PurgomalumClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ModerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ModerationError::ClientInit { source })?;

        Ok(Self { http, base_url })
    }

    /// The configured service endpoint (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProfanityClient for PurgomalumClient {
    #[instrument(skip(self, text))]
    async fn contains_profanity(&self, text: &str) -> Result<bool, ModerationError> {
        let url = format!("{}/containsprofanity", self.base_url.trim_end_matches('/'));

        debug!("Checking text against moderation service");

        let response = self.http.get(&url).query(&[("text", text)]).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModerationError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        match body.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ModerationError::UnexpectedBody { body }),
        }
    }
}
