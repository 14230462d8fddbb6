//! HTTP source of IMDb ratings.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::html::extract_rating;

/// One unit of work for the fetch pool: look up the rating of a single title.
///
/// `ImdbClient` is the real implementation; tests plug in in-memory sources.
pub trait RatingSource: Send + Sync {
    fn fetch_rating(&self, imdb_id: &str) -> impl Future<Output = Result<f64, FetchError>> + Send;
}

/// Title page address, e.g. `https://www.imdb.com/title/tt0137523/` for id `137523`.
///
/// Ids shorter than seven digits are left-padded with zeros.
pub fn title_url(base_url: &str, imdb_id: &str) -> String {
    format!(
        "{}/title/tt{:0>7}/",
        base_url.trim_end_matches('/'),
        imdb_id.trim()
    )
}

/// Fetches title pages over HTTP and extracts their rating.
#[derive(Clone)]
pub struct ImdbClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ImdbClient {
    /// Build a client with the configured timeout, user agent and base URL.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Building HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RatingSource for ImdbClient {
    async fn fetch_rating(&self, imdb_id: &str) -> Result<f64, FetchError> {
        let url = title_url(&self.base_url, imdb_id);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Network {
                    url: url.clone(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        extract_rating(&body)
    }
}
