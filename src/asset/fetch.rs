//! Remote fetching for generators.
//!
//! Generators depend on the [`Fetch`] trait rather than on `reqwest`
//! directly, so tests can swap in a recording stub.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::debug;

/// Network failures. Both variants abort the build.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to `{url}` failed")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` responded with {status}")]
    Status { url: Url, status: StatusCode },
}

/// Fetch a URL and return its body as text.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher. No timeout and no retry.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sitehook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let request_failed = |source| FetchError::Request {
            url: url.clone(),
            source,
        };

        debug!("fetch"; "GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        response.text().await.map_err(request_failed)
    }
}

// ============================================================================
// Test support
// ============================================================================
