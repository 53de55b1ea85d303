//! Local mirror of the Umami tracker script.
//!
//! Serving the script from the site's own origin keeps it from being
//! blocked by ad blockers. The body is copied verbatim.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use super::Generator;
use crate::asset::{Asset, Fetch};
use crate::config::{UmamiConfig, util::parse_url};

/// Output path of the mirrored script.
pub const SCRIPT_OUTPUT: &str = "umami.js";

/// Path of the tracker script on an Umami host.
const SCRIPT_PATH: &str = "/script.js";

pub struct UmamiScript {
    script_url: Url,
    fetcher: Arc<dyn Fetch>,
}

impl UmamiScript {
    pub fn new(host_url: &str, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        let mut script_url = parse_url(UmamiConfig::HOST_URL, host_url)?;
        // Query and fragment are kept
        script_url.set_path(SCRIPT_PATH);
        Ok(Self {
            script_url,
            fetcher,
        })
    }
}

#[async_trait]
impl Generator for UmamiScript {
    fn name(&self) -> &'static str {
        "umami"
    }

    async fn generate(&self) -> Result<Vec<Asset>> {
        let script = self
            .fetcher
            .get_text(&self.script_url)
            .await
            .context("Failed to mirror the Umami script")?;
        Ok(vec![Asset::new(SCRIPT_OUTPUT, script)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::fetch::testing::StubFetcher;
    use reqwest::StatusCode;

    #[test]
    fn test_script_url_replaces_path() {
        let fetcher = Arc::new(StubFetcher::new());
        let hook = UmamiScript::new("https://analytics.example.com/some/dashboard", fetcher).unwrap();
        assert_eq!(
            hook.script_url.as_str(),
            "https://analytics.example.com/script.js"
        );
    }

    #[test]
    fn test_script_url_keeps_port_and_query() {
        let fetcher = Arc::new(StubFetcher::new());
        let hook = UmamiScript::new("http://localhost:3000/?v=2", fetcher).unwrap();
        assert_eq!(hook.script_url.as_str(), "http://localhost:3000/script.js?v=2");
    }

    #[test]
    fn test_invalid_host_url() {
        let fetcher = Arc::new(StubFetcher::new());
        assert!(UmamiScript::new("analytics.example.com", fetcher).is_err());
    }

    #[tokio::test]
    async fn test_generate_copies_body_verbatim() {
        let body = "!function(){\"use strict\";/* tracker */}();\n";
        let fetcher = Arc::new(StubFetcher::new().route("/script.js", body));
        let hook = UmamiScript::new("https://analytics.example.com", fetcher.clone()).unwrap();

        let assets = hook.generate().await.unwrap();

        assert_eq!(assets, vec![Asset::new("umami.js", body)]);
        assert_eq!(fetcher.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_propagates_status_error() {
        let fetcher = Arc::new(StubFetcher::new().fail("/script.js", StatusCode::BAD_GATEWAY));
        let hook = UmamiScript::new("https://analytics.example.com", fetcher).unwrap();

        let err = hook.generate().await.unwrap_err();

        assert!(err.chain().any(|e| e.to_string().contains("502")));
    }
}
