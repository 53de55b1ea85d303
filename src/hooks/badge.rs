//! Light and dark "travel.moe" badges.
//!
//! The logo is embedded as a base64 data URI in the query of a badge
//! service URL, e.g. for shields.io:
//!
//! ```text
//! https://img.shields.io/badge/travel.moe-f5f5f5?logo=data:image/png;base64,...&logoSize=auto&labelColor=ffffff
//! ```
//!
//! Both variants are fetched concurrently and written under `images/`.

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use url::Url;

use super::Generator;
use crate::asset::{Asset, Fetch};
use crate::config::{BadgeConfig, util::parse_url};
use crate::utils::mime;

/// Colors for one badge variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeOptions {
    /// Output file suffix.
    pub name: &'static str,
    /// Message background.
    pub color: &'static str,
    /// Label background.
    pub label_color: &'static str,
}

pub const LIGHT: BadgeOptions = BadgeOptions {
    name: "light",
    color: "f5f5f5",
    label_color: "ffffff",
};

pub const DARK: BadgeOptions = BadgeOptions {
    name: "dark",
    color: "24292f",
    label_color: "0d1117",
};

pub struct BadgeGenerator {
    source: PathBuf,
    service: Url,
    title: String,
    fetcher: Arc<dyn Fetch>,
}

impl BadgeGenerator {
    pub fn from_config(config: &BadgeConfig, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        Ok(Self {
            source: config.source.clone(),
            service: parse_url(BadgeConfig::SERVICE, &config.service)?,
            title: config.title.clone(),
            fetcher,
        })
    }

    /// Badge URL for one variant.
    pub fn badge_url(&self, logo: &str, options: &BadgeOptions) -> Result<Url> {
        let mut url = self.service.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("badge service `{}` cannot take a path", self.service))?
            .pop_if_empty()
            .push("badge")
            .push(&format!("{}-{}", escape_badge_text(&self.title), options.color));
        url.query_pairs_mut()
            .append_pair("logo", logo)
            .append_pair("logoSize", "auto")
            .append_pair("labelColor", options.label_color);
        Ok(url)
    }

    fn logo_data_uri(&self) -> Result<String> {
        let bytes = fs::read(&self.source)
            .with_context(|| format!("Failed to read badge image `{}`", self.source.display()))?;
        Ok(data_uri(mime::image_from_path(&self.source), &bytes))
    }
}

#[async_trait]
impl Generator for BadgeGenerator {
    fn name(&self) -> &'static str {
        "badge"
    }

    async fn generate(&self) -> Result<Vec<Asset>> {
        let logo = self.logo_data_uri()?;
        let light_url = self.badge_url(&logo, &LIGHT)?;
        let dark_url = self.badge_url(&logo, &DARK)?;

        let (light, dark) = tokio::try_join!(
            self.fetcher.get_text(&light_url),
            self.fetcher.get_text(&dark_url),
        )
        .context("Failed to fetch badge")?;

        Ok(vec![
            Asset::new(output_path(&LIGHT), light),
            Asset::new(output_path(&DARK), dark),
        ])
    }
}

/// `images/travel-moe-<name>.svg`
pub fn output_path(options: &BadgeOptions) -> String {
    format!("images/travel-moe-{}.svg", options.name)
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Escape text for a static badge path, where `-` separates fields.
pub fn escape_badge_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '-' => escaped.push_str("--"),
            '_' => escaped.push_str("__"),
            ' ' => escaped.push('_'),
            c => escaped.push(c),
        }
    }
    escaped
}
