//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://travel.moe/blog"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, util::validate_http_url};
use serde::{Deserialize, Serialize};

/// Site-level settings shared with template locals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Fully-qualified site URL, path included.
    pub url: Option<String>,
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url) = &self.url {
            validate_http_url(Self::URL, url, diag);
        }
    }
}
