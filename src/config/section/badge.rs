//! `[badge]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [badge]
//! enable = true
//! source = "source/images/travel-moe.png"
//! service = "https://img.shields.io"
//! title = "travel.moe"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, util::validate_http_url};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Badge generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Generate the light/dark badge SVGs.
    pub enable: bool,

    /// Logo image embedded into the badge (relative to project root).
    pub source: PathBuf,

    /// Badge rendering service base URL.
    pub service: String,

    /// Text shown on the badge.
    pub title: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            source: "source/images/travel-moe.png".into(),
            service: "https://img.shields.io".into(),
            title: "travel.moe".into(),
        }
    }
}

impl BadgeConfig {
    pub const SERVICE: FieldPath = FieldPath::new("badge.service");
    pub const TITLE: FieldPath = FieldPath::new("badge.title");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        validate_http_url(Self::SERVICE, &self.service, diag);
        if self.title.is_empty() {
            diag.error(Self::TITLE, "badge title must not be empty");
        }
    }
}
