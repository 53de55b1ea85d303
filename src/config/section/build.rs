//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"
//! posts = "source/_posts"
//! redirects = "_redirects"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths used by the generate and post tools. Normalized against the
/// project root after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Directory generated assets are written into.
    pub output: PathBuf,

    /// Markdown post sources.
    pub posts: PathBuf,

    /// Redirect rules file read by `posts redirect-ids`.
    pub redirects: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
            posts: "source/_posts".into(),
            redirects: "_redirects".into(),
        }
    }
}
