//! `[image_caption]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [image_caption]
//! enable = true
//! class_name = "image-caption"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Image caption rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCaptionConfig {
    /// Only an explicit `false` turns captions off.
    pub enable: bool,

    /// CSS class of the wrapping `<figure>`.
    pub class_name: String,
}

impl Default for ImageCaptionConfig {
    fn default() -> Self {
        Self {
            enable: true,
            class_name: "image-caption".into(),
        }
    }
}

impl ImageCaptionConfig {
    pub const CLASS_NAME: FieldPath = FieldPath::new("image_caption.class_name");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.class_name.trim().is_empty() {
            diag.error_with_hint(
                Self::CLASS_NAME,
                "class name must not be empty",
                "remove the field to use the default \"image-caption\"",
            );
        }
    }
}
