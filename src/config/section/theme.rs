//! `[theme]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [theme.umami]
//! host_url = "https://analytics.example.com"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, util::validate_http_url};
use serde::{Deserialize, Serialize};
use url::Url;

/// Theme settings consumed by hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Umami analytics settings.
    pub umami: UmamiConfig,
}

/// Umami analytics settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UmamiConfig {
    /// Base URL of the Umami instance. The tracker script is mirrored when set.
    pub host_url: Option<String>,
}

impl UmamiConfig {
    pub const HOST_URL: FieldPath = FieldPath::new("theme.umami.host_url");
}

impl ThemeSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url) = &self.umami.host_url else {
            return;
        };
        validate_http_url(UmamiConfig::HOST_URL, url, diag);

        // The script always lives at /script.js on the host
        if let Ok(parsed) = Url::parse(url)
            && parsed.path() != "/"
        {
            diag.warn(
                UmamiConfig::HOST_URL,
                format!("path `{}` is ignored, /script.js is fetched", parsed.path()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(host_url: &str) -> ThemeSectionConfig {
        ThemeSectionConfig {
            umami: UmamiConfig {
                host_url: Some(host_url.into()),
            },
        }
    }

    #[test]
    fn test_unset_host_is_valid() {
        let mut diag = ConfigDiagnostics::new();
        ThemeSectionConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_host_path_warns() {
        let mut diag = ConfigDiagnostics::new();
        theme("https://analytics.example.com/share/abc").validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);

        let mut diag = ConfigDiagnostics::new();
        theme("https://analytics.example.com").validate(&mut diag);
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_non_http_host_rejected() {
        let mut diag = ConfigDiagnostics::new();
        theme("ftp://analytics.example.com").validate(&mut diag);
        assert!(diag.has_errors());
    }
}
