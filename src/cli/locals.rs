//! `locals`: apply locals filters to a JSON document.

use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use crate::config::SiteConfig;
use crate::hooks::{HookRegistry, Locals};
use crate::logger;

pub fn print_locals(input: Option<&Path>, config: &SiteConfig) -> Result<()> {
    let locals = read_locals(input, config)?;
    let locals = HookRegistry::render_hooks(config).locals(locals)?;
    logger::line(&serde_json::to_string_pretty(&locals)?);
    Ok(())
}

fn read_locals(input: Option<&Path>, config: &SiteConfig) -> Result<Locals> {
    let json = match input {
        Some(path) if path.as_os_str() == "-" => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("Failed to read stdin")?;
            json
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read `{}`", path.display()))?,
        None => {
            let url = config.site.url.as_deref().ok_or_else(|| {
                anyhow!("`site.url` is not set; pass a locals file or set it in the config")
            })?;
            return Ok(Locals::from_site_url(url));
        }
    };
    serde_json::from_str(&json).context("Locals must be a JSON object with `config.url`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSectionConfig;
    use tempfile::TempDir;

    #[test]
    fn test_read_locals_from_config() {
        let config = SiteConfig {
            site: SiteSectionConfig {
                url: Some("https://travel.moe:8443/blog".into()),
            },
            ..SiteConfig::default()
        };
        let locals = read_locals(None, &config).unwrap();
        let locals = HookRegistry::render_hooks(&config).locals(locals).unwrap();
        assert_eq!(locals.config.host.as_deref(), Some("travel.moe:8443"));
    }

    #[test]
    fn test_read_locals_without_url() {
        assert!(read_locals(None, &SiteConfig::default()).is_err());
    }

    #[test]
    fn test_read_locals_from_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("locals.json");
        fs::write(&file, r#"{"config":{"url":"https://a.b"},"page":{}}"#).unwrap();

        let locals = read_locals(Some(&file), &SiteConfig::default()).unwrap();

        assert_eq!(locals.config.url, "https://a.b");
        assert!(locals.extra.contains_key("page"));
    }

    #[test]
    fn test_read_locals_rejects_missing_url() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("locals.json");
        fs::write(&file, r#"{"config":{}}"#).unwrap();

        assert!(read_locals(Some(&file), &SiteConfig::default()).is_err());
    }
}
