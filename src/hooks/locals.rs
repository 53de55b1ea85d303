//! Derive `config.host` for templates.

use anyhow::{Result, bail};
use url::Url;

use super::{Locals, LocalsFilter};
use crate::config::{SiteSectionConfig, util::parse_url};

pub struct HostLocals;

impl LocalsFilter for HostLocals {
    fn name(&self) -> &'static str {
        "locals"
    }

    fn template_locals(&self, mut locals: Locals) -> Result<Locals> {
        let url = parse_url(SiteSectionConfig::URL, &locals.config.url)?;
        locals.config.host = Some(host_of(&url)?);
        Ok(locals)
    }
}

/// Host with the port appended when it is not the scheme default.
pub fn host_of(url: &Url) -> Result<String> {
    let Some(host) = url.host_str() else {
        bail!("site url `{url}` has no host");
    };
    // `port()` is None for the scheme's default port
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
