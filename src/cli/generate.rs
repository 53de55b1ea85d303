//! `generate`: run the asset generators and write their output.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::asset::{HttpFetcher, write_assets};
use crate::config::SiteConfig;
use crate::hooks::HookRegistry;
use crate::log;
use crate::utils::plural;

pub fn generate_assets(config: &SiteConfig) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new()?);
    let registry = HookRegistry::from_config(config, fetcher)?;

    if registry.generator_names().is_empty() {
        log!("skip"; "no generators enabled");
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    // All generators finish before anything is written
    let assets = rt.block_on(registry.generate_all())?;
    let written = write_assets(&config.build.output, &assets)?;

    for (asset, path) in assets.iter().zip(&written) {
        log!("write"; "{} ({})", config.root_relative(path).display(), asset.display_size());
    }
    log!("generate"; "{} written", plural::count(written.len(), "asset"));
    Ok(())
}
