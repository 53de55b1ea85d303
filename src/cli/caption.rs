//! `caption`: rewrite rendered HTML files in place.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use super::CaptionArgs;
use crate::config::SiteConfig;
use crate::hooks::{Document, HookRegistry};
use crate::utils::{plural, walk};
use crate::{debug, log};

pub fn caption_files(args: &CaptionArgs, config: &SiteConfig) -> Result<()> {
    let registry = HookRegistry::render_hooks(config);

    if args.paths.iter().any(|p| p.as_os_str() == "-") {
        if args.paths.len() > 1 {
            bail!("`-` reads stdin and cannot be combined with other paths");
        }
        return caption_stdin(&registry, &args.layout);
    }

    let files = expand_paths(&args.paths)?;
    let rewritten = files
        .par_iter()
        .map(|path| caption_file(&registry, &args.layout, path))
        .collect::<Result<Vec<bool>>>()?
        .into_iter()
        .filter(|&changed| changed)
        .count();

    log!("caption"; "{} rewritten", plural::count(rewritten, "file"));
    Ok(())
}

fn caption_stdin(registry: &HookRegistry, layout: &str) -> Result<()> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;

    let doc = registry.render(Document::new(content, layout))?;

    let mut out = io::stdout().lock();
    out.write_all(doc.content.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Returns whether the file changed.
fn caption_file(registry: &HookRegistry, layout: &str, path: &Path) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))?;

    let doc = registry.render(Document::new(content.as_str(), layout))?;
    if doc.content == content {
        return Ok(false);
    }

    fs::write(path, doc.content)
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    debug!("caption"; "{}", path.display());
    Ok(true)
}

/// Files as given, directories expanded to their `*.html` files.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(walk::collect_files(path, "html"));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("`{}` does not exist", path.display());
        }
    }
    Ok(files)
}
