//! Maintenance tools for the Markdown post sources.
//!
//! | Module        | Command                 | Effect                               |
//! |---------------|-------------------------|--------------------------------------|
//! | `redirects`   | `posts redirect-ids`    | Write new ids taken from `_redirects`|
//! | `organize`    | `posts organize`        | Move posts into `YYYY/MM/`           |
//! | `updated`     | `posts updated`         | Fill `updated` from git history      |
//!
//! Each module builds a plan first; nothing is written until it is applied.

pub mod front_matter;
pub mod organize;
pub mod redirects;
pub mod updated;

pub use front_matter::FrontMatter;

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::log;
use crate::utils::walk::collect_files;

/// A post source held in memory.
#[derive(Debug, Clone)]
pub struct Post {
    pub path: PathBuf,
    pub text: String,
}

impl Post {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read `{}`", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn front_matter(&self) -> Option<FrontMatter<'_>> {
        FrontMatter::parse(&self.text)
    }
}

/// Read every `.md` under `dir`. Unreadable files are reported and skipped.
pub fn read_posts(dir: &Path) -> Vec<Post> {
    collect_files(dir, "md")
        .into_iter()
        .filter_map(|path| match Post::read(&path) {
            Ok(post) => Some(post),
            Err(e) => {
                log!("skip"; "{:#}", e);
                None
            }
        })
        .collect()
}

/// `path` relative to `base` for display.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
