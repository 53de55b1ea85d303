//! Generated assets and their output.
//!
//! Generators return [`Asset`]s (a relative path plus bytes). Nothing is
//! written until every generator has finished, then `write_assets` places
//! them under the output directory.

pub mod fetch;

pub use fetch::{Fetch, HttpFetcher};

use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// A static file produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// File content, written verbatim.
    pub data: Vec<u8>,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// Human-readable size, e.g. `12.3 KB`.
    pub fn display_size(&self) -> String {
        format_size(self.data.len())
    }
}

/// Write assets under `output_dir`, creating parent directories.
///
/// Existing files are overwritten. Paths escaping the output directory
/// are rejected before anything is written.
pub fn write_assets(output_dir: &Path, assets: &[Asset]) -> Result<Vec<PathBuf>> {
    for asset in assets {
        if !is_contained(&asset.path) {
            bail!(
                "asset path `{}` must be relative and stay inside the output directory",
                asset.path.display()
            );
        }
    }

    let mut written = Vec::with_capacity(assets.len());
    for asset in assets {
        let dest = output_dir.join(&asset.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
        }
        fs::write(&dest, &asset.data)
            .with_context(|| format!("Failed to write `{}`", dest.display()))?;
        written.push(dest);
    }
    Ok(written)
}

/// Relative path made only of normal components.
fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[allow(clippy::cast_precision_loss)] // Display only
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes} B")
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_assets_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let assets = vec![
            Asset::new("umami.js", "console.log(1)"),
            Asset::new("images/travel-moe-light.svg", "<svg/>"),
        ];

        let written = write_assets(tmp.path(), &assets).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(tmp.path().join("umami.js")).unwrap(),
            "console.log(1)"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("images/travel-moe-light.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn test_write_assets_overwrites() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("umami.js"), "old").unwrap();

        write_assets(tmp.path(), &[Asset::new("umami.js", "new")]).unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("umami.js")).unwrap(), "new");
    }

    #[test]
    fn test_write_assets_rejects_escaping_paths() {
        let tmp = TempDir::new().unwrap();
        let assets = vec![
            Asset::new("ok.js", "ok"),
            Asset::new("../outside.js", "nope"),
        ];

        assert!(write_assets(tmp.path(), &assets).is_err());
        // Validation happens before any write
        assert!(!tmp.path().join("ok.js").exists());
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("images/a.svg")));
        assert!(!is_contained(Path::new("/etc/passwd")));
        assert!(!is_contained(Path::new("a/../../b")));
        assert!(!is_contained(Path::new("")));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
