//! Site configuration management for `sitehook.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── badge      # [badge]
//! │   ├── build      # [build]
//! │   ├── caption    # [image_caption]
//! │   ├── site       # [site]
//! │   └── theme      # [theme.umami]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The loaded `SiteConfig` is passed to each hook when it is registered.
//! Hooks keep the values they need and never read global state.

pub mod section;
pub mod types;
pub mod util;

use util::find_config_file;

pub use section::{
    BadgeConfig, BuildSectionConfig, ImageCaptionConfig, SiteSectionConfig, ThemeSectionConfig,
    UmamiConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitehook.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site settings (canonical URL)
    pub site: SiteSectionConfig,

    /// Theme settings (analytics)
    pub theme: ThemeSectionConfig,

    /// Badge generation settings
    pub badge: BadgeConfig,

    /// Image caption settings
    pub image_caption: ImageCaptionConfig,

    /// Build paths
    pub build: BuildSectionConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory, or cwd when no file exists and the
    /// command can run on defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let found = find_config_file(&cli.config);

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None if cli.requires_config() => {
                bail!(ConfigError::NotFound(cwd.join(&cli.config)));
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = found
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.clone(), Path::to_path_buf);
        config.config_path = found.unwrap_or_else(|| cwd.join(&cli.config));
        config.root = root;
        debug!("config"; "root {}, config {}", config.root.display(), config.config_path.display());

        config.apply_command_options(&cli.command);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Generate { output } => {
                Self::update_option(&mut self.build.output, output.as_ref());
            }
            Commands::Caption { args } => {
                Self::update_option(&mut self.image_caption.class_name, args.class_name.as_ref());
            }
            Commands::Posts { posts_dir, .. } => {
                Self::update_option(&mut self.build.posts, posts_dir.as_ref());
            }
            Commands::Locals { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve all configured paths against the root directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.build.output = resolve_path(&root, &self.build.output);
        self.build.posts = resolve_path(&root, &self.build.posts);
        self.build.redirects = resolve_path(&root, &self.build.redirects);
        self.badge.source = resolve_path(&root, &self.badge.source);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.theme.validate(&mut diag);
        self.badge.validate(&mut diag);
        self.image_caption.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Expand `~` and join relative paths onto `root`.
fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    if expanded.is_relative() {
        root.join(expanded)
    } else {
        expanded
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config and anchor it at `root`, as `load` would.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str, root: &Path) -> SiteConfig {
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.root = root.to_path_buf();
    parsed.config_path = root.join("sitehook.toml");
    parsed.normalize_paths();
    parsed
}

// ============================================================================
// tests
// ============================================================================
