//! Configuration utility functions.

use super::{ConfigDiagnostics, ConfigError, FieldPath};
use std::path::{Path, PathBuf};
use url::Url;

/// Parse a configured URL, naming the field on failure.
pub fn parse_url(field: FieldPath, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field: field.as_str(),
        value: value.to_string(),
        source,
    })
}

/// Check that `value` is an absolute http(s) URL with a host.
///
/// Problems are collected into `diag` instead of returned, so every bad
/// field is reported in one pass.
pub fn validate_http_url(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    match Url::parse(value) {
        Ok(parsed) => {
            // Must be http or https
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.bad_url(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                );
            }
            // Must have a valid host
            if parsed.host_str().is_none() {
                diag.bad_url(field, "URL must have a valid host");
            }
        }
        Err(e) => {
            diag.bad_url(field, format!("invalid URL: {e}"));
        }
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/blog/source/_posts/  ← cwd
/// /home/user/blog/sitehook.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Upward search starting at `start` instead of the process cwd.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    // First check if config_name is an absolute path
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================
