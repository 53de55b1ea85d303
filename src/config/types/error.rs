//! Errors raised while loading `sitehook.toml`.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const URL_HINT: &str = "use format like https://example.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("sitehook.toml is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("Config file `{0}` not found, create one or pass `--config`")]
    NotFound(PathBuf),

    #[error("invalid URL in `{field}`: `{value}`")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Rendered in full by `Display`, so it carries no `source`.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One rejected config value.
#[derive(Debug, Clone)]
pub struct Problem {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<&'static str>,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", "✗".red(), self.field, self.message)?;
        match self.hint {
            Some(hint) => write!(f, "\n    {} {hint}", "hint:".yellow()),
            None => Ok(()),
        }
    }
}

/// Problems and warnings gathered by the section validators.
///
/// Validation never stops at the first bad field; `into_result` fails
/// once with everything that was found.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    problems: Vec<Problem>,
    warnings: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: &'static str,
    ) {
        self.push(field, message.into(), Some(hint));
    }

    /// Reject a URL field, with the standard URL hint.
    pub fn bad_url(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), Some(URL_HINT));
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push((field, message.into()));
    }

    fn push(&mut self, field: FieldPath, message: String, hint: Option<&'static str>) {
        self.problems.push(Problem {
            field,
            message,
            hint,
        });
    }

    pub fn print_warnings(&self) {
        for (field, message) in &self.warnings {
            crate::log!("warning"; "{field}: {message}");
        }
    }

    #[cfg(test)]
    pub fn has_errors(&self) -> bool {
        !self.problems.is_empty()
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[Problem] {
        &self.problems
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[(FieldPath, String)] {
        &self.warnings
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.problems.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "{}", format!("sitehook.toml has {count} {noun}:").red().bold())?;
        for problem in &self.problems {
            write!(f, "\n  {problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
