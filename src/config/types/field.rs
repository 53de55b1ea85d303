//! Dotted names of config fields, e.g. `theme.umami.host_url`.

use owo_colors::OwoColorize;
use std::fmt;

/// Declared as a constant next to the section that owns the field, so a
/// diagnostic can only name a field that exists:
///
/// ```ignore
/// impl UmamiConfig {
///     pub const HOST_URL: FieldPath = FieldPath::new("theme.umami.host_url");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
