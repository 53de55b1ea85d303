//! Build hooks and the registry that runs them.
//!
//! Three kinds of hook mirror the host generator's extension points:
//!
//! | Trait          | Stage           | Hooks                     |
//! |----------------|-----------------|---------------------------|
//! | `Generator`    | asset generation| `umami`, `badge`          |
//! | `ContentFilter`| after render    | `caption`                 |
//! | `LocalsFilter` | template locals | `locals`                  |
//!
//! Hooks receive their configuration when constructed and share no state.

pub mod badge;
pub mod caption;
pub mod locals;
mod registry;
pub mod umami;

pub use registry::HookRegistry;

use crate::asset::Asset;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Hook traits
// ============================================================================

/// Produces static files once per build.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Name used in logs and error context.
    fn name(&self) -> &'static str;

    async fn generate(&self) -> Result<Vec<Asset>>;
}

/// Transforms one rendered document.
pub trait ContentFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn after_render(&self, doc: Document) -> Result<Document>;
}

/// Transforms the locals handed to templates.
pub trait LocalsFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn template_locals(&self, locals: Locals) -> Result<Locals>;
}

// ============================================================================
// Hook inputs
// ============================================================================

/// A rendered document passing through the after-render stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    /// Layout the document was rendered with (`post`, `page`, ...).
    pub layout: String,
}

impl Document {
    pub fn new(content: impl Into<String>, layout: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            layout: layout.into(),
        }
    }
}

/// Template locals. Only `config.url` is required; every other field is
/// carried through untouched. Serializing writes `config` first, then the
/// remaining fields in their input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locals {
    pub config: LocalsConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `config` object inside [`Locals`]. `url` and `host` are written
/// before the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalsConfig {
    pub url: String,

    /// Derived from `url` by the locals hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Locals {
    /// Minimal locals carrying only the site URL.
    pub fn from_site_url(url: impl Into<String>) -> Self {
        Self {
            config: LocalsConfig {
                url: url.into(),
                host: None,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}
