//! Ordered hook lists for each stage.

use std::sync::Arc;

use anyhow::{Context, Result};

use super::{
    ContentFilter, Document, Generator, Locals, LocalsFilter, badge::BadgeGenerator,
    caption::ImageCaption, locals::HostLocals, umami::UmamiScript,
};
use crate::asset::{Asset, Fetch};
use crate::config::SiteConfig;
use crate::debug;

/// Hooks registered for one build, run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    generators: Vec<Box<dyn Generator>>,
    filters: Vec<Box<dyn ContentFilter>>,
    locals_filters: Vec<Box<dyn LocalsFilter>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks that need no network: caption rewriting and locals.
    pub fn render_hooks(config: &SiteConfig) -> Self {
        let mut registry = Self::new();
        registry.register_filter(ImageCaption::from_config(&config.image_caption));
        registry.register_locals_filter(HostLocals);
        registry
    }

    /// Every hook enabled by `config`.
    ///
    /// The script mirror needs `theme.umami.host_url`; the badge needs
    /// `badge.enable`.
    pub fn from_config(config: &SiteConfig, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        let mut registry = Self::render_hooks(config);

        if let Some(host_url) = &config.theme.umami.host_url {
            registry.register_generator(UmamiScript::new(host_url, Arc::clone(&fetcher))?);
        } else {
            debug!("hooks"; "theme.umami.host_url not set, skipping umami");
        }

        if config.badge.enable {
            registry.register_generator(BadgeGenerator::from_config(&config.badge, fetcher)?);
        } else {
            debug!("hooks"; "badge disabled");
        }

        Ok(registry)
    }

    pub fn register_generator(&mut self, generator: impl Generator + 'static) {
        self.generators.push(Box::new(generator));
    }

    pub fn register_filter(&mut self, filter: impl ContentFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn register_locals_filter(&mut self, filter: impl LocalsFilter + 'static) {
        self.locals_filters.push(Box::new(filter));
    }

    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Run every generator and collect their assets.
    ///
    /// Returns nothing unless all generators succeed, so a failed build
    /// never publishes a partial set of files.
    pub async fn generate_all(&self) -> Result<Vec<Asset>> {
        let mut assets = Vec::new();
        for generator in &self.generators {
            debug!("generate"; "running {}", generator.name());
            let produced = generator
                .generate()
                .await
                .with_context(|| format!("`{}` generator failed", generator.name()))?;
            assets.extend(produced);
        }
        Ok(assets)
    }

    /// Pass a rendered document through every content filter.
    pub fn render(&self, doc: Document) -> Result<Document> {
        self.filters.iter().try_fold(doc, |doc, filter| {
            filter
                .after_render(doc)
                .with_context(|| format!("`{}` filter failed", filter.name()))
        })
    }

    /// Pass template locals through every locals filter.
    pub fn locals(&self, locals: Locals) -> Result<Locals> {
        self.locals_filters.iter().try_fold(locals, |locals, filter| {
            filter
                .template_locals(locals)
                .with_context(|| format!("`{}` locals filter failed", filter.name()))
        })
    }
}
