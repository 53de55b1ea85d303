//! `posts`: maintenance tools for post sources.

mod organize;
mod prompt;
mod redirects;
mod updated;

use anyhow::{Result, bail};

use super::{ApplyArgs, PostsCommand};
use crate::config::SiteConfig;
use crate::log;

pub fn run_posts(command: &PostsCommand, config: &SiteConfig) -> Result<()> {
    let posts_dir = &config.build.posts;
    if !posts_dir.is_dir() {
        bail!("posts directory `{}` does not exist", posts_dir.display());
    }

    match command {
        PostsCommand::RedirectIds {
            apply,
            redirects,
            key,
        } => {
            let redirects = redirects
                .as_deref()
                .map_or_else(|| config.build.redirects.clone(), |p| config.root_join(p));
            redirects::run(config, &redirects, key, *apply)
        }
        PostsCommand::Organize { apply } => organize::run(config, *apply),
        PostsCommand::Updated { preview } => updated::run(config, *preview),
    }
}

/// Whether a previewed plan should be written.
fn should_apply(args: ApplyArgs) -> Result<bool> {
    if !args.apply {
        log!("posts"; "preview only, pass --apply to write");
        return Ok(false);
    }
    if args.yes {
        return Ok(true);
    }
    let confirmed = prompt::confirm("Continue?")?;
    if !confirmed {
        log!("posts"; "cancelled");
    }
    Ok(confirmed)
}
