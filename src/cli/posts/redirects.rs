use anyhow::{Context, Result};
use std::{fs, path::Path};

use super::should_apply;
use crate::cli::ApplyArgs;
use crate::config::SiteConfig;
use crate::posts::{display_relative, read_posts, redirects};
use crate::utils::plural;
use crate::{log, logger};

pub(super) fn run(config: &SiteConfig, redirects_file: &Path, key: &str, args: ApplyArgs) -> Result<()> {
    let posts_dir = &config.build.posts;
    let text = fs::read_to_string(redirects_file)
        .with_context(|| format!("Failed to read `{}`", redirects_file.display()))?;

    let entries = redirects::parse_redirects(&text);
    log!("redirects"; "{} in {}", plural::count(entries.len(), "redirect"), config.root_relative(redirects_file).display());

    let posts = read_posts(posts_dir);
    log!("posts"; "{} in {}", plural::count(posts.len(), "post"), config.root_relative(posts_dir).display());

    let plan = redirects::plan(&entries, &posts, key);

    for redirect in &plan.missing {
        log!("skip"; "no post with id `{}` (-> {})", redirect.old_id, redirect.new_id);
    }
    for (redirect, candidates) in &plan.ambiguous {
        log!("warning"; "several posts have id `{}`, skipping -> {}", redirect.old_id, redirect.new_id);
        for path in candidates {
            logger::line(&format!("  candidate: {}", display_relative(path, posts_dir)));
        }
    }
    for path in &plan.unchanged {
        log!("skip"; "{} already has {key}", display_relative(path, posts_dir));
    }

    if plan.changes.is_empty() {
        log!("posts"; "nothing to write");
        return Ok(());
    }

    for change in &plan.changes {
        let rel = display_relative(&change.path, posts_dir);
        match &change.old {
            Some(old) => logger::line(&format!("  {rel}: {key}: {old} -> {}", change.new)),
            None => logger::line(&format!("  {rel}: add {key}: {}", change.new)),
        }
    }
    log!("posts"; "{} to update, {} skipped", plural::count(plan.changes.len(), "file"), plan.skipped());

    if !should_apply(args)? {
        return Ok(());
    }

    let written = redirects::apply(&plan.changes)?;
    log!("write"; "{}", plural::count(written, "file"));
    Ok(())
}
