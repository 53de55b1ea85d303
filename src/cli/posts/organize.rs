use anyhow::Result;

use super::should_apply;
use crate::cli::ApplyArgs;
use crate::config::SiteConfig;
use crate::posts::{display_relative, organize};
use crate::utils::plural;
use crate::{log, logger};

pub(super) fn run(config: &SiteConfig, args: ApplyArgs) -> Result<()> {
    let posts_dir = &config.build.posts;
    let plan = organize::plan(posts_dir)?;

    for path in &plan.skipped {
        log!("skip"; "{} (no parseable date)", display_relative(path, posts_dir));
    }
    if plan.moves.is_empty() {
        log!("posts"; "nothing to move");
        return Ok(());
    }

    for post in &plan.moves {
        logger::line(&format!(
            "  {} -> {}",
            display_relative(&post.file.from, posts_dir),
            display_relative(&post.file.to, posts_dir)
        ));
        if let Some(res) = &post.resources {
            logger::line(&format!(
                "  {}/ -> {}/",
                display_relative(&res.from, posts_dir),
                display_relative(&res.to, posts_dir)
            ));
        }
    }
    let dirs = plan.moves.iter().filter(|m| m.resources.is_some()).count();
    log!("posts"; "{} and {} to move", plural::count(plan.moves.len(), "file"), plural::count(dirs, "folder"));

    if !should_apply(args)? {
        return Ok(());
    }

    let applied = organize::apply(&plan)?;
    for conflict in &applied.conflicts {
        log!("skip"; "{} exists", display_relative(&conflict.to, posts_dir));
    }
    log!("write"; "moved {} and {}", plural::count(applied.files, "file"), plural::count(applied.dirs, "folder"));
    Ok(())
}
