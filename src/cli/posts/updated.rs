use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use crate::config::SiteConfig;
use crate::posts::updated::{
    self, Action, Choice, HELP, MAX_COMMITS, PREVIEW_LINES, format_updated, needs_updated,
};
use crate::posts::{Post, display_relative, read_posts};
use crate::utils::git::{self, Commit};
use crate::{debug, log, logger};

pub(super) fn run(config: &SiteConfig, preview: bool) -> Result<()> {
    let posts_dir = &config.build.posts;
    let repo = git::repo_root(posts_dir)?;
    let posts = read_posts(posts_dir);
    log!("posts"; "{} markdown files under {}", posts.len(), config.root_relative(posts_dir).display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut modified = 0;

    for post in &posts {
        let rel = display_relative(&post.path, posts_dir);
        if !needs_updated(&post.text) {
            debug!("skip"; "{rel}: has `updated` or no front matter");
            continue;
        }

        let mut commits = file_history(&repo, &post.path, &rel);
        if commits.is_empty() {
            log!("skip"; "{rel}: no git history");
            continue;
        }
        commits.truncate(MAX_COMMITS);

        logger::line(&format!("\n{}\nFile: {rel}", "=".repeat(60)));
        for (i, commit) in commits.iter().enumerate() {
            logger::line(&format!("[{}] {}\n{}\n", i + 1, commit.time, commit.preview(PREVIEW_LINES)));
        }
        logger::line(HELP);

        let choice = choose_commit(&mut input, &commits, |action, commit| {
            inspect(&repo, &post.path, action, commit);
        })?;
        let Some(index) = choice else {
            log!("skip"; "{rel}");
            continue;
        };

        let value = format_updated(&commits[index].time);
        log!("posts"; "{rel}: updated {value}");
        if preview {
            continue;
        }
        write_updated(post, &value)?;
        modified += 1;
    }

    log!("write"; "{modified} modified");
    Ok(())
}

/// Commits touching `file`. A failing `git log` (e.g. a repository with no
/// commits yet) is reported and treated as no history.
fn file_history(repo: &Path, file: &Path, rel: &str) -> Vec<Commit> {
    git::commits_for_file(repo, file).unwrap_or_else(|e| {
        log!("skip"; "{rel}: {:#}", e);
        Vec::new()
    })
}

/// Prompt until a commit is picked (`Some`) or the post is skipped (`None`).
fn choose_commit(
    input: &mut impl BufRead,
    commits: &[Commit],
    mut inspect: impl FnMut(Action, &Commit),
) -> Result<Option<usize>> {
    loop {
        eprint!("Choice> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match updated::parse_choice(&line, commits.len()) {
            Ok(Choice::Skip) => return Ok(None),
            Ok(Choice::Pick(index)) => return Ok(Some(index)),
            Ok(Choice::Help) => logger::line(HELP),
            Ok(Choice::Inspect(index, actions)) => {
                for action in actions {
                    inspect(action, &commits[index]);
                }
            }
            Err(e) => log!("warning"; "{e}"),
        }
    }
}

fn inspect(repo: &Path, file: &Path, action: Action, commit: &Commit) {
    let result = match action {
        Action::Diff => git::show_file_diff(repo, &commit.hash, file),
        Action::Message => git::show_commit(repo, &commit.hash),
        Action::Open => git::origin_url(repo)
            .map(|remote| git::commit_web_url(&remote, &commit.hash))
            .context("`origin` remote not configured"),
        Action::Unknown(c) => {
            log!("warning"; "unknown action: {c}");
            return;
        }
    };
    match result {
        Ok(text) => logger::line(&text),
        Err(e) => log!("error"; "{:#}", e),
    }
}

fn write_updated(post: &Post, value: &str) -> Result<()> {
    let Some(text) = updated::with_updated(&post.text, value) else {
        return Ok(());
    };
    fs::write(&post.path, text)
        .with_context(|| format!("Failed to write `{}`", post.path.display()))
}
