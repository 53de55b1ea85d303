//! Carry new post ids from `_redirects` into front matter.
//!
//! A line such as
//!
//! ```text
//! /2015/02/22/1/*    posts/new-arrival/:splat
//! ```
//!
//! means the post whose front matter has `id: 1` now lives at
//! `posts/new-arrival`, so `new-arrival` is written to that post.

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::{fs, path::PathBuf, sync::LazyLock};

use super::Post;

/// Default front-matter key receiving the new id.
pub const DEFAULT_KEY: &str = "id";

/// Key that identifies a post in the old URL.
const INDEX_KEY: &str = "id";

static REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(\d{4})/(\d{2})/(\d{2})/([^/]+)/\*\s+posts/([^/:\s]+)").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub old_id: String,
    pub new_id: String,
}

/// Parse `_redirects`. Blank lines, comments and other rules are ignored.
pub fn parse_redirects(text: &str) -> Vec<Redirect> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| REDIRECT.captures(line))
        .map(|caps| Redirect {
            old_id: caps[4].to_string(),
            new_id: caps[5].to_string(),
        })
        .collect()
}

/// A pending front-matter edit.
#[derive(Debug, Clone)]
pub struct KeyChange {
    pub path: PathBuf,
    /// Current value, if the key exists.
    pub old: Option<String>,
    pub new: String,
    /// Full file contents after the edit.
    pub contents: String,
}

#[derive(Debug, Default)]
pub struct RedirectPlan {
    pub changes: Vec<KeyChange>,
    /// Redirects with no post carrying `old_id`.
    pub missing: Vec<Redirect>,
    /// Redirects whose `old_id` is shared by several posts.
    pub ambiguous: Vec<(Redirect, Vec<PathBuf>)>,
    /// Posts already holding the new value.
    pub unchanged: Vec<PathBuf>,
}

impl RedirectPlan {
    /// Redirects that could not be matched to exactly one post.
    pub fn skipped(&self) -> usize {
        self.missing.len() + self.ambiguous.len()
    }
}

/// Match each redirect to a post and compute the edit setting `key`.
pub fn plan(redirects: &[Redirect], posts: &[Post], key: &str) -> RedirectPlan {
    let index = index_by_id(posts);
    let mut plan = RedirectPlan::default();

    for redirect in redirects {
        let candidates = index.get(redirect.old_id.as_str()).map_or(&[][..], Vec::as_slice);
        let post = match candidates {
            [] => {
                plan.missing.push(redirect.clone());
                continue;
            }
            [only] => &posts[*only],
            many => {
                let paths = many.iter().map(|&i| posts[i].path.clone()).collect();
                plan.ambiguous.push((redirect.clone(), paths));
                continue;
            }
        };

        // Indexed posts always have front matter
        let Some(fm) = post.front_matter() else { continue };
        match fm.set(key, &redirect.new_id) {
            Some(contents) => plan.changes.push(KeyChange {
                path: post.path.clone(),
                old: fm.get(key).map(str::to_string),
                new: redirect.new_id.clone(),
                contents,
            }),
            None => plan.unchanged.push(post.path.clone()),
        }
    }

    plan
}

/// Write planned edits. Returns the number of files written.
pub fn apply(changes: &[KeyChange]) -> Result<usize> {
    for change in changes {
        fs::write(&change.path, &change.contents)
            .with_context(|| format!("Failed to write `{}`", change.path.display()))?;
    }
    Ok(changes.len())
}

/// Post positions keyed by their front-matter id.
fn index_by_id(posts: &[Post]) -> FxHashMap<&str, Vec<usize>> {
    let mut index: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, post) in posts.iter().enumerate() {
        if let Some(id) = post.front_matter().and_then(|fm| fm.get(INDEX_KEY)) {
            index.entry(id).or_default().push(i);
        }
    }
    index
}
