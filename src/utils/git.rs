//! Read-only git queries backing `posts updated`.
//!
//! History with `--follow` (rename tracking) is only available through the
//! git CLI, so every query shells out via [`Cmd`].

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::exec::Cmd;

/// Field separator in `--pretty` output.
const FIELD_SEP: char = '\x1f';
/// Record separator in `--pretty` output.
const RECORD_SEP: char = '\x1e';

/// A commit that touched a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    /// Committer time, ISO 8601 with offset (`%cI`).
    pub time: String,
    pub body: String,
}

impl Commit {
    /// First `max_lines` non-empty lines of the message.
    pub fn preview(&self, max_lines: usize) -> String {
        let lines: Vec<_> = self
            .body
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(max_lines)
            .collect();
        if lines.is_empty() {
            "(no commit message)".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Top-level directory of the repository containing `start`.
pub fn repo_root(start: &Path) -> Result<PathBuf> {
    let out = Cmd::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .cwd(start)
        .stdout_text()
        .with_context(|| format!("`{}` is not inside a git repository", start.display()))?;
    Ok(PathBuf::from(out.trim()))
}

/// Commits touching `file`, newest first, following renames.
pub fn commits_for_file(root: &Path, file: &Path) -> Result<Vec<Commit>> {
    let raw = Cmd::new("git")
        .args(["log", "--follow", "--pretty=format:%H%x1f%cI%x1f%B%x1e", "--"])
        .arg(relative_to(root, file))
        .cwd(root)
        .stdout_text()?;
    Ok(parse_log(&raw))
}

/// Parse `%H%x1f%cI%x1f%B%x1e` records.
pub fn parse_log(raw: &str) -> Vec<Commit> {
    raw.split(RECORD_SEP)
        .filter_map(|record| {
            let mut fields = record.splitn(3, FIELD_SEP);
            let hash = fields.next()?.trim();
            let time = fields.next()?.trim();
            let body = fields.next()?.trim();
            (!hash.is_empty()).then(|| Commit {
                hash: hash.to_string(),
                time: time.to_string(),
                body: body.to_string(),
            })
        })
        .collect()
}

/// `git show <hash> -- <file>`
pub fn show_file_diff(root: &Path, hash: &str, file: &Path) -> Result<String> {
    Cmd::new("git")
        .args(["show", hash, "--"])
        .arg(relative_to(root, file))
        .cwd(root)
        .stdout_text()
}

/// Hash, date, subject and body of one commit.
pub fn show_commit(root: &Path, hash: &str) -> Result<String> {
    Cmd::new("git")
        .args(["show", "--no-patch", "--pretty=format:%H%n%ci%n%s%n%n%b", hash])
        .cwd(root)
        .stdout_text()
}

/// URL of the `origin` remote, if any.
pub fn origin_url(root: &Path) -> Option<String> {
    Cmd::new("git")
        .args(["remote", "get-url", "origin"])
        .cwd(root)
        .stdout_text()
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Web page of a commit, e.g. `git@github.com:o/r.git` becomes
/// `https://github.com/o/r/commit/<hash>`.
pub fn commit_web_url(remote: &str, hash: &str) -> String {
    let remote = remote.trim();
    let base = match remote.strip_prefix("git@") {
        Some(rest) => format!("https://{}", rest.replacen(':', "/", 1)),
        None => remote.to_string(),
    };
    let base = base.strip_suffix(".git").unwrap_or(&base);
    format!("{base}/commit/{hash}")
}

fn relative_to(root: &Path, file: &Path) -> PathBuf {
    file.strip_prefix(root).unwrap_or(file).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log() {
        let raw = "abc\x1f2024-01-02T03:04:05+09:00\x1fFix typo\n\nLonger body\n\x1e\n\
                   def\x1f2023-12-31T23:00:00+00:00\x1fInitial\n\x1e";
        let commits = parse_log(raw);

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "abc");
        assert_eq!(commits[0].time, "2024-01-02T03:04:05+09:00");
        assert_eq!(commits[0].body, "Fix typo\n\nLonger body");
        assert_eq!(commits[1].hash, "def");
    }

    #[test]
    fn test_parse_log_empty() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n").is_empty());
    }

    #[test]
    fn test_preview() {
        let commit = Commit {
            hash: "h".into(),
            time: "t".into(),
            body: "one\n\n two\nthree\nfour".into(),
        };
        assert_eq!(commit.preview(3), "one\n two\nthree");

        let empty = Commit {
            body: "  \n".into(),
            ..commit
        };
        assert_eq!(empty.preview(3), "(no commit message)");
    }

    #[test]
    fn test_commit_web_url() {
        assert_eq!(
            commit_web_url("git@github.com:travel-moe/blog.git", "abc"),
            "https://github.com/travel-moe/blog/commit/abc"
        );
        assert_eq!(
            commit_web_url("https://github.com/travel-moe/blog.git\n", "abc"),
            "https://github.com/travel-moe/blog/commit/abc"
        );
        assert_eq!(
            commit_web_url("https://gitlab.com/a/b", "abc"),
            "https://gitlab.com/a/b/commit/abc"
        );
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/repo"), Path::new("/repo/source/_posts/a.md")),
            PathBuf::from("source/_posts/a.md")
        );
        assert_eq!(relative_to(Path::new("/repo"), Path::new("b.md")), PathBuf::from("b.md"));
    }
}
