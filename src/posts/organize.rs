//! Move top-level posts into `YYYY/MM/` folders by their `date`.
//!
//! A resource folder next to the post and named after its stem
//! (`hello.md` + `hello/`) moves along with it.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::Post;
use crate::log;
use crate::utils::walk::list_files;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A post and its optional resource folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMove {
    pub file: Move,
    pub resources: Option<Move>,
}

#[derive(Debug, Default)]
pub struct OrganizePlan {
    pub moves: Vec<PostMove>,
    /// Posts without a parseable date.
    pub skipped: Vec<PathBuf>,
    /// Posts that could not be read.
    pub unreadable: Vec<PathBuf>,
}

/// Outcome of applying a plan.
#[derive(Debug, Default)]
pub struct Applied {
    pub files: usize,
    pub dirs: usize,
    /// Moves not made because the target already existed.
    pub conflicts: Vec<Move>,
}

/// `posts_dir/YYYY/MM` for a `YYYY-MM-DD` date.
pub fn target_dir(posts_dir: &Path, ymd: &str) -> Option<PathBuf> {
    let year = ymd.get(0..4)?;
    let month = ymd.get(5..7)?;
    Some(posts_dir.join(year).join(month))
}

/// Plan moves for the `.md` files directly inside `posts_dir`.
pub fn plan(posts_dir: &Path) -> Result<OrganizePlan> {
    let mut plan = OrganizePlan::default();

    for path in list_files(posts_dir, "md")? {
        let post = match Post::read(&path) {
            Ok(post) => post,
            Err(e) => {
                log!("skip"; "{:#}", e);
                plan.unreadable.push(path);
                continue;
            }
        };
        let Some(dir) = post
            .front_matter()
            .and_then(|fm| fm.date_ymd())
            .and_then(|ymd| target_dir(posts_dir, ymd))
        else {
            plan.skipped.push(path);
            continue;
        };

        let (Some(name), Some(stem)) = (path.file_name(), path.file_stem()) else {
            plan.skipped.push(path);
            continue;
        };
        let to = dir.join(name);
        if to == path {
            continue;
        }

        let resource_dir = path.with_file_name(stem);
        let resources = resource_dir.is_dir().then(|| Move {
            from: resource_dir,
            to: dir.join(stem),
        });

        plan.moves.push(PostMove {
            file: Move { from: path, to },
            resources,
        });
    }

    Ok(plan)
}

/// Perform the moves. Existing targets are never overwritten.
pub fn apply(plan: &OrganizePlan) -> Result<Applied> {
    let mut applied = Applied::default();

    for post in &plan.moves {
        if move_entry(&post.file)? {
            applied.files += 1;
        } else {
            applied.conflicts.push(post.file.clone());
        }

        if let Some(resources) = &post.resources {
            if move_entry(resources)? {
                applied.dirs += 1;
            } else {
                applied.conflicts.push(resources.clone());
            }
        }
    }

    Ok(applied)
}

/// Rename unless the target exists. Returns whether it moved.
fn move_entry(m: &Move) -> Result<bool> {
    if m.to.exists() {
        return Ok(false);
    }
    if let Some(parent) = m.to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
    }
    fs::rename(&m.from, &m.to).with_context(|| {
        format!(
            "Failed to move `{}` to `{}`",
            m.from.display(),
            m.to.display()
        )
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: PathBuf, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_target_dir() {
        assert_eq!(
            target_dir(Path::new("/p"), "2015-02-22"),
            Some(PathBuf::from("/p/2015/02"))
        );
        assert_eq!(target_dir(Path::new("/p"), "2015"), None);
    }

    #[test]
    fn test_plan_and_apply() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root.join("hello.md"), "---\ndate: 2015-02-22 10:00:00\n---\n");
        write(root.join("hello/cover.png"), "png");
        write(root.join("plain.md"), "---\ndate: \"2016-11-05\"\n---\n");
        write(root.join("undated.md"), "---\ntitle: x\n---\n");
        write(root.join("2014/01/old.md"), "---\ndate: 2014-01-01\n---\n");

        let plan = plan(root).unwrap();

        assert_eq!(plan.moves.len(), 2);
        assert_eq!(plan.skipped, vec![root.join("undated.md")]);
        let hello = &plan.moves[0];
        assert_eq!(hello.file.to, root.join("2015/02/hello.md"));
        assert_eq!(
            hello.resources.as_ref().map(|m| m.to.clone()),
            Some(root.join("2015/02/hello"))
        );
        assert!(plan.moves[1].resources.is_none());

        let applied = apply(&plan).unwrap();

        assert_eq!(applied.files, 2);
        assert_eq!(applied.dirs, 1);
        assert!(applied.conflicts.is_empty());
        assert!(root.join("2015/02/hello/cover.png").is_file());
        assert!(root.join("2016/11/plain.md").is_file());
        assert!(!root.join("hello.md").exists());
    }

    #[test]
    fn test_plan_skips_unreadable_post() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root.join("good.md"), "---\ndate: 2019-07-01\n---\n");
        fs::write(root.join("latin1.md"), b"---\ndate: 2019-07-02\ntitle: caf\xe9\n---\n").unwrap();

        let plan = plan(root).unwrap();

        assert_eq!(plan.moves.len(), 1);
        assert_eq!(plan.moves[0].file.to, root.join("2019/07/good.md"));
        assert_eq!(plan.unreadable, vec![root.join("latin1.md")]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_apply_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root.join("a.md"), "---\ndate: 2020-03-04\n---\nnew");
        write(root.join("2020/03/a.md"), "existing");

        let applied = apply(&plan(root).unwrap()).unwrap();

        assert_eq!(applied.files, 0);
        assert_eq!(applied.conflicts.len(), 1);
        assert_eq!(
            fs::read_to_string(root.join("2020/03/a.md")).unwrap(),
            "existing"
        );
        assert!(root.join("a.md").exists());
    }
}
