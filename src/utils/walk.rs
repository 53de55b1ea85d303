//! File collection.

use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Whether `path` has extension `ext` (case-insensitive).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// All files under `dir` with extension `ext`, recursively, sorted.
pub fn collect_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| has_extension(p, ext))
        .collect();
    files.sort();
    files
}

/// Files directly inside `dir` with extension `ext`, sorted.
pub fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read `{}`", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("2015/02")).unwrap();
        fs::write(tmp.path().join("b.md"), "").unwrap();
        fs::write(tmp.path().join("a.MD"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("2015/02/c.md"), "").unwrap();
        tmp
    }

    #[test]
    fn test_collect_files_recursive() {
        let tmp = tree();
        let files = collect_files(tmp.path(), "md");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("2015/02/c.md"),
                PathBuf::from("a.MD"),
                PathBuf::from("b.md"),
            ]
        );
    }

    #[test]
    fn test_list_files_top_level_only() {
        let tmp = tree();
        let files = list_files(tmp.path(), "md").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.parent() == Some(tmp.path())));
    }

    #[test]
    fn test_list_files_missing_dir() {
        assert!(list_files(Path::new("/nonexistent/sitehook"), "md").is_err());
    }
}
