//! Filesystem collaborators: project-root discovery, file enumeration and
//! write helpers.
//!
//! Enumeration is kept behind the [`FileEnumerator`] trait so the analyzer
//! can be driven with a fixed file set in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

/// Walks upward from `start` looking for a `package.json`, which marks the
/// project root. Falls back to `start` when none is found.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();

    loop {
        debug!("Searching for package.json in: {}", current.display());
        if current.join("package.json").is_file() {
            return current;
        }
        if !current.pop() {
            break;
        }
    }

    warn!(
        "No package.json found above {}, using it as the project root",
        start.display()
    );
    start.to_path_buf()
}

/// Yields the files under a root directory matching an extension list.
pub trait FileEnumerator {
    /// Returns matching file paths, sorted for deterministic processing.
    fn list_files(&self, root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>>;
}

/// Default [`FileEnumerator`] backed by a recursive directory walk.
pub struct WalkdirEnumerator;

impl FileEnumerator for WalkdirEnumerator {
    fn list_files(&self, root: &Path, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            ));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if matches_extension(path, extensions) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Returns `path` relative to `root` when possible, normalized to forward
/// slashes so report output is stable across platforms.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_locates_marker() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        let nested = root.join("src").join("components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();

        assert_eq!(find_project_root(&nested), root);
    }

    #[test]
    fn test_find_project_root_falls_back_to_start() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("no-marker");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), nested);
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/Second.tsx"), "").unwrap();
        fs::write(dir.path().join("First.tsx"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let files = WalkdirEnumerator
            .list_files(dir.path(), &[".tsx".to_string()])
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("First.tsx"));
        assert!(files[1].ends_with("b/Second.tsx"));
    }

    #[test]
    fn test_list_files_skips_ignored_dirs() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/Dep.tsx"), "").unwrap();
        fs::write(dir.path().join("App.tsx"), "").unwrap();

        let files = WalkdirEnumerator
            .list_files(dir.path(), &[".tsx".to_string()])
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("App.tsx"));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deep/nested/out.md");

        write_file(&target, "content").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/project");
        let file = Path::new("/project/src/components/Button.tsx");
        assert_eq!(relative_path(root, file), "src/components/Button.tsx");
    }
}
