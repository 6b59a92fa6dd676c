//! File system utilities for bundling.
//!
//! Directory listing for bundle candidates and non-clobbering file creation.

use crate::bundler::{Error, Result, error::ErrorExt, settings::SKIP_DIRS};
use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// Lists the files under `base_dir`, relative to it.
///
/// `.ipynb_checkpoints` and `.git` directories are pruned at every depth.
/// With `include_subdirs == false` the walk never descends below `base_dir`.
/// Paths come back in walk order, unsorted.
///
/// Symlinks are not followed. A symlink pointing at a file is listed; one
/// pointing at a directory is not.
pub fn list_files(base_dir: &Path, include_subdirs: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(base_dir).min_depth(1).follow_links(false);
    if !include_subdirs {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker.into_iter().filter_entry(|e| !is_skipped_dir(e)) {
        let entry = entry?;
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            continue;
        }
        files.push(entry.path().strip_prefix(base_dir)?.to_path_buf());
    }

    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Creates `path` with `contents` unless it already exists.
///
/// Existence check and creation are a single atomic open, so an existing
/// file is never truncated.
///
/// # Returns
///
/// * `Ok(true)` - The file was created
/// * `Ok(false)` - A file already existed and was left untouched
pub fn write_new_file(path: &Path, contents: &[u8]) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e).fs_context("creating file", path),
    };
    file.write_all(contents).fs_context("writing file", path)?;
    Ok(true)
}

/// Converts a relative path into a `/`-separated bundle member name.
pub fn to_bundle_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical bundle member name for a relative path string.
///
/// `.` components are dropped and the rest joined with `/`, so `./data.csv`
/// and `data.csv` name the same member. This is the form used for manifest
/// keys, the duplicate-member guard and tar headers alike.
///
/// # Errors
///
/// [`Error::InvalidMemberName`] for absolute paths, `..` components, or a name
/// with nothing left after normalization.
pub fn normalize_member_name(name: &str) -> Result<String> {
    let invalid = || Error::InvalidMemberName {
        name: name.to_string(),
    };

    let mut parts = Vec::new();
    for component in Path::new(name).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }

    if parts.is_empty() {
        return Err(invalid());
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for path in [
            "notebook.ipynb",
            "somedata.csv",
            "subdir/subfile",
            "subdir2/subfile2",
            "subdir2/.git/HEAD",
            ".ipynb_checkpoints/notebook.ipynb",
            ".git/config",
        ] {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, path.to_string_lossy().as_bytes()).unwrap();
        }
        dir
    }

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn recursive_listing_skips_reserved_dirs() {
        let dir = tree();
        let files = sorted(list_files(dir.path(), true).unwrap());
        assert_eq!(
            files,
            [
                PathBuf::from("notebook.ipynb"),
                PathBuf::from("somedata.csv"),
                PathBuf::from("subdir/subfile"),
                PathBuf::from("subdir2/subfile2"),
            ]
        );
        for path in &files {
            for component in path.components() {
                let name = component.as_os_str().to_string_lossy();
                assert!(!SKIP_DIRS.contains(&&*name), "{}", path.display());
            }
        }
    }

    #[test]
    fn recursive_listing_follows_walk_order() {
        let dir = tree();
        let walked: Vec<PathBuf> = WalkDir::new(dir.path())
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .map(|e| e.unwrap())
            .filter(|e| !e.file_type().is_dir())
            .map(|e| e.path().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(list_files(dir.path(), true).unwrap(), walked);
    }

    #[test]
    fn flat_listing_has_no_separators() {
        let dir = tree();
        let files = sorted(list_files(dir.path(), false).unwrap());
        assert_eq!(
            files,
            [PathBuf::from("notebook.ipynb"), PathBuf::from("somedata.csv")]
        );
        assert!(files.iter().all(|p| p.components().count() == 1));
    }

    #[test]
    fn missing_base_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_files(&dir.path().join("absent"), true).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dirs_are_not_listed() {
        let dir = tree();
        std::os::unix::fs::symlink(dir.path().join("subdir"), dir.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("somedata.csv"),
            dir.path().join("alias.csv"),
        )
        .unwrap();
        let files = list_files(dir.path(), true).unwrap();
        assert!(files.contains(&PathBuf::from("alias.csv")));
        assert!(!files.iter().any(|p| p.starts_with("linked")));
    }

    #[test]
    fn write_new_file_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        assert!(write_new_file(&path, b"first").unwrap());
        assert!(!write_new_file(&path, b"second").unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"first");
    }

    #[test]
    fn member_names_drop_current_dir() {
        assert_eq!(normalize_member_name("data.csv").unwrap(), "data.csv");
        assert_eq!(normalize_member_name("./data.csv").unwrap(), "data.csv");
        assert_eq!(normalize_member_name("sub/./raw//x.csv").unwrap(), "sub/raw/x.csv");
    }

    #[test]
    fn member_names_stay_inside_the_bundle() {
        for name in ["../secret.txt", "sub/../../x", "/etc/passwd", ".", ""] {
            let err = normalize_member_name(name).unwrap_err();
            assert!(
                matches!(err, Error::InvalidMemberName { name: ref n } if n == name),
                "{name}"
            );
        }
    }

    #[test]
    fn bundle_names_use_forward_slashes() {
        let rel: PathBuf = ["data", "raw", "x.csv"].iter().collect();
        assert_eq!(to_bundle_name(&rel), "data/raw/x.csv");
    }
}
