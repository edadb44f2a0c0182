//! Content stores - where article files come from
//!
//! The loader never touches the filesystem directly. It goes through a
//! [`ContentStore`], so the whole pipeline can run against [`MemoryStore`]
//! in tests and against [`FsStore`] for a real site.

use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::StoreError;

/// A flat, read-only collection of named text files
pub trait ContentStore {
    /// Names of every file in the store, in enumeration order
    fn list_files(&self) -> Result<Vec<String>, StoreError>;

    /// Read a file by name
    fn read_file(&self, name: &str) -> Result<String, StoreError>;
}

/// Store backed by a single directory on disk (not recursive)
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentStore for FsStore {
    fn list_files(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself is unreadable
                Err(e) if e.depth() == 0 => {
                    return Err(StoreError::Io {
                        name: self.root.display().to_string(),
                        source: e.into(),
                    });
                }
                // A single bad entry (e.g. a dangling symlink) only drops that entry
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.root, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn read_file(&self, name: &str) -> Result<String, StoreError> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

/// In-memory store; enumeration follows insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    /// Builder-style variant of [`MemoryStore::insert`]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }
}

impl ContentStore for MemoryStore {
    fn list_files(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_file(&self, name: &str) -> Result<String, StoreError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn list_files(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_files()
    }

    fn read_file(&self, name: &str) -> Result<String, StoreError> {
        (**self).read_file(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_lists_only_top_level_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mdx"), "a").unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("c.mdx"), "c").unwrap();

        let store = FsStore::new(dir.path());
        let mut names = store.list_files().unwrap();
        names.sort();
        assert_eq!(names, vec!["a.mdx", "b.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_store_skips_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.mdx"), "good").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.mdx"), dir.path().join("dangling.mdx"))
            .unwrap();

        let store = FsStore::new(dir.path());
        assert_eq!(store.list_files().unwrap(), vec!["good.mdx"]);
    }

    #[test]
    fn test_fs_store_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().join("nope"));
        assert!(store.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_fs_store_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        match store.read_file("ghost.mdx") {
            Err(StoreError::NotFound(name)) => assert_eq!(name, "ghost.mdx"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_store_keeps_insertion_order() {
        let store = MemoryStore::new()
            .with_file("z.mdx", "z")
            .with_file("a.mdx", "a");
        assert_eq!(store.list_files().unwrap(), vec!["z.mdx", "a.mdx"]);
        assert_eq!(store.read_file("a.mdx").unwrap(), "a");
        assert!(matches!(
            store.read_file("b.mdx"),
            Err(StoreError::NotFound(_))
        ));
    }
}
