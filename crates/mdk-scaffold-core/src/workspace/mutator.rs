//! Directory mutation capability
//!
//! The normalizer and composer only touch the filesystem through
//! [`DirectoryMutator`], so their logic runs the same against the real disk
//! ([`DiskMutator`]) and against an in-memory tree ([`MemoryMutator`]).

use crate::error::{FsOp, Result, ScaffoldError};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Filesystem side effects needed by a regeneration run
pub trait DirectoryMutator {
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of `path`, in the order the backend lists them
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn remove_file(&mut self, path: &Path) -> Result<()>;

    /// Create or fully replace a file
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()>;

    fn rename(&mut self, from: &Path, to: &Path) -> Result<()>;
}

/// Mutator backed by the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskMutator;

impl DirectoryMutator for DiskMutator {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory loop"));
                ScaffoldError::fs(FsOp::List, path, source)
            })?;
            // Symlinked sub-projects count as directories
            let kind = if entry.path().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "removing file");
        std::fs::remove_file(path).map_err(|e| ScaffoldError::fs(FsOp::Remove, path, e))
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
        std::fs::write(path, contents).map_err(|e| ScaffoldError::fs(FsOp::Write, path, e))
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<()> {
        tracing::debug!(from = %from.display(), to = %to.display(), "renaming file");
        std::fs::rename(from, to).map_err(|e| ScaffoldError::fs(FsOp::Rename, from, e))
    }
}

/// In-memory directory tree for exercising the core without disk I/O
///
/// Directories are tracked explicitly; files map to their contents. Listing
/// order is lexicographic, which keeps tests deterministic.
#[derive(Debug, Default, Clone)]
pub struct MemoryMutator {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    read_only: Vec<PathBuf>,
}

impl MemoryMutator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all of its ancestors
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        self
    }

    /// Add a file, creating its parent directories
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: &str) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        self
    }

    /// Make every mutation under `path` fail with permission denied
    pub fn deny_writes(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.read_only.push(path.as_ref().to_path_buf());
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    /// Names of the files directly inside `dir`, sorted
    pub fn file_names(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let dir = dir.as_ref();
        self.files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    fn check_writable(&self, op: FsOp, path: &Path) -> Result<()> {
        if self.read_only.iter().any(|ro| path.starts_with(ro)) {
            return Err(ScaffoldError::fs(
                op,
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        Ok(())
    }

    fn not_found(op: FsOp, path: &Path) -> ScaffoldError {
        ScaffoldError::fs(op, path, io::Error::from(io::ErrorKind::NotFound))
    }
}

impl DirectoryMutator for MemoryMutator {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(Self::not_found(FsOp::List, path));
        }
        let child_name = |p: &PathBuf| -> Option<String> {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        };

        let mut entries: Vec<DirEntry> = self
            .dirs
            .iter()
            .filter_map(|p| child_name(p))
            .map(|name| DirEntry {
                name,
                kind: EntryKind::Dir,
            })
            .chain(self.files.keys().filter_map(|p| child_name(p)).map(|name| DirEntry {
                name,
                kind: EntryKind::File,
            }))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        self.check_writable(FsOp::Remove, path)?;
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(FsOp::Remove, path))
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.check_writable(FsOp::Write, path)?;
        match path.parent() {
            Some(parent) if self.is_dir(parent) => {}
            _ => return Err(Self::not_found(FsOp::Write, path)),
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<()> {
        self.check_writable(FsOp::Rename, from)?;
        let contents = self
            .files
            .remove(from)
            .ok_or_else(|| Self::not_found(FsOp::Rename, from))?;
        self.files.insert(to.to_path_buf(), contents);
        Ok(())
    }
}
