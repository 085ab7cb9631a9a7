//! Flat entry store addressed by normalized absolute path.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use crate::core::utils;
use crate::error::{FsError, Result};
use crate::vfs::Entry;

/// Entries keyed by inner absolute normalized path, plus the working
/// directory that relative paths are resolved against.
///
/// `BTreeMap` keeps a directory's subtree contiguous: every descendant of
/// `/a` sorts after `/a` and before the next sibling, so subtree scans are
/// range queries.
#[derive(Debug, Clone)]
pub struct PathIndex {
    cwd: PathBuf,                      // inner absolute normalized path
    entries: BTreeMap<PathBuf, Entry>, // inner absolute normalized paths
}

impl PathIndex {
    /// Index with no entries at all, working directory `/`.
    pub fn new() -> Self {
        Self {
            cwd: PathBuf::from("/"),
            entries: BTreeMap::new(),
        }
    }

    /// Index holding only `root`, stored under `/` whatever its own path says.
    pub fn with_root(mut root: Entry) -> Self {
        let inner = PathBuf::from("/");
        root.set_path(inner.clone());
        Self {
            cwd: inner.clone(),
            entries: BTreeMap::from([(inner, root)]),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Caller guarantees `path` is an existing directory.
    pub(crate) fn set_cwd(&mut self, path: PathBuf) {
        self.cwd = path;
    }

    /// Resolves `path` against the working directory and normalizes it.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        utils::normalize(self.cwd.join(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries.contains_key(&self.resolve(path))
    }

    pub fn has_file<P: AsRef<Path>>(&self, path: P) -> bool {
        self.get(path).is_some_and(Entry::is_file)
    }

    pub fn has_directory<P: AsRef<Path>>(&self, path: P) -> bool {
        self.get(path).is_some_and(Entry::is_dir)
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&Entry> {
        self.entries.get(&self.resolve(path))
    }

    pub fn lookup<P: AsRef<Path>>(&self, path: P) -> Result<&Entry> {
        let inner = self.resolve(path);
        self.entries.get(&inner).ok_or(FsError::NotFound(inner))
    }

    pub(crate) fn lookup_mut<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Entry> {
        let inner = self.resolve(path);
        self.entries.get_mut(&inner).ok_or(FsError::NotFound(inner))
    }

    /// Entries whose immediate parent is `path`, in path order.
    pub fn children<P: AsRef<Path>>(&self, path: P) -> impl Iterator<Item = &Entry> {
        let inner = self.resolve(path);
        let depth = inner.components().count() + 1;
        self.descendants_of(inner)
            .filter(move |entry| entry.path().components().count() == depth)
    }

    /// Every entry strictly below `path`, in path order.
    pub fn descendants<P: AsRef<Path>>(&self, path: P) -> impl Iterator<Item = &Entry> {
        self.descendants_of(self.resolve(path))
    }

    fn descendants_of(&self, inner: PathBuf) -> impl Iterator<Item = &Entry> {
        self.entries
            .range::<PathBuf, _>((Bound::Excluded(inner.clone()), Bound::Unbounded))
            .take_while(move |(path, _)| path.starts_with(&inner))
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Stores `entry` under its own (already normalized) path.
    /// Fails if the path is taken.
    pub(crate) fn insert(&mut self, entry: Entry) -> Result<()> {
        let path = entry.path().to_path_buf();
        if self.entries.contains_key(&path) {
            return Err(FsError::AlreadyExists(path));
        }
        self.entries.insert(path, entry);
        Ok(())
    }

    pub(crate) fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<Entry> {
        let inner = self.resolve(path);
        self.entries.remove(&inner).ok_or(FsError::NotFound(inner))
    }

    /// Moves `src` and its whole subtree under `dst`, dragging the working
    /// directory along if it lies inside the subtree.
    ///
    /// All affected entries are taken out first and put back with rewritten
    /// paths; the caller has already checked that none of the new paths are
    /// taken. Returns the number of entries moved.
    pub(crate) fn reparent(&mut self, src: &Path, dst: &Path) -> usize {
        let moved: Vec<PathBuf> = std::iter::once(src.to_path_buf())
            .chain(self.descendants_of(src.to_path_buf()).map(|e| e.path().to_path_buf()))
            .collect();

        let mut rewritten = Vec::with_capacity(moved.len());
        for old in &moved {
            if let Some(mut entry) = self.entries.remove(old) {
                // `old` starts with `src` by construction
                let new = rebase(old, src, dst).unwrap_or_else(|| old.clone());
                entry.set_path(new.clone());
                rewritten.push((new, entry));
            }
        }

        let count = rewritten.len();
        self.entries.extend(rewritten);
        if let Some(cwd) = rebase(&self.cwd, src, dst) {
            self.cwd = cwd;
        }
        count
    }
}

/// `path` with its `src` prefix swapped for `dst`, or `None` if `path` is not
/// under `src`. `src` itself maps to exactly `dst`, without a trailing separator.
fn rebase(path: &Path, src: &Path, dst: &Path) -> Option<PathBuf> {
    match path.strip_prefix(src) {
        Ok(rest) if rest.as_os_str().is_empty() => Some(dst.to_path_buf()),
        Ok(rest) => Some(dst.join(rest)),
        Err(_) => None,
    }
}

impl Default for PathIndex {
    fn default() -> Self {
        Self::new()
    }
}
