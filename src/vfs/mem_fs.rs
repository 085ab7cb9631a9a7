//! This module provides the in-memory filesystem engine: structural rules only,
//! no permission checks (see `Guarded` for those).

use std::path::{Path, PathBuf};

use log::trace;

use crate::access::{AccessMask, Identity, UNCHANGED_ID};
use crate::core::{FsOps, utils};
use crate::error::{FsError, Result};
use crate::platform::Flavor;
use crate::vfs::{Entry, PathIndex};

/// Mode given to the root directory of a fresh filesystem.
pub const ROOT_MODE: u32 = 0o777;

/// A virtual file system that keeps file and directory records in memory.
///
/// `MemFs` tracks metadata only (kind, mode, owner); it never stores file
/// contents and never touches the host filesystem.
///
/// ### Internal state
///
/// * `index` — all entries keyed by inner absolute normalized path, plus the
///   current working directory used to resolve relative paths.
/// * `identity` — the user new entries are owned by, and on whose behalf
///   `access()` is evaluated.
/// * `flavor` — decides whether `rename()` may overwrite an existing file.
///
/// ### Invariants
///
/// 1. **Root existence**: `/` is always present and is a directory. It can be neither removed
///    nor renamed.
/// 2. **Path normalization**: every key, and the working directory, is absolute and normalized.
/// 3. **Parent consistency**: an entry can only be created below an existing directory.
/// 4. **Uniqueness**: each path maps to exactly one `Entry`.
///
/// ### Thread Safety
///
/// Not thread-safe. Use one instance per test, or wrap it in a `Mutex` at the
/// application level.
///
/// ### Example
///
/// ```
/// use mockos::{FsOps, MemFs};
///
/// let mut fs = MemFs::new();
/// fs.makedirs("/a/b", 0o755, false).unwrap();
/// fs.add_file("/a/b/c.txt", 0o644).unwrap();
/// fs.rename("/a/b", "/a/e").unwrap();
///
/// assert_eq!(fs.listdir("/a/e").unwrap(), vec!["c.txt"]);
/// assert!(!fs.exists("/a/b"));
/// ```
#[derive(Debug, Clone)]
pub struct MemFs {
    index: PathIndex,
    identity: Identity,
    flavor: Flavor,
}

impl MemFs {
    /// Creates new MemFs instance with a root identity and Unix rename rules.
    /// The root directory and the working directory are set to `/`.
    pub fn new() -> Self {
        Self::with_config(Identity::root(), Flavor::Unix)
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self::with_config(identity, Flavor::Unix)
    }

    pub fn with_flavor(flavor: Flavor) -> Self {
        Self::with_config(Identity::root(), flavor)
    }

    /// The root directory is owned by `identity`.
    pub fn with_config(identity: Identity, flavor: Flavor) -> Self {
        let root = Entry::directory("/", ROOT_MODE, identity.uid, identity.gid);
        Self {
            index: PathIndex::with_root(root),
            identity,
            flavor,
        }
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
    }

    pub fn set_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
    }

    /// Read-only view of the entry store.
    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// Seeds a file owned by the current identity.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let inner = self.index.resolve(path);
        let entry = Entry::file(inner, mode, self.identity.uid, self.identity.gid);
        self.insert(entry)
    }

    /// Seeds an entry with explicit ownership. The entry's path may be relative;
    /// its parent must be an existing directory.
    pub fn insert(&mut self, mut entry: Entry) -> Result<()> {
        let inner = self.index.resolve(entry.path());
        self.check_creatable(&inner)?;
        entry.set_path(inner);
        trace!("insert {:?} {}", entry.kind(), entry.path().display());
        self.index.insert(entry)
    }

    /// `inner` must not exist and its parent must be a directory.
    fn check_creatable(&self, inner: &Path) -> Result<()> {
        if self.index.has(inner) {
            return Err(FsError::AlreadyExists(inner.to_path_buf()));
        }
        if let Some(parent) = inner.parent() {
            match self.index.get(parent) {
                None => return Err(FsError::NotFound(inner.to_path_buf())),
                Some(entry) if entry.is_file() => {
                    return Err(FsError::NotADirectory(parent.to_path_buf()));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FsOps for MemFs {
    fn cwd(&self) -> &Path {
        self.index.cwd()
    }

    /// Changes the current working directory.
    /// * `path` can be in relative or absolute form, but it must be an existing directory.
    fn chdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let target = self.index.resolve(path);
        if self.index.lookup(&target)?.is_file() {
            return Err(FsError::NotADirectory(target));
        }
        self.index.set_cwd(target);
        Ok(())
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn flavor(&self) -> Flavor {
        self.flavor
    }

    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.index.has(path)
    }

    fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        self.index.has_file(path)
    }

    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        self.index.has_directory(path)
    }

    fn lookup<P: AsRef<Path>>(&self, path: P) -> Result<&Entry> {
        self.index.lookup(path)
    }

    /// Creates a single directory owned by the current identity.
    ///
    /// # Errors
    /// * `AlreadyExists` - `path` is taken by a file or directory.
    /// * `NotFound` - the parent directory does not exist.
    /// * `NotADirectory` - the parent is a file.
    fn mkdir<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let inner = self.index.resolve(path);
        self.check_creatable(&inner)?;
        trace!("mkdir {} mode {:#o}", inner.display(), mode);
        self.index.insert(Entry::directory(
            inner,
            mode,
            self.identity.uid,
            self.identity.gid,
        ))
    }

    /// Creates directory and all its missing parents, root first.
    ///
    /// A file sitting on any prefix of `path` fails with `AlreadyExists`. If
    /// `path` itself was already present and `exist_ok` is false the call
    /// fails with `AlreadyExists` as well.
    fn makedirs<P: AsRef<Path>>(&mut self, path: P, mode: u32, exist_ok: bool) -> Result<()> {
        let inner = self.index.resolve(path);
        let existed = self.index.has(&inner);

        for prefix in utils::prefixes(&inner) {
            if self.index.has_file(&prefix) {
                return Err(FsError::AlreadyExists(prefix));
            }
            if !self.index.has(&prefix) {
                self.mkdir(&prefix, mode)?;
            }
        }

        if existed && !exist_ok {
            return Err(FsError::AlreadyExists(inner));
        }
        Ok(())
    }

    /// Returns the base names of the immediate children of `path`, in sorted order.
    ///
    /// `NotFound` unless `path` is an existing directory.
    fn listdir<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let inner = self.index.resolve(path);
        if !self.index.has_directory(&inner) {
            return Err(FsError::NotFound(inner));
        }
        Ok(self.index.children(&inner).map(Entry::name).collect())
    }

    /// Changes ownership. `-1` for either id leaves that id untouched.
    fn chown<P: AsRef<Path>>(&mut self, path: P, uid: i32, gid: i32) -> Result<()> {
        let entry = self.index.lookup_mut(path)?;
        if uid != UNCHANGED_ID {
            entry.set_uid(uid);
        }
        if gid != UNCHANGED_ID {
            entry.set_gid(gid);
        }
        trace!("chown {} {}:{}", entry.path().display(), entry.uid(), entry.gid());
        Ok(())
    }

    fn chmod<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let entry = self.index.lookup_mut(path)?;
        entry.set_mode(mode);
        trace!("chmod {} {:#o}", entry.path().display(), mode);
        Ok(())
    }

    /// Removes an empty directory. The root is never removed.
    fn rmdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let inner = self.index.resolve(path);
        match self.index.get(&inner) {
            None => return Err(FsError::NotFound(inner)),
            Some(entry) if entry.is_file() => return Err(FsError::NotADirectory(inner)),
            Some(_) => {}
        }
        if self.index.children(&inner).next().is_some() {
            return Err(FsError::DirectoryNotEmpty(inner));
        }
        if utils::is_virtual_root(&inner) {
            return Err(FsError::InvalidArgument {
                path: inner,
                reason: "the root cannot be removed",
            });
        }
        trace!("rmdir {}", inner.display());
        self.index.remove(&inner).map(|_| ())
    }

    /// Removes a file. Directories are refused with `IsADirectory`.
    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let inner = self.index.resolve(path);
        if self.index.lookup(&inner)?.is_dir() {
            return Err(FsError::IsADirectory(inner));
        }
        trace!("remove {}", inner.display());
        self.index.remove(&inner).map(|_| ())
    }

    /// Moves `src` (and, for a directory, everything below it) to `dst`.
    ///
    /// # Behavior
    /// - **Same path**: no-op.
    /// - **Existing directory at `dst`**: `AlreadyExists` on every flavor.
    /// - **Existing file at `dst`**: replaced on Unix, `AlreadyExists` on Windows.
    /// - **Missing `src` or missing parent of `dst`**: `NotFound`.
    /// - **Root, or a directory into its own subtree**: `InvalidArgument`.
    /// - **Subtree**: every descendant of `src` gets the `src` prefix replaced by `dst` in the
    ///   same call; nothing can observe a half-moved tree.
    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let src = self.index.resolve(src);
        let dst = self.index.resolve(dst);
        if src == dst {
            return Ok(());
        }
        if utils::is_virtual_root(&src) {
            return Err(FsError::InvalidArgument {
                path: src,
                reason: "the root cannot be moved",
            });
        }
        let src_is_dir = self.index.lookup(&src)?.is_dir();
        if src_is_dir && dst.starts_with(&src) {
            return Err(FsError::InvalidArgument {
                path: dst,
                reason: "cannot move a directory into itself",
            });
        }

        let replaces_file = match self.index.get(&dst) {
            Some(existing) if existing.is_dir() => return Err(FsError::AlreadyExists(dst)),
            Some(_) if self.flavor == Flavor::Windows => return Err(FsError::AlreadyExists(dst)),
            Some(_) => true,
            None => false,
        };

        if let Some(parent) = dst.parent() {
            match self.index.get(parent) {
                None => return Err(FsError::NotFound(dst)),
                Some(entry) if entry.is_file() => {
                    return Err(FsError::NotADirectory(parent.to_path_buf()));
                }
                Some(_) => {}
            }
        }

        if replaces_file {
            self.index.remove(&dst)?;
        }
        let moved = self.index.reparent(&src, &dst);
        trace!(
            "rename {} -> {} ({} entries)",
            src.display(),
            dst.display(),
            moved
        );
        Ok(())
    }

    /// With `F_OK` answers whether `path` exists; otherwise evaluates the
    /// current identity against the entry at `path`.
    fn access<P: AsRef<Path>>(&self, path: P, mask: AccessMask) -> Result<bool> {
        if mask.is_empty() {
            return Ok(self.index.has(path));
        }
        let entry = self.index.lookup(path)?;
        self.identity.can_access(entry, mask)
    }
}
