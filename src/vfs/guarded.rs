//! Permission-checking decorator over any `FsOps` implementation.

use std::path::{Path, PathBuf};

use log::debug;

use crate::access::{AccessMask, Identity};
use crate::core::{FsOps, utils};
use crate::error::{FsError, Result};
use crate::platform::Flavor;
use crate::vfs::Entry;

/// Wraps a filesystem and checks the current identity's mode-bit access
/// before each mutating or listing call.
///
/// | operation                            | required access                       |
/// |--------------------------------------|---------------------------------------|
/// | `mkdir`                              | write on the parent, if it exists     |
/// | `makedirs`                           | write on the deepest existing prefix  |
/// | `listdir`                            | execute on the directory              |
/// | `chown`, `chmod`, `rmdir`, `remove`  | write on the target                   |
/// | `rename`                             | write on `src` and on `dst`'s parent  |
///
/// A denied call returns `PermissionDenied` without reaching the wrapped
/// filesystem. Checks are skipped for targets that do not exist, so the
/// wrapped filesystem gets to report `NotFound` itself.
///
/// ```
/// use mockos::{FsError, FsOps, Guarded, Identity, MemFs};
///
/// let mut fs = Guarded::new(MemFs::new());
/// fs.mkdir("/srv", 0o755).unwrap();
///
/// *fs.identity_mut() = Identity::user(1000, 1000);
/// assert!(matches!(fs.mkdir("/srv/www", 0o755), Err(FsError::PermissionDenied(_))));
/// assert!(!fs.exists("/srv/www"));
/// ```
#[derive(Debug, Clone)]
pub struct Guarded<F: FsOps> {
    inner: F,
}

impl<F: FsOps> Guarded<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unchecked access to the wrapped filesystem, e.g. for test setup.
    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        utils::normalize(self.inner.cwd().join(path))
    }

    /// `path` must exist.
    fn require(&self, path: &Path, action: AccessMask) -> Result<()> {
        let entry = self.inner.lookup(path)?;
        if self.inner.identity().can_access(entry, action)? {
            return Ok(());
        }
        let identity = self.inner.identity();
        debug!(
            "denied {:?} on {} (mode {:#o}, owner {}:{}) for {}:{}",
            action,
            path.display(),
            entry.mode(),
            entry.uid(),
            entry.gid(),
            identity.uid,
            identity.gid
        );
        Err(FsError::PermissionDenied(path.to_path_buf()))
    }

    fn require_if_exists(&self, path: &Path, action: AccessMask) -> Result<()> {
        if self.inner.exists(path) {
            self.require(path, action)
        } else {
            Ok(())
        }
    }

    fn require_parent(&self, path: &Path, action: AccessMask) -> Result<()> {
        match path.parent() {
            Some(parent) => self.require_if_exists(parent, action),
            None => Ok(()),
        }
    }
}

impl<F: FsOps + Default> Default for Guarded<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: FsOps> FsOps for Guarded<F> {
    fn cwd(&self) -> &Path {
        self.inner.cwd()
    }

    fn chdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.inner.chdir(path)
    }

    fn identity(&self) -> &Identity {
        self.inner.identity()
    }

    fn identity_mut(&mut self) -> &mut Identity {
        self.inner.identity_mut()
    }

    fn flavor(&self) -> Flavor {
        self.inner.flavor()
    }

    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.inner.exists(path)
    }

    fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        self.inner.is_dir(path)
    }

    fn lookup<P: AsRef<Path>>(&self, path: P) -> Result<&Entry> {
        self.inner.lookup(path)
    }

    fn mkdir<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let inner = self.resolve(path);
        self.require_parent(&inner, AccessMask::WRITE)?;
        self.inner.mkdir(&inner, mode)
    }

    /// Everything `makedirs` is going to create is checked up front: the
    /// first new directory needs write access on its existing parent, and
    /// each further level needs `mode` itself to let the identity write into
    /// the directory it has just created.
    fn makedirs<P: AsRef<Path>>(&mut self, path: P, mode: u32, exist_ok: bool) -> Result<()> {
        let inner = self.resolve(path);
        let prefixes = utils::prefixes(&inner);

        // nothing is checked below a file; the wrapped filesystem refuses that chain itself
        let first_missing = prefixes
            .iter()
            .position(|p| !self.inner.exists(p))
            .filter(|&i| i > 0 && self.inner.is_dir(&prefixes[i - 1]));
        if let Some(first_missing) = first_missing {
            self.require(&prefixes[first_missing - 1], AccessMask::WRITE)?;
            if let Some(second) = prefixes.get(first_missing + 1) {
                let identity = self.inner.identity();
                if !identity.evaluate(mode, identity.uid, identity.gid, AccessMask::WRITE)? {
                    debug!(
                        "denied makedirs {}: mode {:#o} forbids writing into new directories",
                        inner.display(),
                        mode
                    );
                    return Err(FsError::PermissionDenied(second.clone()));
                }
            }
        }

        self.inner.makedirs(&inner, mode, exist_ok)
    }

    fn listdir<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let inner = self.resolve(path);
        if self.inner.is_dir(&inner) {
            self.require(&inner, AccessMask::EXECUTE)?;
        }
        self.inner.listdir(&inner)
    }

    fn chown<P: AsRef<Path>>(&mut self, path: P, uid: i32, gid: i32) -> Result<()> {
        let inner = self.resolve(path);
        self.require_if_exists(&inner, AccessMask::WRITE)?;
        self.inner.chown(&inner, uid, gid)
    }

    fn chmod<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let inner = self.resolve(path);
        self.require_if_exists(&inner, AccessMask::WRITE)?;
        self.inner.chmod(&inner, mode)
    }

    fn rmdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let inner = self.resolve(path);
        self.require_if_exists(&inner, AccessMask::WRITE)?;
        self.inner.rmdir(&inner)
    }

    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let inner = self.resolve(path);
        self.require_if_exists(&inner, AccessMask::WRITE)?;
        self.inner.remove(&inner)
    }

    /// An existing file at `dst` is replaced (on Unix) without checking
    /// write access on that file; only its parent directory is checked.
    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let src = self.resolve(src);
        let dst = self.resolve(dst);
        self.require_if_exists(&src, AccessMask::WRITE)?;
        self.require_parent(&dst, AccessMask::WRITE)?;
        self.inner.rename(&src, &dst)
    }

    fn access<P: AsRef<Path>>(&self, path: P, mask: AccessMask) -> Result<bool> {
        self.inner.access(path, mask)
    }
}
