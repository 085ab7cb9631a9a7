//! Logging decorator: records every call and its outcome through `log`.

use std::path::Path;

use log::{debug, warn};

use crate::access::{AccessMask, Identity};
use crate::core::FsOps;
use crate::error::Result;
use crate::platform::Flavor;
use crate::vfs::Entry;

/// Wraps a filesystem and logs each mutating call at `debug`, and each
/// failed call at `warn`. Queries are passed through silently.
///
/// Stacks with `Guarded` in either order; `Logged<Guarded<MemFs>>` also logs
/// permission denials.
#[derive(Debug, Clone)]
pub struct Logged<F: FsOps> {
    inner: F,
}

impl<F: FsOps> Logged<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    fn outcome<T>(&self, call: std::fmt::Arguments<'_>, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => debug!("{call}"),
            Err(err) => warn!("{call} failed: {err}"),
        }
        result
    }
}

impl<F: FsOps> FsOps for Logged<F> {
    fn cwd(&self) -> &Path {
        self.inner.cwd()
    }

    fn chdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.chdir(path);
        self.outcome(format_args!("chdir {}", path.display()), result)
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
        let path = path.as_ref();
        let result = self.inner.mkdir(path, mode);
        self.outcome(format_args!("mkdir {} {:#o}", path.display(), mode), result)
    }

    fn makedirs<P: AsRef<Path>>(&mut self, path: P, mode: u32, exist_ok: bool) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.makedirs(path, mode, exist_ok);
        self.outcome(
            format_args!("makedirs {} {:#o} exist_ok={}", path.display(), mode, exist_ok),
            result,
        )
    }

    fn listdir<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let result = self.inner.listdir(path);
        match &result {
            Ok(names) => debug!("listdir {}: {} entries", path.display(), names.len()),
            Err(err) => warn!("listdir {} failed: {err}", path.display()),
        }
        result
    }

    fn chown<P: AsRef<Path>>(&mut self, path: P, uid: i32, gid: i32) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.chown(path, uid, gid);
        self.outcome(
            format_args!("chown {} {}:{}", path.display(), uid, gid),
            result,
        )
    }

    fn chmod<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.chmod(path, mode);
        self.outcome(format_args!("chmod {} {:#o}", path.display(), mode), result)
    }

    fn rmdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.rmdir(path);
        self.outcome(format_args!("rmdir {}", path.display()), result)
    }

    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self.inner.remove(path);
        self.outcome(format_args!("remove {}", path.display()), result)
    }

    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        let result = self.inner.rename(src, dst);
        self.outcome(
            format_args!("rename {} -> {}", src.display(), dst.display()),
            result,
        )
    }

    fn access<P: AsRef<Path>>(&self, path: P, mask: AccessMask) -> Result<bool> {
        self.inner.access(path, mask)
    }
}
