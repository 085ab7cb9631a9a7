//! `FakeOs`: a mock of the process-facing operating system interface.

use std::path::Path;

use crate::access::{AccessMask, Identity};
use crate::core::FsOps;
use crate::device::Device;
use crate::env::Environment;
use crate::error::Result;
use crate::platform::{PlatformProfile, Uname};
use crate::vfs::{Entry, Guarded, MemFs};

/// Filesystem, environment and platform record behind one `os`-like API.
///
/// Filesystem calls go through `Guarded`, so they are subject to the current
/// identity's permissions. The default identity is a sudoer; switch with
/// `setuid`/`setgid` or `with_identity`.
///
/// ```
/// use mockos::{FakeOs, FsError, Identity};
///
/// let mut os = FakeOs::new();
/// os.makedirs("/home/alice", 0o755, false).unwrap();
/// os.chown("/home/alice", 1000, 1000).unwrap();
///
/// os.set_identity(Identity::user(1000, 1000));
/// os.chdir("/home/alice").unwrap();
/// os.mkdir("projects", 0o700).unwrap();
/// assert_eq!(os.listdir(".").unwrap(), vec!["projects"]);
///
/// assert!(matches!(os.mkdir("/home/bob", 0o755), Err(FsError::PermissionDenied(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeOs {
    fs: Guarded<MemFs>,
    environment: Environment,
    platform: PlatformProfile,
}

impl FakeOs {
    /// Unix, one CPU, empty environment, sudoer identity, cwd `/`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the filesystem's identity.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.set_identity(identity);
        self
    }

    /// Also switches the filesystem to the profile's rename rules.
    pub fn with_platform(mut self, platform: PlatformProfile) -> Self {
        self.fs.inner_mut().set_flavor(platform.flavor());
        self.platform = platform;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the whole filesystem (identity and flavor included).
    pub fn with_filesystem(mut self, fs: MemFs) -> Self {
        self.fs = Guarded::new(fs);
        self
    }

    /// Creates `cwd` (and its parents) if needed and moves into it.
    pub fn with_cwd<P: AsRef<Path>>(mut self, cwd: P) -> Result<Self> {
        let cwd = cwd.as_ref();
        self.fs.inner_mut().makedirs(cwd, 0o777, true)?;
        self.fs.chdir(cwd)?;
        Ok(self)
    }

    pub fn fs(&self) -> &Guarded<MemFs> {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut Guarded<MemFs> {
        &mut self.fs
    }

    pub fn identity(&self) -> &Identity {
        self.fs.identity()
    }

    pub fn set_identity(&mut self, identity: Identity) {
        *self.fs.identity_mut() = identity;
    }

    pub fn platform(&self) -> &PlatformProfile {
        &self.platform
    }

    /// Seeds a file owned by the current identity, bypassing permissions.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        self.fs.inner_mut().add_file(path, mode)
    }

    /// Seeds an entry with explicit ownership, bypassing permissions.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        self.fs.inner_mut().insert(entry)
    }

    // --- filesystem ---

    pub fn mkdir<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        self.fs.mkdir(path, mode)
    }

    pub fn makedirs<P: AsRef<Path>>(&mut self, path: P, mode: u32, exist_ok: bool) -> Result<()> {
        self.fs.makedirs(path, mode, exist_ok)
    }

    pub fn listdir<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        self.fs.listdir(path)
    }

    pub fn rmdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.fs.rmdir(path)
    }

    pub fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.fs.remove(path)
    }

    pub fn unlink<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.fs.unlink(path)
    }

    pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        self.fs.rename(src, dst)
    }

    pub fn chown<P: AsRef<Path>>(&mut self, path: P, uid: i32, gid: i32) -> Result<()> {
        self.fs.chown(path, uid, gid)
    }

    pub fn chmod<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()> {
        self.fs.chmod(path, mode)
    }

    pub fn access<P: AsRef<Path>>(&self, path: P, mask: AccessMask) -> Result<bool> {
        self.fs.access(path, mask)
    }

    pub fn getcwd(&self) -> String {
        self.fs.cwd().display().to_string()
    }

    pub fn chdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.fs.chdir(path)
    }

    // --- environment ---

    pub fn environ(&self) -> &Environment {
        &self.environment
    }

    pub fn getenv(&self, key: &str) -> Option<&str> {
        self.environment.getenv(key)
    }

    pub fn putenv(&mut self, key: &str, value: &str) {
        self.environment.putenv(key, value);
    }

    // --- process ---

    pub fn getuid(&self) -> i32 {
        self.fs.identity().uid
    }

    pub fn setuid(&mut self, uid: i32) {
        self.fs.identity_mut().uid = uid;
    }

    pub fn getgid(&self) -> i32 {
        self.fs.identity().gid
    }

    pub fn setgid(&mut self, gid: i32) {
        self.fs.identity_mut().gid = gid;
    }

    // --- platform ---

    pub fn cpu_count(&self) -> usize {
        self.platform.cpu_count()
    }

    pub fn uname(&self) -> Result<&Uname> {
        self.platform.uname()
    }

    pub fn makedev(&self, major: u32, minor: u32) -> Device {
        Device::from_major_minor(major, minor)
    }
}
