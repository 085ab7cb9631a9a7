//! An in-memory mock of the operating system for fast, side-effect free tests.
//!
//! ### Overview
//!
//! `mockos` keeps a virtual filesystem of file and directory records, each with a mode and an
//! owner, and enforces POSIX-style permission bits against a configurable current user. It never
//! touches the host filesystem.
//!
//! **Key ideas**:
//! - **One operation set**: `FsOps` is implemented by the plain engine (`MemFs`) and by
//!   decorators that wrap it: `Guarded` checks permissions, `Logged` logs calls.
//! - **Determinism**: everything is synchronous and in memory; each instance owns its own
//!   identity and working directory.
//! - **Structural rules**: unique normalized paths, parents must exist, the root is permanent,
//!   renames move whole subtrees at once.
//! - **Facade**: `FakeOs` adds the small pieces of process state tests tend to need: environment
//!   variables, uid/gid, working directory, `uname`, CPU count, device numbers.
//!
//! ### Example
//!
//! ```
//! use mockos::{AccessMask, FakeOs, FsOps, Identity};
//!
//! let mut os = FakeOs::new();
//! os.makedirs("/srv/data", 0o755, false).unwrap();
//! os.add_file("/srv/data/db.sqlite", 0o600).unwrap();
//!
//! os.set_identity(Identity::user(1000, 1000));
//! assert!(!os.access("/srv/data/db.sqlite", AccessMask::R_OK).unwrap());
//! assert!(os.remove("/srv/data/db.sqlite").is_err());
//! assert!(os.fs().exists("/srv/data/db.sqlite"));
//! ```

mod access;
mod core;
mod device;
mod env;
mod error;
mod os;
mod platform;
mod vfs;

pub use access::{AccessMask, Identity, UNCHANGED_ID, parse_mode};
pub use crate::core::{FsOps, utils};
pub use device::Device;
pub use env::Environment;
pub use error::{FsError, Result};
pub use os::FakeOs;
pub use platform::{Flavor, PlatformProfile, Uname};
pub use vfs::{Entry, EntryKind, Guarded, Logged, MemFs, PathIndex, ROOT_MODE};
