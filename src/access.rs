//! Identities and mode-bit permission evaluation.

use crate::error::{FsError, Result};
use crate::vfs::Entry;

/// Owner/group id value meaning "unset" (or "leave unchanged" in `chown`).
pub const UNCHANGED_ID: i32 = -1;

bitflags::bitflags! {
    /// Requested action mask, same bit layout as one octal digit of a mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessMask: u32 {
        /// Readable.
        const READ    = 0b100;
        /// Writable.
        const WRITE   = 0b010;
        /// Executable (searchable, for directories).
        const EXECUTE = 0b001;
    }
}

impl AccessMask {
    /// Existence test only.
    pub const F_OK: AccessMask = AccessMask::empty();
    pub const R_OK: AccessMask = AccessMask::READ;
    pub const W_OK: AccessMask = AccessMask::WRITE;
    pub const X_OK: AccessMask = AccessMask::EXECUTE;
}

/// Splits a mode into its (owner, group, other) digits.
///
/// Anything wider than three octal digits is rejected: special bits such as
/// setuid are stored on entries but cannot be evaluated.
pub fn parse_mode(mode: u32) -> Result<(u32, u32, u32)> {
    if mode > 0o777 {
        return Err(FsError::InvalidMode { mode });
    }
    Ok(((mode >> 6) & 0o7, (mode >> 3) & 0o7, mode & 0o7))
}

/// The user on whose behalf operations are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub uid: i32,
    pub gid: i32,
    pub is_sudoer: bool,
}

impl Identity {
    /// Unrestricted identity, uid and gid 0.
    pub fn root() -> Self {
        Self {
            uid: 0,
            gid: 0,
            is_sudoer: true,
        }
    }

    /// Ordinary user subject to mode bits.
    pub fn user(uid: i32, gid: i32) -> Self {
        Self {
            uid,
            gid,
            is_sudoer: false,
        }
    }

    pub fn can_read(&self, entry: &Entry) -> Result<bool> {
        self.can_access(entry, AccessMask::READ)
    }

    pub fn can_write(&self, entry: &Entry) -> Result<bool> {
        self.can_access(entry, AccessMask::WRITE)
    }

    pub fn can_execute(&self, entry: &Entry) -> Result<bool> {
        self.can_access(entry, AccessMask::EXECUTE)
    }

    /// Whether every bit of `action` is granted on `entry`.
    pub fn can_access(&self, entry: &Entry, action: AccessMask) -> Result<bool> {
        self.evaluate(entry.mode(), entry.uid(), entry.gid(), action)
    }

    /// Evaluates `action` against raw ownership data.
    ///
    /// A sudoer is granted everything without looking at `mode`. Otherwise the
    /// owner digit applies when uids match, the group digit when gids match,
    /// and the other digit always; any one of them granting the full mask is
    /// enough.
    pub fn evaluate(
        &self,
        mode: u32,
        owner_uid: i32,
        owner_gid: i32,
        action: AccessMask,
    ) -> Result<bool> {
        if self.is_sudoer {
            return Ok(true);
        }
        let (owner, group, other) = parse_mode(mode)?;
        let action = action.bits();
        Ok((owner & action == action && owner_uid == self.uid)
            || (group & action == action && owner_gid == self.gid)
            || other & action == action)
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::root()
    }
}
