//! Operating system identification: flavor, `uname` record, CPU count.

use crate::error::{FsError, Result};

/// Which family of rules the filesystem follows where Unix and Windows differ.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Unix,
    Windows,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Uname {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl Uname {
    pub fn new(sysname: &str, nodename: &str, release: &str, version: &str, machine: &str) -> Self {
        Self {
            sysname: sysname.to_string(),
            nodename: nodename.to_string(),
            release: release.to_string(),
            version: version.to_string(),
            machine: machine.to_string(),
        }
    }

    /// Fields in `uname(2)` order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.sysname,
            &self.nodename,
            &self.release,
            &self.version,
            &self.machine,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformProfile {
    Unix { cpu_count: usize, uname: Uname },
    Windows { cpu_count: usize },
}

impl PlatformProfile {
    pub fn unix(cpu_count: usize, uname: Uname) -> Self {
        PlatformProfile::Unix { cpu_count, uname }
    }

    pub fn windows(cpu_count: usize) -> Self {
        PlatformProfile::Windows { cpu_count }
    }

    pub fn flavor(&self) -> Flavor {
        match self {
            PlatformProfile::Unix { .. } => Flavor::Unix,
            PlatformProfile::Windows { .. } => Flavor::Windows,
        }
    }

    pub fn cpu_count(&self) -> usize {
        match self {
            PlatformProfile::Unix { cpu_count, .. } | PlatformProfile::Windows { cpu_count } => {
                *cpu_count
            }
        }
    }

    /// Windows has no `uname`.
    pub fn uname(&self) -> Result<&Uname> {
        match self {
            PlatformProfile::Unix { uname, .. } => Ok(uname),
            PlatformProfile::Windows { .. } => Err(FsError::Unsupported { operation: "uname" }),
        }
    }
}

impl Default for PlatformProfile {
    /// Single-CPU Unix with an empty `uname` record.
    fn default() -> Self {
        PlatformProfile::unix(1, Uname::default())
    }
}
