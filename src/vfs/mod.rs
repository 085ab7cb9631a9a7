mod entry;
mod guarded;
mod index;
mod logged;
mod mem_fs;

pub use entry::{Entry, EntryKind};
pub use guarded::Guarded;
pub use index::PathIndex;
pub use logged::Logged;
pub use mem_fs::{MemFs, ROOT_MODE};
