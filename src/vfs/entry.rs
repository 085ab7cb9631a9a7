use std::path::{Component, Path, PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One file or directory record.
///
/// The path is kept inside the entry as well as being its key in the index;
/// both are rewritten together on rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    kind: EntryKind,
    mode: u32,
    uid: i32,
    gid: i32,
}

impl Entry {
    pub fn new<P: AsRef<Path>>(path: P, kind: EntryKind, mode: u32, uid: i32, gid: i32) -> Entry {
        Entry {
            path: path.as_ref().to_path_buf(),
            kind,
            mode,
            uid,
            gid,
        }
    }

    pub fn file<P: AsRef<Path>>(path: P, mode: u32, uid: i32, gid: i32) -> Entry {
        Entry::new(path, EntryKind::File, mode, uid, gid)
    }

    pub fn directory<P: AsRef<Path>>(path: P, mode: u32, uid: i32, gid: i32) -> Entry {
        Entry::new(path, EntryKind::Directory, mode, uid, gid)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component, empty for the root.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn uid(&self) -> i32 {
        self.uid
    }

    pub fn gid(&self) -> i32 {
        self.gid
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_root(&self) -> bool {
        let components: Vec<_> = self.path.components().collect();
        self.kind == EntryKind::Directory
            && components.len() == 1
            && components[0] == Component::RootDir
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    pub(crate) fn set_mode(&mut self, mode: u32) {
        self.mode = mode;
    }

    pub(crate) fn set_uid(&mut self, uid: i32) {
        self.uid = uid;
    }

    pub(crate) fn set_gid(&mut self, gid: i32) {
        self.gid = gid;
    }
}
