use std::path::Path;

use crate::access::{AccessMask, Identity};
use crate::error::Result;
use crate::platform::Flavor;
use crate::vfs::Entry;

/// The operation set shared by the plain engine and its decorators.
///
/// Every `path` may be absolute or relative to the current working directory;
/// implementations normalize it before use.
pub trait FsOps {
    /// Current working directory, absolute and normalized.
    fn cwd(&self) -> &Path;
    fn chdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    fn identity(&self) -> &Identity;
    fn identity_mut(&mut self) -> &mut Identity;
    fn flavor(&self) -> Flavor;

    fn exists<P: AsRef<Path>>(&self, path: P) -> bool;
    fn is_file<P: AsRef<Path>>(&self, path: P) -> bool;
    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool;
    fn lookup<P: AsRef<Path>>(&self, path: P) -> Result<&Entry>;

    fn mkdir<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()>;
    fn makedirs<P: AsRef<Path>>(&mut self, path: P, mode: u32, exist_ok: bool) -> Result<()>;
    fn listdir<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>>;
    fn chown<P: AsRef<Path>>(&mut self, path: P, uid: i32, gid: i32) -> Result<()>;
    fn chmod<P: AsRef<Path>>(&mut self, path: P, mode: u32) -> Result<()>;
    fn rmdir<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;
    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;
    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()>;
    fn access<P: AsRef<Path>>(&self, path: P, mask: AccessMask) -> Result<bool>;

    /// Alias of `remove`.
    fn unlink<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.remove(path)
    }
}

pub mod utils {
    use std::path::{Component, Path, PathBuf};

    /// Collapses `.` and `..`, drops repeated and trailing separators.
    /// `..` above the root stays at the root.
    pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
        let mut result = PathBuf::new();
        for component in path.as_ref().components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if let Some(parent) = result.parent() {
                        result = parent.to_path_buf();
                    }
                }
                _ => result.push(component),
            }
        }
        result
    }

    pub fn is_virtual_root<P: AsRef<Path>>(path: P) -> bool {
        let mut components = path.as_ref().components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::RootDir), None)
        )
    }

    /// Every prefix of an absolute normalized path, root first.
    pub fn prefixes(path: &Path) -> Vec<PathBuf> {
        let mut built = PathBuf::new();
        path.components()
            .map(|component| {
                built.push(component);
                built.clone()
            })
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_normalize() {
            assert_eq!(normalize("/foo/././bar"), Path::new("/foo/bar"));
            assert_eq!(normalize("/foo/./../bar"), Path::new("/bar"));
            assert_eq!(normalize("/foo//bar/"), Path::new("/foo/bar"));
            assert_eq!(normalize("/../../.."), Path::new("/"));
            assert_eq!(normalize("/"), Path::new("/"));
        }

        #[test]
        fn test_is_virtual_root() {
            assert!(is_virtual_root("/"));
            assert!(!is_virtual_root("/a"));
            assert!(!is_virtual_root(""));
            assert!(!is_virtual_root("a"));
        }

        #[test]
        fn test_prefixes() {
            assert_eq!(
                prefixes(Path::new("/a/b/c")),
                vec![
                    PathBuf::from("/"),
                    PathBuf::from("/a"),
                    PathBuf::from("/a/b"),
                    PathBuf::from("/a/b/c"),
                ]
            );
            assert_eq!(prefixes(Path::new("/")), vec![PathBuf::from("/")]);
        }
    }
}
