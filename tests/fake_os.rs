use std::path::Path;

use anyhow::Result;
use mockos::{
    AccessMask, Entry, FakeOs, Flavor, FsError, FsOps, Guarded, Identity, Logged, MemFs,
    PlatformProfile,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn mkdir_then_second_mkdir_fails() -> Result<()> {
    let mut os = FakeOs::new();
    for name in ["a", "with space", "ünïcödé", "..a", "dots.in.name"] {
        let path = format!("/{name}");
        os.mkdir(&path, 0o777)?;
        assert!(os.fs().exists(&path), "{path} should exist");
        assert!(
            matches!(os.mkdir(&path, 0o777), Err(FsError::AlreadyExists(_))),
            "{path} created twice"
        );
    }
    Ok(())
}

#[test]
fn mkdir_without_parent_fails() {
    let mut os = FakeOs::new();
    for name in ["a", "b/c", "deep/er/path"] {
        let path = format!("/missing/{name}");
        assert!(matches!(os.mkdir(&path, 0o777), Err(FsError::NotFound(_))));
    }
}

#[test]
fn makedirs_twice_needs_exist_ok() -> Result<()> {
    let mut os = FakeOs::new();
    os.makedirs("/a/b/c", 0o777, false)?;
    assert!(matches!(
        os.makedirs("/a/b/c", 0o777, false),
        Err(FsError::AlreadyExists(_))
    ));
    let before: Vec<Entry> = os.fs().inner().index().iter().cloned().collect();
    os.makedirs("/a/b/c", 0o700, true)?;
    let after: Vec<Entry> = os.fs().inner().index().iter().cloned().collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn rmdir_only_when_empty() -> Result<()> {
    let mut os = FakeOs::new();
    os.makedirs("/a/b", 0o777, false)?;
    os.add_file("/a/f", 0o644)?;
    assert!(matches!(os.rmdir("/a"), Err(FsError::DirectoryNotEmpty(_))));
    os.rmdir("/a/b")?;
    os.unlink("/a/f")?;
    os.rmdir("/a")?;
    assert!(!os.fs().exists("/a"));
    Ok(())
}

#[test]
fn rename_to_itself_changes_nothing() -> Result<()> {
    let mut os = FakeOs::new();
    os.makedirs("/a/b", 0o751, false)?;
    os.chown("/a/b", 4, 5)?;
    let before: Vec<Entry> = os.fs().inner().index().iter().cloned().collect();
    os.rename("/a/b", "/a/b")?;
    let after: Vec<Entry> = os.fs().inner().index().iter().cloned().collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn rename_moves_children() -> Result<()> {
    let mut os = FakeOs::new();
    os.makedirs("/a/b/c", 0o777, false)?;
    os.rename("/a/b", "/a/e")?;
    assert_eq!(os.listdir("/a/e")?, vec!["c"]);
    assert!(!os.fs().exists("/a/b"));
    Ok(())
}

#[test]
fn renaming_the_working_directory_moves_getcwd() -> Result<()> {
    let mut os = FakeOs::new();
    os.makedirs("/a/b", 0o777, false)?;
    os.chdir("/a/b")?;
    os.rename("/a/b", "/a/e")?;
    assert_eq!(os.getcwd(), "/a/e");
    Ok(())
}

#[test]
fn stranger_against_owner_execute_only() -> Result<()> {
    init_logger();
    let mut os = FakeOs::new();
    os.insert(Entry::directory("/x", 0o100, 0, 0))?;
    os.insert(Entry::file("/x-file", 0o100, 0, 0))?;
    os.insert(Entry::file("/w-file", 0o002, 0, 0))?;
    os.set_identity(Identity::user(2, 2));

    for mask in [AccessMask::R_OK, AccessMask::W_OK, AccessMask::X_OK] {
        assert!(!os.access("/x-file", mask)?);
    }
    assert!(matches!(os.listdir("/x"), Err(FsError::PermissionDenied(_))));
    assert!(matches!(os.chmod("/x-file", 0o777), Err(FsError::PermissionDenied(_))));
    assert!(matches!(os.remove("/x-file"), Err(FsError::PermissionDenied(_))));

    assert!(os.access("/w-file", AccessMask::W_OK)?);
    os.chmod("/w-file", 0o002)?;
    Ok(())
}

#[test]
fn rename_collision_depends_on_flavor() -> Result<()> {
    let mut windows = FakeOs::new().with_platform(PlatformProfile::windows(1));
    windows.add_file("/old", 0o644)?;
    windows.add_file("/new", 0o644)?;
    windows.mkdir("/dir", 0o777)?;
    assert!(matches!(windows.rename("/old", "/new"), Err(FsError::AlreadyExists(_))));
    assert!(matches!(windows.rename("/old", "/dir"), Err(FsError::AlreadyExists(_))));

    let mut unix = FakeOs::new();
    unix.add_file("/old", 0o644)?;
    unix.add_file("/new", 0o600)?;
    unix.mkdir("/dir", 0o777)?;
    unix.rename("/old", "/new")?;
    assert!(!unix.fs().exists("/old"));
    assert_eq!(unix.fs().lookup("/new")?.mode(), 0o644);
    assert!(matches!(unix.rename("/new", "/dir"), Err(FsError::AlreadyExists(_))));
    Ok(())
}

#[test]
fn instances_do_not_share_state() -> Result<()> {
    let mut first = FakeOs::new().with_cwd("/tmp")?;
    let second = FakeOs::new();
    first.setuid(42);
    first.putenv("X", "1");
    assert_eq!(second.getcwd(), "/");
    assert_eq!(second.getuid(), 0);
    assert_eq!(second.getenv("X"), None);
    assert!(!second.fs().exists("/tmp"));
    Ok(())
}

#[test]
fn decorators_compose_over_the_engine() -> Result<()> {
    init_logger();
    let mut fs = Logged::new(Guarded::new(MemFs::with_flavor(Flavor::Windows)));
    fs.makedirs("/var/lib", 0o755, false)?;
    fs.identity_mut().is_sudoer = false;
    fs.identity_mut().uid = 7;
    assert!(matches!(fs.mkdir("/var/lib/app", 0o755), Err(FsError::PermissionDenied(_))));
    fs.chdir("/var")?;
    assert_eq!(fs.cwd(), Path::new("/var"));
    assert_eq!(fs.listdir(".")?, vec!["lib"]);
    Ok(())
}

#[test]
fn errors_convert_to_io_errors() {
    let mut os = FakeOs::new();
    let err: std::io::Error = os.rmdir("/nope").unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
