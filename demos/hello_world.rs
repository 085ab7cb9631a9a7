use mockos::{FakeOs, FsError, Identity, PlatformProfile, Uname};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug shows every denied permission check
    env_logger::init();

    // starts as a sudoer on a single-CPU Unix box, cwd `/`
    let mut os = FakeOs::new()
        .with_platform(PlatformProfile::unix(4, Uname::new("Linux", "box", "6.1", "#1", "x86_64")));
    println!("{} on {} CPUs", os.uname()?.sysname, os.cpu_count());

    // set up a home directory for alice while still root
    os.makedirs("/home/alice/docs", 0o755, false)?;
    os.chown("/home/alice", 1000, 1000)?;
    os.chown("/home/alice/docs", 1000, 1000)?;
    os.mkdir("/etc", 0o755)?;
    os.add_file("/etc/passwd", 0o644)?;

    // from now on every call is checked against alice's uid/gid
    os.set_identity(Identity::user(1000, 1000));
    os.chdir("/home/alice")?;
    os.mkdir("projects", 0o700)?;
    os.rename("docs", "documents")?;
    println!("{}: {:?}", os.getcwd(), os.listdir(".")?);

    match os.remove("/etc/passwd") {
        Err(FsError::PermissionDenied(path)) => println!("not allowed to remove {}", path.display()),
        other => println!("unexpected: {other:?}"),
    }

    os.putenv("HOME", "/home/alice");
    println!("HOME={}", &os.environ()["HOME"]);
    Ok(())
}
