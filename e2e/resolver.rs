// e2e/resolver.rs — end-to-end resolution over synthetic hosts.
//
// Drives processor::resolve through the public API with fake collaborators
// and tempfile-backed sysfs/cpuinfo trees, covering each platform strategy
// plus the unknown-platform and idempotence guarantees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use hostfacts::{processor, CommandRunner, FileSystem, PlatformKind, Probe, Sysctl};

// ── Fakes ─────────────────────────────────────────────────────────────────────

/// Filesystem rooted at a temp directory: `/sys/devices/system/cpu` and
/// `/proc/cpuinfo` lookups are rewritten into the synthetic tree, so the
/// production paths in the Linux strategy are exercised as-is.
struct RootedFs {
    root: PathBuf,
}

impl RootedFs {
    fn rewrite(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.root.join(relative)
    }
}

impl FileSystem for RootedFs {
    fn exists(&self, path: &Path) -> bool {
        self.rewrite(path).exists()
    }
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.rewrite(path))
    }
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(self.rewrite(path))?
            .map(|entry| entry.map(|e| path.join(e.file_name())))
            .collect()
    }
}

struct FakeHost {
    uname_r: Option<&'static str>,
    psrinfo_p: Option<&'static str>,
    psrinfo_plain: Option<&'static str>,
    ncpufound: Option<&'static str>,
}

impl FakeHost {
    fn none() -> Self {
        FakeHost {
            uname_r: None,
            psrinfo_p: None,
            psrinfo_plain: None,
            ncpufound: None,
        }
    }
}

impl CommandRunner for FakeHost {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let reply = match (program, args) {
            ("uname", ["-r"]) => self.uname_r,
            ("/usr/sbin/psrinfo", ["-p"]) => self.psrinfo_p,
            ("/usr/sbin/psrinfo", []) => self.psrinfo_plain,
            _ => None,
        };
        reply
            .map(|s| s.to_string())
            .ok_or_else(|| io::Error::other(format!("{program} unavailable")))
    }
}

impl Sysctl for FakeHost {
    fn get(&self, name: &str) -> Option<String> {
        match name {
            "hw.ncpufound" => self.ncpufound.map(|s| s.to_string()),
            _ => None,
        }
    }
}

fn probe<'a>(fs: &'a dyn FileSystem, host: &'a FakeHost) -> Probe<'a> {
    Probe {
        fs,
        runner: host,
        sysctl: host,
    }
}

/// Lay out `<root>/sys/devices/system/cpu/cpuN/topology/physical_package_id`
/// for each id in `package_ids`.
fn write_sysfs(root: &Path, package_ids: &[&str]) {
    for (i, id) in package_ids.iter().enumerate() {
        let topology = root
            .join("sys/devices/system/cpu")
            .join(format!("cpu{i}"))
            .join("topology");
        fs::create_dir_all(&topology).unwrap();
        fs::write(topology.join("physical_package_id"), id).unwrap();
    }
}

fn write_cpuinfo(root: &Path, contents: &str) {
    let proc_dir = root.join("proc");
    fs::create_dir_all(&proc_dir).unwrap();
    fs::write(proc_dir.join("cpuinfo"), contents).unwrap();
}

// ── Linux ─────────────────────────────────────────────────────────────────────

#[test]
fn linux_sysfs_counts_distinct_package_ids() {
    let dir = TempDir::new().unwrap();
    write_sysfs(dir.path(), &["0\n", "0\n", "1\n", "2\n", "2\n"]);
    let rooted = RootedFs {
        root: dir.path().to_path_buf(),
    };
    let host = FakeHost::none();
    assert_eq!(
        processor::resolve(PlatformKind::Linux, &probe(&rooted, &host)),
        Some(3)
    );
}

#[test]
fn linux_falls_back_to_cpuinfo_when_sysfs_is_absent() {
    let dir = TempDir::new().unwrap();
    write_cpuinfo(
        dir.path(),
        "processor\t: 0\nphysical id\t: 0\n\
         processor\t: 1\nphysical id\t: 0\n\
         processor\t: 2\nphysical id\t: 1\n\
         processor\t: 3\nphysical id\t: 1\n",
    );
    let rooted = RootedFs {
        root: dir.path().to_path_buf(),
    };
    let host = FakeHost::none();
    assert_eq!(
        processor::resolve(PlatformKind::Linux, &probe(&rooted, &host)),
        Some(2)
    );
}

#[test]
fn linux_cpuinfo_without_physical_ids_is_unknown_not_zero() {
    let dir = TempDir::new().unwrap();
    write_cpuinfo(dir.path(), "processor\t: 0\nmodel name\t: Synth CPU\n");
    let rooted = RootedFs {
        root: dir.path().to_path_buf(),
    };
    let host = FakeHost::none();
    assert_eq!(
        processor::resolve(PlatformKind::Linux, &probe(&rooted, &host)),
        None
    );
}

// ── Solaris ───────────────────────────────────────────────────────────────────

#[test]
fn solaris_5_8_and_later_use_the_flag() {
    for release in ["5.8\n", "5.11\n", "6.0\n"] {
        let host = FakeHost {
            uname_r: Some(release),
            psrinfo_p: Some("2\n"),
            // Plain psrinfo would give the wrong answer; it must not be used.
            psrinfo_plain: Some("0\ton-line\n"),
            ncpufound: None,
        };
        let rooted = RootedFs {
            root: PathBuf::from("/nonexistent"),
        };
        assert_eq!(
            processor::resolve(PlatformKind::Solaris, &probe(&rooted, &host)),
            Some(2),
            "release {release:?}"
        );
    }
}

#[test]
fn solaris_before_5_8_counts_lines() {
    let host = FakeHost {
        uname_r: Some("5.7\n"),
        psrinfo_p: None,
        psrinfo_plain: Some("0\ton-line\n1\ton-line\n"),
        ncpufound: None,
    };
    let rooted = RootedFs {
        root: PathBuf::from("/nonexistent"),
    };
    assert_eq!(
        processor::resolve(PlatformKind::Solaris, &probe(&rooted, &host)),
        Some(2)
    );
}

#[test]
fn solaris_with_a_malformed_release_is_unknown() {
    for release in ["5\n", "junk\n", "\n"] {
        let host = FakeHost {
            uname_r: Some(release),
            psrinfo_p: Some("2\n"),
            psrinfo_plain: Some("0\ton-line\n"),
            ncpufound: None,
        };
        let rooted = RootedFs {
            root: PathBuf::from("/nonexistent"),
        };
        assert_eq!(
            processor::resolve(PlatformKind::Solaris, &probe(&rooted, &host)),
            None,
            "release {release:?}"
        );
    }
}

// ── OpenBSD ───────────────────────────────────────────────────────────────────

#[test]
fn openbsd_reports_the_sysctl_value() {
    let host = FakeHost {
        ncpufound: Some("4"),
        ..FakeHost::none()
    };
    let rooted = RootedFs {
        root: PathBuf::from("/nonexistent"),
    };
    assert_eq!(
        processor::resolve(PlatformKind::OpenBsd, &probe(&rooted, &host)),
        Some(4)
    );
}

#[test]
fn openbsd_without_the_sysctl_is_unknown() {
    let host = FakeHost::none();
    let rooted = RootedFs {
        root: PathBuf::from("/nonexistent"),
    };
    assert_eq!(
        processor::resolve(PlatformKind::OpenBsd, &probe(&rooted, &host)),
        None
    );
}

// ── Cross-platform guarantees ─────────────────────────────────────────────────

#[test]
fn unknown_platform_is_unknown_without_error() {
    let host = FakeHost::none();
    let rooted = RootedFs {
        root: PathBuf::from("/nonexistent"),
    };
    assert_eq!(
        processor::resolve(PlatformKind::Other, &probe(&rooted, &host)),
        None
    );
}

#[test]
fn resolution_is_idempotent_under_unchanged_state() {
    let dir = TempDir::new().unwrap();
    write_sysfs(dir.path(), &["0\n", "1\n"]);
    let rooted = RootedFs {
        root: dir.path().to_path_buf(),
    };
    let host = FakeHost {
        uname_r: Some("5.11\n"),
        psrinfo_p: Some("2\n"),
        psrinfo_plain: None,
        ncpufound: Some("2"),
    };
    for platform in [
        PlatformKind::Linux,
        PlatformKind::Solaris,
        PlatformKind::OpenBsd,
        PlatformKind::Other,
    ] {
        let first = processor::resolve(platform, &probe(&rooted, &host));
        let second = processor::resolve(platform, &probe(&rooted, &host));
        assert_eq!(first, second, "platform {platform}");
    }
}
