//! Collaborator seams between fact resolution and the operating system.
//!
//! Resolvers never touch the OS directly; they go through the narrow traits
//! defined here ([`FileSystem`], [`CommandRunner`], [`Sysctl`]) so that every
//! strategy can be driven by fakes in tests. The `Os*` implementations are
//! the only place real I/O happens.
//!
//! All three seams are best-effort: callers are expected to collapse any
//! `Err`/`None` into "fact not resolved" rather than propagate a failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

// ── Filesystem ────────────────────────────────────────────────────────────────

/// Read-only filesystem access used by the Linux strategy.
pub trait FileSystem {
    /// Does `path` exist? Permission errors count as absent.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of `path` as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List the entries of directory `path` (full paths, no ordering
    /// guarantee).
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`FileSystem`] backed by `std::fs`.
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }
}

// ── External commands ─────────────────────────────────────────────────────────

/// Run an external command and capture its stdout.
pub trait CommandRunner {
    /// Run `program` with `args`, returning captured stdout. A spawn
    /// failure, non-zero exit status, or non-UTF-8 output is an `Err`.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
pub struct OsCommandRunner;

impl CommandRunner for OsCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{program} exited with {}",
                output.status
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

// ── Kernel control variables ──────────────────────────────────────────────────

/// Read a named kernel control variable (sysctl).
pub trait Sysctl {
    /// Value of the variable `name`, or `None` if the variable does not
    /// exist or cannot be read on this system.
    fn get(&self, name: &str) -> Option<String>;
}

/// [`Sysctl`] backed by `libc::sysctl` on OpenBSD; every other OS reports
/// all variables as unavailable.
pub struct OsSysctl;

#[cfg(target_os = "openbsd")]
impl Sysctl for OsSysctl {
    fn get(&self, name: &str) -> Option<String> {
        // OpenBSD has no sysctlbyname, so names map to mib pairs here.
        // HW_NCPUFOUND is 21 in sys/sysctl.h; libc does not export it.
        const HW_NCPUFOUND: libc::c_int = 21;
        let mib: [libc::c_int; 2] = match name {
            "hw.ncpufound" => [libc::CTL_HW, HW_NCPUFOUND],
            _ => return None,
        };
        let mut value: libc::c_int = 0;
        let mut size: libc::size_t = std::mem::size_of::<libc::c_int>();
        let rc = unsafe {
            libc::sysctl(
                mib.as_ptr(),
                mib.len() as libc::c_uint,
                &mut value as *mut libc::c_int as *mut libc::c_void,
                &mut size,
                std::ptr::null_mut(),
                0,
            )
        };
        (rc == 0 && value >= 0).then(|| value.to_string())
    }
}

#[cfg(not(target_os = "openbsd"))]
impl Sysctl for OsSysctl {
    fn get(&self, _name: &str) -> Option<String> {
        None
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// The full set of collaborators a resolver may need.
pub struct Probe<'a> {
    pub fs: &'a dyn FileSystem,
    pub runner: &'a dyn CommandRunner,
    pub sysctl: &'a dyn Sysctl,
}

static OS_FILESYSTEM: OsFileSystem = OsFileSystem;
static OS_COMMAND_RUNNER: OsCommandRunner = OsCommandRunner;
static OS_SYSCTL: OsSysctl = OsSysctl;

impl Probe<'static> {
    /// The OS-backed probe used outside tests.
    pub fn system() -> Self {
        Probe {
            fs: &OS_FILESYSTEM,
            runner: &OS_COMMAND_RUNNER,
            sysctl: &OS_SYSCTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── OsFileSystem ──────────────────────────────────────────────────────────

    #[test]
    fn fs_exists_and_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fact");
        fs::write(&path, "42\n").unwrap();

        let osfs = OsFileSystem;
        assert!(osfs.exists(&path));
        assert!(!osfs.exists(&dir.path().join("missing")));
        assert_eq!(osfs.read_to_string(&path).unwrap(), "42\n");
        assert!(osfs.read_to_string(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn fs_list_dir_returns_full_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();

        let mut entries = OsFileSystem.list_dir(dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries, vec![dir.path().join("a"), dir.path().join("b")]);
    }

    #[test]
    fn fs_list_dir_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(OsFileSystem.list_dir(&dir.path().join("missing")).is_err());
    }

    // ── OsCommandRunner ───────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn runner_captures_stdout() {
        let out = OsCommandRunner.run("echo", &["hello"]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn runner_nonzero_exit_is_an_error() {
        assert!(OsCommandRunner.run("false", &[]).is_err());
    }

    #[test]
    fn runner_missing_program_is_an_error() {
        let err = OsCommandRunner.run("hostfacts-no-such-program", &[]);
        assert!(err.is_err());
    }

    // ── OsSysctl ──────────────────────────────────────────────────────────────

    #[cfg(not(target_os = "openbsd"))]
    #[test]
    fn sysctl_unsupported_os_returns_none() {
        assert_eq!(OsSysctl.get("hw.ncpufound"), None);
    }

    #[cfg(target_os = "openbsd")]
    #[test]
    fn sysctl_ncpufound_is_positive() {
        let value = OsSysctl.get("hw.ncpufound").unwrap();
        assert!(value.parse::<u64>().unwrap() >= 1);
    }

    #[cfg(target_os = "openbsd")]
    #[test]
    fn sysctl_unknown_name_returns_none() {
        assert_eq!(OsSysctl.get("hw.nosuchvariable"), None);
    }
}
