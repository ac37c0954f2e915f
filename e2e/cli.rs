// e2e/cli.rs — black-box tests of the `hostfacts` binary.
//
// Runs the built binary through std::process::Command and checks output
// shape and exit codes.

use std::path::PathBuf;
use std::process::Command;

/// Locate the `hostfacts` binary produced by Cargo.
fn hostfacts_bin() -> PathBuf {
    // CARGO_BIN_EXE_hostfacts is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_hostfacts") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("hostfacts");
    p
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(hostfacts_bin())
        .args(args)
        .output()
        .expect("failed to run hostfacts")
}

#[test]
fn bare_invocation_lists_facts() {
    let out = run(&[]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    // `kernel` always resolves; the others are host-dependent.
    assert!(stdout.lines().any(|l| l.starts_with("kernel => ")));
    for line in stdout.lines() {
        assert!(line.contains(" => "), "malformed fact line: {line:?}");
    }
}

#[test]
fn kernel_fact_prints_the_bare_value() {
    let out = run(&["kernel"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.trim(), std::env::consts::OS.parse::<hostfacts::PlatformKind>()
        .map(|p| p.name())
        .unwrap_or("other"));
}

#[test]
fn platform_override_changes_the_kernel_fact() {
    let out = run(&["--platform", "openbsd", "kernel"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "openbsd");
}

#[test]
fn unresolved_fact_prints_nothing_and_exits_zero() {
    // No probe can answer for PlatformKind::Other.
    let out = run(&["--platform", "other", "physicalprocessorcount"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn unknown_fact_name_is_an_error() {
    let out = run(&["nosuchfact"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("unknown fact"), "stderr: {stderr:?}");
}

#[test]
fn unknown_platform_name_is_rejected() {
    let out = run(&["--platform", "plan9", "kernel"]);
    assert!(!out.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn processor_count_resolves_on_linux() {
    let out = run(&["physicalprocessorcount"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let _n: u64 = stdout.trim().parse().expect("expected an integer count");
}
