//! Kernel release fact.
//!
//! The Solaris processor strategy gates on the kernel release version, and
//! the CLI exposes the value as `kernelrelease`.

use crate::probe::CommandRunner;

/// The kernel release string, as reported by `uname -r` ("5.11",
/// "6.8.0-39-generic", ...). Trimmed; empty output resolves to `None`.
pub fn release(runner: &dyn CommandRunner) -> Option<String> {
    let out = runner.run("uname", &["-r"]).ok()?;
    let release = out.trim();
    if release.is_empty() {
        None
    } else {
        Some(release.to_string())
    }
}
