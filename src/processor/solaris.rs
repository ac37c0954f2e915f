//! Solaris physical processor counting via psrinfo.
//!
//! `psrinfo -p` prints the physical processor count directly, but the `-p`
//! flag only exists from Solaris 8 (kernel release 5.8) onward. Older
//! releases fall back to plain `psrinfo`, whose output is one line per
//! processor.

use crate::displaylevel;
use crate::probe::CommandRunner;

/// Path of the processor info command on Solaris and illumos.
pub const PSRINFO: &str = "/usr/sbin/psrinfo";

/// Number of physical processors, given the kernel release string
/// ("5.11", "5.7", ...).
///
/// A release string with fewer than two dot-separated components, or with
/// non-numeric components, resolves to `None`.
pub fn physical_processor_count(
    runner: &dyn CommandRunner,
    kernel_release: &str,
) -> Option<u64> {
    let (major, minor) = parse_release(kernel_release)?;
    if major > 5 || (major == 5 && minor >= 8) {
        let out = runner.run(PSRINFO, &["-p"]).ok()?;
        displaylevel!(4, "physicalprocessorcount: psrinfo -p => {}", out.trim());
        out.trim().parse().ok()
    } else {
        let out = runner.run(PSRINFO, &[]).ok()?;
        let lines = out.lines().count() as u64;
        displaylevel!(4, "physicalprocessorcount: psrinfo listed {lines} line(s)");
        if lines == 0 {
            None
        } else {
            Some(lines)
        }
    }
}

/// First two dot-separated components of the release as (major, minor).
fn parse_release(kernel_release: &str) -> Option<(u32, u32)> {
    let mut components = kernel_release.split('.');
    let major = components.next()?.trim().parse().ok()?;
    let minor = components.next()?.trim().parse().ok()?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    /// Fake psrinfo that records the arguments it was invoked with.
    struct FakePsrinfo {
        stdout: String,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakePsrinfo {
        fn new(stdout: &str) -> Self {
            FakePsrinfo {
                stdout: stdout.to_string(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for FakePsrinfo {
        fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
            assert_eq!(program, PSRINFO);
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            Ok(self.stdout.clone())
        }
    }

    #[test]
    fn release_5_8_uses_the_flagged_path() {
        let psrinfo = FakePsrinfo::new("2\n");
        assert_eq!(physical_processor_count(&psrinfo, "5.8"), Some(2));
        assert_eq!(psrinfo.calls(), vec![vec!["-p".to_string()]]);
    }

    #[test]
    fn release_6_0_uses_the_flagged_path() {
        let psrinfo = FakePsrinfo::new("4\n");
        assert_eq!(physical_processor_count(&psrinfo, "6.0"), Some(4));
        assert_eq!(psrinfo.calls(), vec![vec!["-p".to_string()]]);
    }

    #[test]
    fn release_5_7_counts_output_lines() {
        let psrinfo = FakePsrinfo::new(
            "0\ton-line  since 01/01/2024 00:00:00\n\
             1\ton-line  since 01/01/2024 00:00:00\n\
             2\ton-line  since 01/01/2024 00:00:00\n",
        );
        assert_eq!(physical_processor_count(&psrinfo, "5.7"), Some(3));
        assert_eq!(psrinfo.calls(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn flagged_output_that_is_not_a_number_is_unresolved() {
        let psrinfo = FakePsrinfo::new("psrinfo: not supported\n");
        assert_eq!(physical_processor_count(&psrinfo, "5.11"), None);
    }

    #[test]
    fn empty_line_count_output_is_unresolved() {
        let psrinfo = FakePsrinfo::new("");
        assert_eq!(physical_processor_count(&psrinfo, "5.7"), None);
    }

    #[test]
    fn command_failure_is_unresolved() {
        struct FailingRunner;
        impl CommandRunner for FailingRunner {
            fn run(&self, _program: &str, _args: &[&str]) -> io::Result<String> {
                Err(io::Error::other("exec failed"))
            }
        }
        assert_eq!(physical_processor_count(&FailingRunner, "5.11"), None);
    }

    #[test]
    fn malformed_release_is_unresolved_without_running_psrinfo() {
        for release in ["5", "abc", "", "a.b", "5.x"] {
            let psrinfo = FakePsrinfo::new("2\n");
            assert_eq!(physical_processor_count(&psrinfo, release), None);
            assert!(psrinfo.calls().is_empty(), "release {release:?} ran psrinfo");
        }
    }

    #[test]
    fn release_parsing() {
        assert_eq!(parse_release("5.11"), Some((5, 11)));
        assert_eq!(parse_release("5.8.1"), Some((5, 8)));
        assert_eq!(parse_release("11.4"), Some((11, 4)));
        assert_eq!(parse_release("5"), None);
        assert_eq!(parse_release(""), None);
    }
}
