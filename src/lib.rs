//! Best-effort host facts: how many physical processor packages (sockets)
//! a machine has.
//!
//! Logical CPU counts are easy to come by; the number of physical packages
//! behind them is not, and the answer lives somewhere different on every
//! kernel family: the sysfs topology tree or /proc/cpuinfo on Linux, the
//! logical processor information API on Windows, `psrinfo` on Solaris, and
//! the `hw.ncpufound` sysctl on OpenBSD. This crate probes the right source
//! for the detected platform and reports `None` when no source gives a
//! definitive answer — resolution is best-effort and never fails loudly.
//!
//! ```no_run
//! match hostfacts::physical_processor_count() {
//!     Some(n) => println!("{n} physical processor package(s)"),
//!     None => println!("physical processor count unknown"),
//! }
//! ```
//!
//! Resolution can also be driven explicitly, which is how the test suite
//! exercises every platform strategy from one host:
//!
//! ```no_run
//! use hostfacts::{processor, PlatformKind, Probe};
//!
//! let count = processor::resolve(PlatformKind::detect(), &Probe::system());
//! ```

pub mod display;
pub mod kernel;
pub mod platform;
pub mod probe;
pub mod processor;

pub use platform::PlatformKind;
pub use probe::{
    CommandRunner, FileSystem, OsCommandRunner, OsFileSystem, OsSysctl, Probe, Sysctl,
};

/// Number of physical processor packages on the current machine, or `None`
/// when it cannot be determined.
pub fn physical_processor_count() -> Option<u64> {
    processor::resolve(PlatformKind::detect(), &Probe::system())
}
