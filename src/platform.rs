//! Platform identification.
//!
//! Fact resolution strategies are selected by a single [`PlatformKind`] value
//! instead of per-platform compile-time registration, so every strategy is
//! present in every build and can be exercised by tests regardless of the
//! host OS. Only the OS-backed probe implementations are `cfg`-gated.

use std::fmt;
use std::str::FromStr;

/// The kernel families this crate knows how to probe.
///
/// `Other` covers everything else; resolving a fact on `Other` yields no
/// value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Linux,
    Windows,
    Solaris,
    OpenBsd,
    Other,
}

impl PlatformKind {
    /// Detect the platform the current process is running on.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS name in `std::env::consts::OS` form to a [`PlatformKind`].
    ///
    /// `illumos` maps to [`PlatformKind::Solaris`]: same kernel lineage,
    /// same `psrinfo` interface.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => PlatformKind::Linux,
            "windows" => PlatformKind::Windows,
            "solaris" | "illumos" => PlatformKind::Solaris,
            "openbsd" => PlatformKind::OpenBsd,
            _ => PlatformKind::Other,
        }
    }

    /// Canonical lowercase name, also the value of the `kernel` fact.
    pub fn name(self) -> &'static str {
        match self {
            PlatformKind::Linux => "linux",
            PlatformKind::Windows => "windows",
            PlatformKind::Solaris => "solaris",
            PlatformKind::OpenBsd => "openbsd",
            PlatformKind::Other => "other",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    /// Accepts canonical names plus the OS aliases `from_os_name` knows.
    /// Unrecognized strings are an error so CLI typos do not silently
    /// resolve to nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" | "windows" | "solaris" | "illumos" | "openbsd" => {
                Ok(Self::from_os_name(s))
            }
            "other" => Ok(PlatformKind::Other),
            _ => Err(format!("unknown platform: {s}")),
        }
    }
}
