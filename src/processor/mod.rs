//! Physical processor package count resolution.
//!
//! One strategy per platform family, selected by a [`PlatformKind`] value:
//!
//! - [`linux`]   — sysfs topology tree, falling back to /proc/cpuinfo
//! - [`windows`] — logical processor information API
//! - [`solaris`] — psrinfo, with a version gate on the `-p` flag
//! - [`openbsd`] — the hw.ncpufound sysctl
//!
//! Resolution is best-effort and single-shot: missing sources, permission
//! errors, and unparseable output all yield `None`, never an error, and no
//! state is retained between calls.

pub mod linux;
pub mod openbsd;
pub mod solaris;
pub mod windows;

use crate::kernel;
use crate::platform::PlatformKind;
use crate::probe::Probe;

/// Resolve the number of physical processor packages on `platform`.
///
/// `None` means the count could not be determined; unsupported platforms
/// always resolve to `None`.
pub fn resolve(platform: PlatformKind, probe: &Probe) -> Option<u64> {
    match platform {
        PlatformKind::Linux => linux::physical_processor_count(probe.fs),
        PlatformKind::Windows => windows::physical_processor_count(),
        PlatformKind::Solaris => {
            let release = kernel::release(probe.runner)?;
            solaris::physical_processor_count(probe.runner, &release)
        }
        PlatformKind::OpenBsd => openbsd::physical_processor_count(probe.sysctl),
        PlatformKind::Other => None,
    }
}
