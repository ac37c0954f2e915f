//! OpenBSD physical processor counting via the hw.ncpufound sysctl.
//!
//! `hw.ncpufound` reports the number of CPUs found at boot, independent of
//! how many are currently online (`hw.ncpu`).

use crate::displaylevel;
use crate::probe::Sysctl;

/// The control variable holding the found-CPU count.
pub const HW_NCPUFOUND: &str = "hw.ncpufound";

/// Value of `hw.ncpufound`, or `None` if the variable is unavailable or its
/// value does not parse as a non-negative integer.
pub fn physical_processor_count(sysctl: &dyn Sysctl) -> Option<u64> {
    let value = sysctl.get(HW_NCPUFOUND)?;
    displaylevel!(4, "physicalprocessorcount: {HW_NCPUFOUND} => {value}");
    value.trim().parse().ok()
}
