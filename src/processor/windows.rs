//! Windows physical processor counting via the logical processor
//! information API.
//!
//! `GetLogicalProcessorInformation` returns one record per topology
//! relation; the records whose relationship is `RelationProcessorPackage`
//! correspond one-to-one with physical sockets, the same rows a
//! `Win32_Processor` WMI query would return.

/// Number of physical processor packages reported by the OS.
///
/// `None` on API failure or when no package relations are reported.
#[cfg(windows)]
pub fn physical_processor_count() -> Option<u64> {
    use std::{mem, ptr};
    use winapi::um::sysinfoapi::GetLogicalProcessorInformation;
    use winapi::um::winnt::{
        RelationProcessorPackage, SYSTEM_LOGICAL_PROCESSOR_INFORMATION,
    };

    // First call sizes the buffer (fails with ERROR_INSUFFICIENT_BUFFER).
    let mut needed: u32 = 0;
    unsafe { GetLogicalProcessorInformation(ptr::null_mut(), &mut needed) };
    if needed == 0 {
        return None;
    }

    let record_size = mem::size_of::<SYSTEM_LOGICAL_PROCESSOR_INFORMATION>();
    let records = needed as usize / record_size;
    let mut buffer: Vec<SYSTEM_LOGICAL_PROCESSOR_INFORMATION> =
        vec![unsafe { mem::zeroed() }; records];
    let ok = unsafe { GetLogicalProcessorInformation(buffer.as_mut_ptr(), &mut needed) };
    if ok == 0 {
        return None;
    }

    let packages = buffer
        .iter()
        .take(needed as usize / record_size)
        .filter(|info| info.Relationship == RelationProcessorPackage)
        .count() as u64;
    crate::displaylevel!(
        4,
        "physicalprocessorcount: {packages} package relation(s) reported"
    );
    if packages == 0 {
        None
    } else {
        Some(packages)
    }
}

/// The Windows API cannot be probed from another OS.
#[cfg(not(windows))]
pub fn physical_processor_count() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(windows)]
    #[test]
    fn reports_at_least_one_package() {
        let n = physical_processor_count().unwrap();
        assert!(n >= 1);
    }

    #[cfg(not(windows))]
    #[test]
    fn unavailable_off_windows() {
        assert_eq!(physical_processor_count(), None);
    }
}
