//! Linux physical package counting via sysfs, with a /proc/cpuinfo fallback.
//!
//! sysfs exposes one `topology/physical_package_id` file per logical CPU
//! under `/sys/devices/system/cpu/cpuN/`; the number of distinct file
//! contents is the number of physical packages. Kernels without that tree
//! still list one `physical id` line per logical CPU in `/proc/cpuinfo`.

use std::collections::HashSet;
use std::path::Path;

use crate::displaylevel;
use crate::probe::FileSystem;

/// Per-CPU topology root. Present on any sysfs-era kernel.
pub const SYSFS_CPU_DIR: &str = "/sys/devices/system/cpu";

/// Fallback CPU info pseudo-file.
pub const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// Number of physical processor packages, probing the standard paths.
pub fn physical_processor_count(fs: &dyn FileSystem) -> Option<u64> {
    count_at(fs, Path::new(SYSFS_CPU_DIR), Path::new(PROC_CPUINFO))
}

/// As [`physical_processor_count`], with the probe paths made explicit so
/// tests can point at a synthetic tree.
pub fn count_at(fs: &dyn FileSystem, sysfs_cpu_dir: &Path, cpuinfo: &Path) -> Option<u64> {
    if fs.exists(sysfs_cpu_dir) {
        count_from_sysfs(fs, sysfs_cpu_dir)
    } else {
        count_from_cpuinfo(fs, cpuinfo)
    }
}

/// `cpu0`, `cpu1`, ... — but not `cpufreq`, `cpuidle`, or `cpu` alone.
fn is_cpu_entry(name: &str) -> bool {
    name.strip_prefix("cpu")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Count distinct `physical_package_id` contents across the per-CPU
/// subdirectories of `cpu_dir`.
///
/// Contents are deduplicated as raw strings; no numeric parsing happens, so
/// whatever id form the kernel reports is compared byte-for-byte. CPUs
/// without a topology directory are skipped (offline or pre-topology
/// kernels), but an id file that exists and cannot be read aborts the
/// resolution. A present tree with zero id files counts as 0.
fn count_from_sysfs(fs: &dyn FileSystem, cpu_dir: &Path) -> Option<u64> {
    let mut package_ids: HashSet<String> = HashSet::new();
    for entry in fs.list_dir(cpu_dir).ok()? {
        let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_cpu_entry(name) {
            continue;
        }
        let id_file = entry.join("topology").join("physical_package_id");
        if !fs.exists(&id_file) {
            continue;
        }
        package_ids.insert(fs.read_to_string(&id_file).ok()?);
    }
    displaylevel!(
        4,
        "physicalprocessorcount: {} distinct package id(s) via sysfs",
        package_ids.len()
    );
    Some(package_ids.len() as u64)
}

/// Count distinct `physical id` lines in the CPU info pseudo-file.
///
/// Whole lines are deduplicated, one per logical CPU per package. Zero
/// matching lines means the kernel did not report the topology at all
/// (common on single-socket or virtualized hosts), which is resolution
/// failure rather than an answer of 0.
fn count_from_cpuinfo(fs: &dyn FileSystem, cpuinfo: &Path) -> Option<u64> {
    let contents = fs.read_to_string(cpuinfo).ok()?;
    let distinct: HashSet<&str> = contents
        .lines()
        .filter(|line| line.starts_with("physical id"))
        .collect();
    displaylevel!(
        4,
        "physicalprocessorcount: {} distinct physical id line(s) via cpuinfo",
        distinct.len()
    );
    if distinct.is_empty() {
        None
    } else {
        Some(distinct.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::OsFileSystem;
    use std::fs;
    use tempfile::TempDir;

    /// Build `<root>/sys/cpuN/topology/physical_package_id` files with the
    /// given contents, plus a cpuinfo file, and return the TempDir.
    fn sysfs_tree(package_ids: &[&str]) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let cpu_dir = dir.path().join("cpu");
        fs::create_dir(&cpu_dir).unwrap();
        for (i, id) in package_ids.iter().enumerate() {
            let topology = cpu_dir.join(format!("cpu{i}")).join("topology");
            fs::create_dir_all(&topology).unwrap();
            fs::write(topology.join("physical_package_id"), id).unwrap();
        }
        (dir, cpu_dir)
    }

    #[test]
    fn sysfs_counts_distinct_package_ids() {
        let (_dir, cpu_dir) = sysfs_tree(&["0\n", "0\n", "1\n", "1\n"]);
        let n = count_at(&OsFileSystem, &cpu_dir, Path::new("/nonexistent"));
        assert_eq!(n, Some(2));
    }

    #[test]
    fn sysfs_single_package() {
        let (_dir, cpu_dir) = sysfs_tree(&["0\n", "0\n"]);
        let n = count_at(&OsFileSystem, &cpu_dir, Path::new("/nonexistent"));
        assert_eq!(n, Some(1));
    }

    #[test]
    fn sysfs_ignores_non_cpu_entries() {
        let (_dir, cpu_dir) = sysfs_tree(&["0\n"]);
        // Directories like cpufreq/ and files like "online" sit alongside
        // the cpuN entries in the real tree.
        fs::create_dir(cpu_dir.join("cpufreq")).unwrap();
        fs::write(cpu_dir.join("online"), "0\n").unwrap();
        let n = count_at(&OsFileSystem, &cpu_dir, Path::new("/nonexistent"));
        assert_eq!(n, Some(1));
    }

    #[test]
    fn sysfs_skips_cpus_without_topology() {
        let (_dir, cpu_dir) = sysfs_tree(&["0\n", "1\n"]);
        fs::create_dir(cpu_dir.join("cpu2")).unwrap();
        let n = count_at(&OsFileSystem, &cpu_dir, Path::new("/nonexistent"));
        assert_eq!(n, Some(2));
    }

    #[test]
    fn sysfs_present_but_empty_counts_zero() {
        let (_dir, cpu_dir) = sysfs_tree(&[]);
        let n = count_at(&OsFileSystem, &cpu_dir, Path::new("/nonexistent"));
        assert_eq!(n, Some(0));
    }

    #[test]
    fn cpuinfo_fallback_counts_unique_lines() {
        let dir = TempDir::new().unwrap();
        let cpuinfo = dir.path().join("cpuinfo");
        fs::write(
            &cpuinfo,
            "processor\t: 0\nphysical id\t: 0\nprocessor\t: 1\nphysical id\t: 0\n\
             processor\t: 2\nphysical id\t: 1\nprocessor\t: 3\nphysical id\t: 1\n",
        )
        .unwrap();
        let n = count_at(&OsFileSystem, &dir.path().join("no-sysfs"), &cpuinfo);
        assert_eq!(n, Some(2));
    }

    #[test]
    fn cpuinfo_without_physical_id_lines_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let cpuinfo = dir.path().join("cpuinfo");
        fs::write(&cpuinfo, "processor\t: 0\nmodel name\t: Synth CPU\n").unwrap();
        let n = count_at(&OsFileSystem, &dir.path().join("no-sysfs"), &cpuinfo);
        assert_eq!(n, None);
    }

    #[test]
    fn cpuinfo_missing_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let n = count_at(
            &OsFileSystem,
            &dir.path().join("no-sysfs"),
            &dir.path().join("no-cpuinfo"),
        );
        assert_eq!(n, None);
    }

    #[test]
    fn cpu_entry_name_filter() {
        assert!(is_cpu_entry("cpu0"));
        assert!(is_cpu_entry("cpu128"));
        assert!(!is_cpu_entry("cpu"));
        assert!(!is_cpu_entry("cpufreq"));
        assert!(!is_cpu_entry("cpuidle"));
        assert!(!is_cpu_entry("online"));
    }
}
