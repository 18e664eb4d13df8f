//! Disk capacity probing for the storage volume

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use sysinfo::Disks;

use crate::error::{AppError, Result};

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// Point-in-time capacity statistics for one volume. Field names are part
/// of the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsageSnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
    #[serde(rename = "totalGB")]
    pub total_gb: f64,
    #[serde(rename = "freeGB")]
    pub free_gb: f64,
    #[serde(rename = "usedGB")]
    pub used_gb: f64,
    pub used_percentage: f64,
}

impl DiskUsageSnapshot {
    pub fn from_volume(total_bytes: u64, available_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(available_bytes);
        let used_percentage = if total_bytes > 0 {
            (used_bytes as f64 / total_bytes as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total_bytes,
            free_bytes: available_bytes,
            used_bytes,
            total_gb: total_bytes as f64 / BYTES_PER_GB,
            free_gb: available_bytes as f64 / BYTES_PER_GB,
            used_gb: used_bytes as f64 / BYTES_PER_GB,
            used_percentage,
        }
    }
}

/// Queries the volume hosting the storage root. Nothing is cached; each
/// snapshot refreshes the disk list.
#[derive(Debug, Clone)]
pub struct DiskProbe {
    root: PathBuf,
}

impl DiskProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn snapshot(&self) -> Result<DiskUsageSnapshot> {
        let target = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        let disks = Disks::new_with_refreshed_list();

        // The disk with the longest mount point containing the storage
        // root owns it.
        let disk = disks
            .iter()
            .filter(|disk| target.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .ok_or_else(|| {
                AppError::Storage(format!("No volume found for {}", self.root.display()))
            })?;

        Ok(DiskUsageSnapshot::from_volume(
            disk.total_space(),
            disk.available_space(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_accounting() {
        let gib = 1u64 << 30;
        let snapshot = DiskUsageSnapshot::from_volume(100 * gib, 25 * gib);

        assert_eq!(snapshot.used_bytes + snapshot.free_bytes, snapshot.total_bytes);
        assert_eq!(snapshot.used_bytes, 75 * gib);
        assert_eq!(snapshot.used_percentage, 75.0);
        assert_eq!(snapshot.total_gb, 100.0);
        assert_eq!(snapshot.free_gb, 25.0);
        assert_eq!(snapshot.used_gb, 75.0);
    }

    #[test]
    fn test_snapshot_empty_volume() {
        let snapshot = DiskUsageSnapshot::from_volume(0, 0);

        assert_eq!(snapshot.total_bytes, 0);
        assert_eq!(snapshot.used_bytes, 0);
        assert_eq!(snapshot.used_percentage, 0.0);
    }

    #[test]
    fn test_snapshot_wire_field_names() {
        let snapshot = DiskUsageSnapshot::from_volume(1 << 30, 1 << 29);
        let value = serde_json::to_value(&snapshot).unwrap();

        for field in [
            "totalBytes",
            "freeBytes",
            "usedBytes",
            "totalGB",
            "freeGB",
            "usedGB",
            "usedPercentage",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
    }

    #[test]
    fn test_probe_current_directory() {
        let probe = DiskProbe::new(".");

        // Environments without a readable disk list report an error instead.
        if let Ok(snapshot) = probe.snapshot() {
            assert!(snapshot.total_bytes >= snapshot.free_bytes);
            assert!(snapshot.used_percentage >= 0.0 && snapshot.used_percentage <= 100.0);
        }
    }
}
