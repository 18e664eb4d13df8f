pub mod disk;

pub use disk::{DiskProbe, DiskUsageSnapshot};
