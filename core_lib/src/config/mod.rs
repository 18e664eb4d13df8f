pub mod settings;

pub use settings::{AppConfig, AuthConfig, CorsConfig, DiskUsageConfig, ServerConfig, StorageConfig};
