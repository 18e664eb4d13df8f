pub mod store;

pub use store::{sanitize_file_name, FileStore};
