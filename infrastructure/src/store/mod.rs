//! Key-value store adapters.

mod json_file;

pub use json_file::JsonFileStore;
