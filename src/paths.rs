//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `PORT`: Override the server port (see config.rs)

use std::sync::OnceLock;

use crate::config;

/// Lazily resolved data directory
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (config.toml > DATA_DIR env > "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(config::load_data_dir)
}

/// SQLite store path
pub fn db_path() -> String {
    format!("{}/reviewer.db", data_dir())
}

/// Content directory (installable catalog files)
pub fn content_dir() -> String {
    format!("{}/content", data_dir())
}

/// Catalog file path; overrides the built-in corpus when present
pub fn catalog_path() -> String {
    format!("{}/content/topics.json", data_dir())
}
