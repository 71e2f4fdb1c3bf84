//! Application configuration constants.
//!
//! Layered lookup for the data directory: config.toml beats the
//! environment (.env included), which beats the compiled default.

use serde::Deserialize;

// ==================== Data Directory ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    storage: Option<StorageConfig>,
}

#[derive(Debug, Deserialize)]
struct StorageConfig {
    dir: Option<String>,
}

/// Resolve the data directory: config.toml > DATA_DIR env > "data".
pub fn load_data_dir() -> String {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(dir) = config.storage.and_then(|s| s.dir) {
                tracing::info!("Using data directory from config.toml: {}", dir);
                return dir;
            }
        }
    }

    if let Ok(dir) = std::env::var("DATA_DIR") {
        tracing::info!("Using data directory from DATA_DIR env: {}", dir);
        return dir;
    }

    "data".to_string()
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port (override with the PORT env var)
pub const SERVER_PORT: u16 = 3000;

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT)
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, server_port())
}

// ==================== Quiz Configuration ====================

/// Questions per quiz when the client doesn't ask for a count
pub const DEFAULT_QUIZ_COUNT: usize = 5;

/// Wrong options per question
pub const DISTRACTOR_COUNT: usize = 3;

/// Options per question (correct answer + distractors)
pub const QUIZ_OPTION_COUNT: usize = DISTRACTOR_COUNT + 1;

/// Minimum percentage score counted as a pass
pub const PASSING_SCORE: u32 = 70;

// ==================== Review Configuration ====================

/// Highest accepted review quality rating
pub const MAX_REVIEW_QUALITY: u8 = 5;

/// Cards sampled for a rapid-review session when nothing is due
pub const RAPID_REVIEW_CARD_COUNT: usize = 15;

/// Cards on the printable cheat sheet
pub const CHEATSHEET_CARD_COUNT: usize = 10;

// ==================== Preference Defaults ====================

pub const DEFAULT_POMODORO_WORK_MINUTES: u32 = 25;
pub const DEFAULT_POMODORO_BREAK_MINUTES: u32 = 5;
