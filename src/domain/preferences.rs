//! User preferences persisted alongside progress.
//!
//! The core treats these as opaque settings owned by the UI layer:
//! themes and Pomodoro timers are applied client-side, the server only
//! stores and exports them.

use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display name, empty until the user sets one.
    pub name: String,
    /// UI theme identifier ("light" or "dark").
    pub theme: String,
    pub high_contrast: bool,
    pub pomodoro_work_minutes: u32,
    pub pomodoro_break_minutes: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            name: String::new(),
            theme: "light".to_string(),
            high_contrast: false,
            pomodoro_work_minutes: config::DEFAULT_POMODORO_WORK_MINUTES,
            pomodoro_break_minutes: config::DEFAULT_POMODORO_BREAK_MINUTES,
        }
    }
}
