//! Backup module for portable export/import of user state.
//!
//! The export is a single JSON document bundling everything the store
//! persists, stamped with a format version and export time:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "exported_at": "2026-08-06T12:00:00Z",
//!   "progress": { ... },
//!   "scheduler": { "<card key>": { ... }, ... },
//!   "preferences": { ... }
//! }
//! ```
//!
//! Import is best-effort: every section is individually defaulted, so a
//! document written by an older version (or missing sections entirely)
//! restores what it has and initializes the rest.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Preferences, ReviewEntry};
use crate::progress::ProgressLedger;
use crate::srs::Scheduler;

/// Export format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Format version for future compatibility
    #[serde(default)]
    pub format_version: u32,
    /// ISO8601 timestamp of export
    #[serde(default)]
    pub exported_at: String,
    #[serde(default)]
    pub progress: ProgressLedger,
    #[serde(default)]
    pub scheduler: HashMap<String, ReviewEntry>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Snapshot the live state into an export bundle.
pub fn export_bundle(
    scheduler: &Scheduler,
    ledger: &ProgressLedger,
    preferences: &Preferences,
    now: DateTime<Utc>,
) -> ExportBundle {
    ExportBundle {
        format_version: FORMAT_VERSION,
        exported_at: now.to_rfc3339(),
        progress: ledger.clone(),
        scheduler: scheduler.entries().clone(),
        preferences: preferences.clone(),
    }
}

/// Result of applying an imported bundle.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Scheduler entries restored from the bundle
    pub entries_restored: usize,
    /// True if the bundle's format version differs from ours
    pub version_mismatch: bool,
}

/// Replace the live state with the bundle's contents.
///
/// The caller persists all three structures afterwards and re-seeds the
/// scheduler from the catalog, so cards the bundle doesn't know about
/// get fresh default entries.
pub fn apply_bundle(
    bundle: ExportBundle,
    scheduler: &mut Scheduler,
    ledger: &mut ProgressLedger,
    preferences: &mut Preferences,
) -> ImportOutcome {
    let version_mismatch = bundle.format_version != FORMAT_VERSION;
    if version_mismatch {
        tracing::warn!(
            "importing bundle with format version {} (current {})",
            bundle.format_version,
            FORMAT_VERSION
        );
    }

    let entries_restored = bundle.scheduler.len();
    scheduler.replace_entries(bundle.scheduler);
    *ledger = bundle.progress;
    *preferences = bundle.preferences;

    ImportOutcome {
        entries_restored,
        version_mismatch,
    }
}
