//! Application state shared across handlers.
//!
//! Each independently persisted structure is its own lock: the
//! scheduler, the progress ledger and the preferences never contend
//! with each other, and the catalog is immutable after startup.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::content::Catalog;
use crate::domain::Preferences;
use crate::progress::ProgressLedger;
use crate::srs::Scheduler;
use crate::storage::{self, Db, LogOnError};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub db: Db,
    pub scheduler: Arc<Mutex<Scheduler>>,
    pub ledger: Arc<Mutex<ProgressLedger>>,
    pub preferences: Arc<Mutex<Preferences>>,
}

impl AppState {
    /// Load persisted state from the store and merge-seed the scheduler
    /// so every catalog card has an entry. Runs once at startup.
    pub fn initialize(catalog: Catalog, db: Db) -> Self {
        let (scheduler, ledger, preferences) = {
            let conn = db.lock().expect("store lock failed during startup");

            let entries = storage::load_json(&conn, storage::KEY_SCHEDULER);
            let mut scheduler = Scheduler::from_entries(entries);
            let added = scheduler.seed_from_catalog(&catalog, Utc::now());
            if added > 0 {
                tracing::info!("seeded {} new scheduler entries", added);
                storage::save_json(&conn, storage::KEY_SCHEDULER, scheduler.entries())
                    .log_warn("failed to persist seeded scheduler entries");
            }

            let ledger: ProgressLedger = storage::load_json(&conn, storage::KEY_PROGRESS);
            let preferences: Preferences = storage::load_json(&conn, storage::KEY_PREFERENCES);

            (scheduler, ledger, preferences)
        };

        Self {
            catalog: Arc::new(catalog),
            db,
            scheduler: Arc::new(Mutex::new(scheduler)),
            ledger: Arc::new(Mutex::new(ledger)),
            preferences: Arc::new(Mutex::new(preferences)),
        }
    }
}
