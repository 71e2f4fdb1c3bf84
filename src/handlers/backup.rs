//! Export/import handlers for the single-document backup format.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::services::{apply_bundle, export_bundle, ExportBundle};
use crate::state::AppState;
use crate::storage::{self, try_lock};

use super::{save_or_warn, storage_unavailable};

/// GET /api/export
pub async fn export_state(State(state): State<AppState>) -> Response {
    let (Ok(scheduler), Ok(ledger), Ok(preferences)) = (
        state.scheduler.lock(),
        state.ledger.lock(),
        state.preferences.lock(),
    ) else {
        return storage_unavailable();
    };

    Json(export_bundle(&scheduler, &ledger, &preferences, Utc::now())).into_response()
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub entries_restored: usize,
    /// Entries created for catalog cards the bundle didn't cover
    pub entries_seeded: usize,
    pub version_mismatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /api/import
///
/// Replaces all persisted state with the bundle, then re-seeds the
/// scheduler so the catalog stays fully covered.
pub async fn import_state(
    State(state): State<AppState>,
    Json(bundle): Json<ExportBundle>,
) -> Response {
    let Ok(conn) = try_lock(&state.db) else {
        return storage_unavailable();
    };
    let (Ok(mut scheduler), Ok(mut ledger), Ok(mut preferences)) = (
        state.scheduler.lock(),
        state.ledger.lock(),
        state.preferences.lock(),
    ) else {
        return storage_unavailable();
    };

    let outcome = apply_bundle(bundle, &mut scheduler, &mut ledger, &mut preferences);
    let entries_seeded = scheduler.seed_from_catalog(&state.catalog, Utc::now());

    let warning = save_or_warn(&conn, storage::KEY_SCHEDULER, scheduler.entries())
        .or(save_or_warn(&conn, storage::KEY_PROGRESS, &*ledger))
        .or(save_or_warn(&conn, storage::KEY_PREFERENCES, &*preferences));

    Json(ImportResponse {
        entries_restored: outcome.entries_restored,
        entries_seeded,
        version_mismatch: outcome.version_mismatch,
        warning,
    })
    .into_response()
}
