//! Key-value persistence over SQLite.
//!
//! All user state lives under three logical keys holding JSON values:
//! scheduler entries, the progress ledger and user preferences. Reads
//! that fail (missing database, corrupt JSON) degrade to the
//! structure's default so a broken store never takes the app down;
//! write failures are returned to the caller, which keeps serving from
//! memory and warns the user.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub type Db = Arc<Mutex<Connection>>;

/// Logical key for the progress ledger.
pub const KEY_PROGRESS: &str = "progress";
/// Logical key for user preferences.
pub const KEY_PREFERENCES: &str = "preferences";
/// Logical key for the scheduler's entry map.
pub const KEY_SCHEDULER: &str = "scheduler";

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when the store lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Storage unavailable")
    }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the store lock, returning an error if poisoned
pub fn try_lock(db: &Db) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
    db.lock().map_err(|_: PoisonError<_>| {
        tracing::error!("storage mutex poisoned - a thread panicked while holding the lock");
        DbLockError
    })
}

pub fn init_db(path: &Path) -> Result<Db> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory store for tests.
pub fn init_db_in_memory() -> Result<Db> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO kv (key, value) VALUES (?1, ?2)
        ON CONFLICT (key) DO UPDATE SET value = excluded.value
        "#,
        params![key, value],
    )?;
    Ok(())
}

/// Load and decode the JSON value under `key`.
///
/// Any failure (store error, corrupt JSON) logs a warning and yields
/// the default, treating the structure as freshly initialized.
pub fn load_json<T>(conn: &Connection, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match get_value(conn, key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("failed to read '{}' from store: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("corrupt '{}' state, starting fresh: {}", key, e);
            T::default()
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    set_value(conn, key, &raw)
}
