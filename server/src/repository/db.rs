//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. All statements run on the
//! blocking pool under a bounded timeout.

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::{search_key, DomainError, DomainResult};

/// Database state wrapper
///
/// Starts empty; requests made before [`init_db`] finishes (or after
/// [`DbState::close`]) fail with `StoreUnavailable`.
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Option<Connection>>>,
    timeout: Duration,
}

impl DbState {
    pub fn new(timeout: Duration) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            timeout,
        }
    }

    /// Install an opened connection, replacing any previous one
    pub fn attach(&self, conn: Connection) -> DomainResult<()> {
        let mut guard = self.conn.lock().map_err(|_| poisoned())?;
        *guard = Some(conn);
        Ok(())
    }

    /// Move the connection out of a freshly initialized state into this one
    pub fn adopt(&self, initialized: DbState) -> DomainResult<()> {
        let conn = initialized.conn.lock().map_err(|_| poisoned())?.take();
        let mut guard = self.conn.lock().map_err(|_| poisoned())?;
        *guard = conn;
        Ok(())
    }

    /// Drop the connection; later operations report the store as unavailable
    pub fn close(&self) -> DomainResult<()> {
        let mut guard = self.conn.lock().map_err(|_| poisoned())?;
        guard.take();
        Ok(())
    }

    /// Run `op` against the connection on the blocking pool.
    ///
    /// Fails with `Timeout` if `op` does not finish within the configured
    /// timeout. The operation keeps running in the background in that case,
    /// but its result is discarded.
    pub async fn run<T, F>(&self, op: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> DomainResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let task = tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| poisoned())?;
            let conn = guard
                .as_mut()
                .ok_or_else(|| DomainError::StoreUnavailable("database not initialized".to_string()))?;
            op(conn)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(DomainError::StoreUnavailable(format!("store task failed: {e}"))),
            Err(_) => Err(DomainError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::StoreUnavailable("connection lock poisoned".to_string())
}

/// Open a connection; `:memory:` gives a private in-memory database
pub fn open_connection(db_path: &Path, timeout: Duration) -> DomainResult<Connection> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(db_path)?
    };
    conn.busy_timeout(timeout)?;
    Ok(conn)
}

/// Initialize database with path
pub async fn init_db(db_path: &Path, timeout: Duration) -> DomainResult<DbState> {
    let path = db_path.to_path_buf();
    let conn = tokio::task::spawn_blocking(move || -> DomainResult<Connection> {
        let conn = open_connection(&path, timeout)?;
        run_migrations(&conn)?;
        Ok(conn)
    })
    .await
    .map_err(|e| DomainError::StoreUnavailable(format!("init task failed: {e}")))??;

    info!("Database ready at {}", db_path.display());

    let state = DbState::new(timeout);
    state.attach(conn)?;
    Ok(state)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            search_name TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            image_path TEXT NOT NULL DEFAULT '',
            sequence INTEGER NOT NULL UNIQUE
        );
        CREATE INDEX IF NOT EXISTS idx_items_category ON items(category);
        CREATE INDEX IF NOT EXISTS idx_items_name ON items(name);

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );",
    )?;
    backfill_search_names(conn)?;

    debug!("Migrations applied");
    Ok(())
}

/// Add and fill `items.search_name` on databases created without it
fn backfill_search_names(conn: &Connection) -> DomainResult<()> {
    let has_column = conn
        .prepare("SELECT 1 FROM pragma_table_info('items') WHERE name = 'search_name'")?
        .exists([])?;
    if !has_column {
        conn.execute("ALTER TABLE items ADD COLUMN search_name TEXT NOT NULL DEFAULT ''", [])?;
    }

    let missing: Vec<(i64, String)> = {
        let mut stmt = conn.prepare("SELECT id, name FROM items WHERE search_name = '' AND name != ''")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };
    if missing.is_empty() {
        return Ok(());
    }

    for (id, name) in &missing {
        conn.execute(
            "UPDATE items SET search_name = ?1 WHERE id = ?2",
            params![search_key(name), id],
        )?;
    }
    info!("Backfilled search names for {} items", missing.len());
    Ok(())
}
