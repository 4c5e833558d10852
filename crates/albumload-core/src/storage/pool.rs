//! Connection pool setup.
//!
//! Every worker checks out its own connection for the length of one write,
//! so the pool is sized to at least the worker count by the caller.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::StorageResult;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Build a pool over the SQLite file at `path`.
///
/// Each new connection waits up to `busy_timeout_ms` on a locked database and
/// uses WAL journaling so readers do not block the writers.
pub fn init_pool(path: &Path, config: &DatabaseConfig) -> StorageResult<DbPool> {
    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
    });

    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(10).max(busy_timeout * 2))
        .build(manager)?;

    tracing::debug!(
        "Opened pool over {:?} ({} connections)",
        path,
        config.pool_size
    );
    Ok(pool)
}

/// Check out a connection; it goes back to the pool when dropped.
pub fn get_conn(pool: &DbPool) -> StorageResult<PooledConnection> {
    Ok(pool.get()?)
}
