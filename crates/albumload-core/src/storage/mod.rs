//! Destination storage: a pooled SQLite database with the photo tables.
//!
//! [`Store`] is the handle the loader shares across workers. Each call checks
//! out its own connection from the pool and returns it on every exit path.

pub mod photos;
pub mod pool;

pub use pool::{get_conn, init_pool, DbPool, PooledConnection};

use std::path::Path;

use crate::config::{Config, DatabaseConfig};
use crate::error::StorageResult;
use crate::types::{ImageItem, PhotoRecord};

/// Pooled access to the photo tables.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Open the database named in the configuration.
    pub fn open(config: &Config) -> StorageResult<Self> {
        Self::open_path(&config.database_path(), &config.database)
    }

    /// Open (creating if needed) the database at `path` and ensure the tables exist.
    pub fn open_path(path: &Path, config: &DatabaseConfig) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Cannot create database directory {:?}: {}", parent, e);
            }
        }

        let pool = init_pool(path, config)?;
        photos::ensure_schema(&*get_conn(&pool)?)?;
        Ok(Self { pool })
    }

    /// Maximum number of connections the pool will hand out.
    pub fn max_connections(&self) -> u32 {
        self.pool.max_size()
    }

    /// Write one item's metadata and content rows atomically.
    pub fn insert_photo(&self, item: &ImageItem) -> StorageResult<()> {
        let mut conn = get_conn(&self.pool)?;
        photos::insert_item(&mut conn, item)
    }

    /// Delete every row from both tables.
    pub fn clear_all(&self) -> StorageResult<(usize, usize)> {
        let mut conn = get_conn(&self.pool)?;
        photos::delete_all(&mut conn)
    }

    pub fn count_photos(&self) -> StorageResult<u64> {
        photos::count_photos(&*get_conn(&self.pool)?)
    }

    pub fn count_images(&self) -> StorageResult<u64> {
        photos::count_images(&*get_conn(&self.pool)?)
    }

    /// Photo rows, optionally for a single album.
    pub fn list_photos(&self, album: Option<&str>) -> StorageResult<Vec<PhotoRecord>> {
        photos::list_photos(&*get_conn(&self.pool)?, album)
    }

    /// Stored bytes for `(album, name)`.
    pub fn image_content(&self, album: &str, name: &str) -> StorageResult<Option<Vec<u8>>> {
        photos::get_content(&*get_conn(&self.pool)?, album, name)
    }
}
