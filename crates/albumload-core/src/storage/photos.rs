//! Photo and photo-image queries.
//!
//! Rows are only ever inserted or bulk-deleted; there is no update path.

use rusqlite::{named_params, Connection, OptionalExtension, TransactionBehavior};

use crate::error::StorageResult;
use crate::types::{ImageItem, PhotoRecord};

/// Parse a photo from a database row.
///
/// Expects columns in order: album, name, view_count, caption, published.
fn parse_photo_row(row: &rusqlite::Row) -> rusqlite::Result<PhotoRecord> {
    Ok(PhotoRecord {
        album: row.get(0)?,
        name: row.get(1)?,
        view_count: row.get(2)?,
        caption: row.get(3)?,
        published: row.get(4)?,
    })
}

/// Create both tables if they do not exist yet.
pub fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(include_str!("schema.sql"))?;
    Ok(())
}

/// Insert the metadata row and the content row for one item.
///
/// Both inserts share one transaction, so a failure leaves neither row behind.
pub fn insert_item(conn: &mut Connection, item: &ImageItem) -> StorageResult<()> {
    let record = PhotoRecord::new(item.album.as_str(), item.name.as_str());
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(
        "INSERT INTO t_photo (album, name, view_count, caption, published)
         VALUES (:album, :name, :view_count, :caption, :published)",
        named_params! {
            ":album": &record.album,
            ":name": &record.name,
            ":view_count": record.view_count,
            ":caption": &record.caption,
            ":published": record.published,
        },
    )?;

    tx.execute(
        "INSERT INTO t_photo_image (album, name, content) VALUES (:album, :name, :content)",
        named_params! {
            ":album": &item.album,
            ":name": &item.name,
            ":content": &item.content,
        },
    )?;

    tx.commit()?;
    Ok(())
}

/// Delete every row from both tables, returning `(photos, images)` removed.
pub fn delete_all(conn: &mut Connection) -> StorageResult<(usize, usize)> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let photos = tx.execute("DELETE FROM t_photo", [])?;
    let images = tx.execute("DELETE FROM t_photo_image", [])?;
    tx.commit()?;
    Ok((photos, images))
}

/// Count photo metadata rows.
pub fn count_photos(conn: &Connection) -> StorageResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM t_photo", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Count photo content rows.
pub fn count_images(conn: &Connection) -> StorageResult<u64> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM t_photo_image", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// List photo rows, optionally restricted to one album, ordered by album then name.
pub fn list_photos(conn: &Connection, album: Option<&str>) -> StorageResult<Vec<PhotoRecord>> {
    let mut stmt = conn.prepare(
        "SELECT album, name, view_count, caption, published
         FROM t_photo
         WHERE :album IS NULL OR album = :album
         ORDER BY album, name",
    )?;

    let photos = stmt
        .query_map(named_params! { ":album": album }, parse_photo_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(photos)
}

/// Fetch the stored bytes for `(album, name)`; the first row wins if duplicated.
pub fn get_content(conn: &Connection, album: &str, name: &str) -> StorageResult<Option<Vec<u8>>> {
    let content = conn
        .query_row(
            "SELECT content FROM t_photo_image
             WHERE album = :album AND name = :name
             ORDER BY rowid LIMIT 1",
            named_params! { ":album": album, ":name": name },
            |row| row.get(0),
        )
        .optional()?;
    Ok(content)
}
