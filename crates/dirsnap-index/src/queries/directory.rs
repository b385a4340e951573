use dirsnap_types::LeafDir;
use rusqlite::{Connection, Row, params};

use crate::{Result, records::DirectoryRecord};

fn from_row(row: &Row<'_>) -> rusqlite::Result<DirectoryRecord> {
    Ok(DirectoryRecord {
        site_id: row.get(0)?,
        site: row.get(1)?,
        path: row.get(2)?,
        name: row.get(3)?,
        modified_at: row.get(4)?,
    })
}

pub fn delete_for_site(conn: &Connection, site_id: i64) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM entry WHERE site_id = ?1", [site_id])?;
    Ok(deleted)
}

pub fn insert_all(conn: &Connection, site_id: i64, leaves: &[LeafDir]) -> Result<usize> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO entry (site_id, path, name, modified_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )?;

    for leaf in leaves {
        stmt.execute(params![site_id, &leaf.path, &leaf.name, leaf.modified_at])?;
    }

    Ok(leaves.len())
}

pub fn list_for_site(conn: &Connection, site_name: &str) -> Result<Vec<DirectoryRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT e.site_id, s.name, e.path, e.name, e.modified_at
        FROM entry e
        JOIN site s ON s.id = e.site_id
        WHERE s.name = ?1
        ORDER BY e.path
        "#,
    )?;

    let dirs = stmt
        .query_map([site_name], from_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(dirs)
}

pub fn count_for_site(conn: &Connection, site_name: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        r#"
        SELECT COUNT(*)
        FROM entry e
        JOIN site s ON s.id = e.site_id
        WHERE s.name = ?1
        "#,
        [site_name],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}

/// Case-insensitive substring match on the path, optionally within one site.
pub fn search(
    conn: &Connection,
    pattern: &str,
    site_name: Option<&str>,
) -> Result<Vec<DirectoryRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT e.site_id, s.name, e.path, e.name, e.modified_at
        FROM entry e
        JOIN site s ON s.id = e.site_id
        WHERE instr(lower(e.path), lower(?1)) > 0
          AND (?2 IS NULL OR s.name = ?2)
        ORDER BY s.name, e.path
        "#,
    )?;

    let dirs = stmt
        .query_map(params![pattern, site_name], from_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(dirs)
}
