use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    Error, Result,
    records::{SiteRecord, SiteSummary},
};

pub fn get(conn: &Connection, name: &str) -> Result<Option<SiteRecord>> {
    let result = conn
        .query_row(
            r#"
        SELECT id, name
        FROM site
        WHERE name = ?1
        "#,
            [name],
            |row| {
                Ok(SiteRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

pub fn ensure(conn: &Connection, name: &str) -> Result<SiteRecord> {
    conn.execute(
        r#"
        INSERT INTO site (name)
        VALUES (?1)
        ON CONFLICT(name) DO NOTHING
        "#,
        params![name],
    )?;

    get(conn, name)?
        .ok_or_else(|| Error::Query(format!("Site '{}' vanished after insert", name)))
}

pub fn list(conn: &Connection) -> Result<Vec<SiteRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name
        FROM site
        ORDER BY name
        "#,
    )?;

    let sites = stmt
        .query_map([], |row| {
            Ok(SiteRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(sites)
}

pub fn list_summaries(conn: &Connection) -> Result<Vec<SiteSummary>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT s.id, s.name, COUNT(e.id)
        FROM site s
        LEFT JOIN entry e ON e.site_id = s.id
        GROUP BY s.id, s.name
        ORDER BY s.name
        "#,
    )?;

    let sites = stmt
        .query_map([], |row| {
            Ok(SiteSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                directory_count: row.get::<_, i64>(2)? as usize,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(sites)
}

/// Delete a site; its entries go with it through the cascade.
pub fn delete(conn: &Connection, id: i64) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM site WHERE id = ?1", [id])?;
    Ok(deleted)
}
