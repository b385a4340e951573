use std::time::Duration;

use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Snapshot tables
//
// - site rows are created lazily on the first successful crawl and only
//   ever removed by gc; removal cascades to entry rows
// - entry holds leaf directories only, replaced per site in one transaction
// - a version mismatch drops everything: snapshots are rebuilt by the next
//   `update`, so there is nothing worth migrating

pub fn init_schema(conn: &Connection) -> Result<()> {
    // Cascading deletes need this on every connection
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS site (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            CONSTRAINT name_unique UNIQUE (name)
        );

        CREATE TABLE IF NOT EXISTS entry (
            id INTEGER PRIMARY KEY,
            site_id INTEGER NOT NULL,
            path TEXT NOT NULL,
            name TEXT NOT NULL,
            modified_at INTEGER,
            CONSTRAINT path_unique UNIQUE (site_id, path),
            FOREIGN KEY (site_id) REFERENCES site(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_entry_site ON entry(site_id);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS entry;
        DROP TABLE IF EXISTS site;
        "#,
    )?;
    Ok(())
}
