use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dirsnap_types::LeafDir;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::{
    Result,
    queries::{directory, site},
    records::{DirectoryRecord, SiteRecord, SiteSummary},
    schema,
};

/// Snapshot store backed by a single SQLite connection.
///
/// The connection sits behind a mutex, so one `Database` can be shared by
/// several crawler threads and every transaction runs alone: two sites'
/// replacements never interleave their delete and insert halves.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        schema::init_schema(&conn)?;
        debug!(path = %db_path.display(), "database opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-transaction rolls the transaction back on unwind,
        // so the connection is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a site by name, creating it when absent.
    pub fn ensure_site(&self, name: &str) -> Result<SiteRecord> {
        site::ensure(&self.conn(), name)
    }

    pub fn get_site(&self, name: &str) -> Result<Option<SiteRecord>> {
        site::get(&self.conn(), name)
    }

    pub fn list_sites(&self) -> Result<Vec<SiteRecord>> {
        site::list(&self.conn())
    }

    pub fn list_site_summaries(&self) -> Result<Vec<SiteSummary>> {
        site::list_summaries(&self.conn())
    }

    /// Replace the whole snapshot of `site_name` with `leaves`.
    ///
    /// Creating the site, deleting its old rows and inserting the new ones
    /// happen in one transaction. If any insert fails (a duplicate path, for
    /// instance) nothing is changed and the previous snapshot stays.
    ///
    /// Returns the number of rows inserted.
    pub fn replace_directories(&self, site_name: &str, leaves: &[LeafDir]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let site = site::ensure(&tx, site_name)?;
        let removed = directory::delete_for_site(&tx, site.id)?;
        let inserted = directory::insert_all(&tx, site.id, leaves)?;

        tx.commit()?;

        debug!(site = site_name, removed, inserted, "snapshot replaced");
        Ok(inserted)
    }

    /// Sites stored in the database but missing from `configured`.
    ///
    /// Unless `dry_run` is set they are deleted, together with their
    /// directories, in one transaction. The returned list is the same either
    /// way.
    pub fn garbage_collect_sites<S: AsRef<str>>(
        &self,
        configured: &[S],
        dry_run: bool,
    ) -> Result<Vec<SiteRecord>> {
        let configured: HashSet<&str> = configured.iter().map(|s| s.as_ref()).collect();

        let mut conn = self.conn();
        let stale: Vec<SiteRecord> = site::list(&conn)?
            .into_iter()
            .filter(|s| !configured.contains(s.name.as_str()))
            .collect();

        if dry_run || stale.is_empty() {
            return Ok(stale);
        }

        let tx = conn.transaction()?;
        for record in &stale {
            site::delete(&tx, record.id)?;
        }
        tx.commit()?;

        info!(removed = stale.len(), "removed unconfigured sites");
        Ok(stale)
    }

    /// Reclaim space left behind by deletions.
    pub fn vacuum(&self) -> Result<()> {
        self.conn().execute_batch("VACUUM")?;
        debug!("database vacuumed");
        Ok(())
    }

    pub fn list_directories(&self, site_name: &str) -> Result<Vec<DirectoryRecord>> {
        directory::list_for_site(&self.conn(), site_name)
    }

    pub fn count_directories(&self, site_name: &str) -> Result<usize> {
        directory::count_for_site(&self.conn(), site_name)
    }

    /// Directories whose path contains `pattern` (case-insensitive).
    pub fn search_directories(
        &self,
        pattern: &str,
        site_name: Option<&str>,
    ) -> Result<Vec<DirectoryRecord>> {
        directory::search(&self.conn(), pattern, site_name)
    }
}
