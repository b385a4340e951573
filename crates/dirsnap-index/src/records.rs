use serde::{Deserialize, Serialize};

/// A crawled site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Surrogate key.
    pub id: i64,
    /// Site name from the configuration; unique.
    pub name: String,
}

/// Site with the size of its current snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    pub id: i64,
    pub name: String,
    pub directory_count: usize,
}

/// One stored leaf directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub site_id: i64,
    /// Name of the owning site.
    pub site: String,
    pub path: String,
    pub name: String,
    /// Unix epoch seconds, as reported by the server.
    pub modified_at: Option<i64>,
}
