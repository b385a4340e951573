// SQLite snapshot store
// One row per leaf directory, replaced wholesale per site

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::{DirectoryRecord, SiteRecord, SiteSummary};
pub use schema::SCHEMA_VERSION;
