use dirsnap_types::Lister;

use crate::{Result, SiteConfig};

/// Opens one listing session per site.
///
/// A crawl connects once, hands the session to the walker and drops it when
/// the site is done. Failing to connect must be reported as
/// [`Error::Connection`](crate::Error::Connection) so the orchestrator can
/// skip the site and carry on.
pub trait Connector: Sync {
    type Session: Lister;

    fn connect(&self, site: &SiteConfig) -> Result<Self::Session>;
}
