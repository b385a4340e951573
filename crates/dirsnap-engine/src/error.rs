use std::fmt;

use dirsnap_types::ListingError;

/// Result type for dirsnap-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while walking a remote tree
#[derive(Debug)]
pub enum Error {
    /// The crawl root itself could not be listed
    ListingUnavailable { path: String, source: ListingError },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ListingUnavailable { path, source } => {
                write!(f, "Cannot list crawl root {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ListingUnavailable { source, .. } => Some(source),
        }
    }
}
