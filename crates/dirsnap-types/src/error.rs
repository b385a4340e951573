use std::fmt;

/// Failure to list a single remote directory.
#[derive(Debug)]
pub enum ListingError {
    /// Transport-level failure (socket closed, timeout)
    Io(std::io::Error),

    /// The server refused the listing or answered with an error code
    Protocol(String),

    /// A listing line could not be understood
    Parse(String),
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::Io(err) => write!(f, "IO error: {}", err),
            ListingError::Protocol(msg) => write!(f, "Server error: {}", msg),
            ListingError::Parse(msg) => write!(f, "Unparseable listing: {}", msg),
        }
    }
}

impl std::error::Error for ListingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingError::Io(err) => Some(err),
            ListingError::Protocol(_) | ListingError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ListingError {
    fn from(err: std::io::Error) -> Self {
        ListingError::Io(err)
    }
}
