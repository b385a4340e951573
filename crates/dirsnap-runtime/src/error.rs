use std::fmt;

/// Result type for dirsnap-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Database/index layer error; fatal to the whole run
    Index(dirsnap_index::Error),

    /// The crawl root could not be listed; fatal to one site
    Walk(dirsnap_engine::Error),

    /// Session could not be established; fatal to one site
    Connection { site: String, message: String },

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// A site name that is not in the configuration
    UnknownSite(String),
}

impl Error {
    /// Whether the error only concerns a single site and the run may go on.
    pub fn is_site_local(&self) -> bool {
        matches!(self, Error::Walk(_) | Error::Connection { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Walk(err) => write!(f, "Walk error: {}", err),
            Error::Connection { site, message } => {
                write!(f, "Connection to {} failed: {}", site, message)
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::UnknownSite(name) => write!(f, "Unknown site: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Walk(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Connection { .. } | Error::Config(_) | Error::UnknownSite(_) => None,
        }
    }
}

impl From<dirsnap_index::Error> for Error {
    fn from(err: dirsnap_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<dirsnap_engine::Error> for Error {
    fn from(err: dirsnap_engine::Error) -> Self {
        Error::Walk(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
