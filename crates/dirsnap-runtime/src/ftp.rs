//! FTP/FTPS listing session.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

use chrono::{DateTime, Utc};
use dirsnap_types::{Entry, EntryKind, Lister, ListingError};
use suppaftp::list::File;
use suppaftp::native_tls::TlsConnector;
use suppaftp::{FtpError, NativeTlsConnector, NativeTlsFtpStream};
use tracing::{debug, info, warn};

use crate::session::Connector;
use crate::{Error, Result, SiteConfig};

/// Connects to real FTP servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FtpConnector;

impl Connector for FtpConnector {
    type Session = FtpSession;

    fn connect(&self, site: &SiteConfig) -> Result<FtpSession> {
        FtpSession::connect(site).map_err(|err| Error::Connection {
            site: site.name.clone(),
            message: err.to_string(),
        })
    }
}

#[derive(Debug)]
pub enum ConnectError {
    Resolve(std::io::Error),
    Tls(suppaftp::native_tls::Error),
    Ftp(FtpError),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::Resolve(err) => write!(f, "cannot resolve address: {}", err),
            ConnectError::Tls(err) => write!(f, "TLS setup failed: {}", err),
            ConnectError::Ftp(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectError::Resolve(err) => Some(err),
            ConnectError::Tls(err) => Some(err),
            ConnectError::Ftp(err) => Some(err),
        }
    }
}

impl From<FtpError> for ConnectError {
    fn from(err: FtpError) -> Self {
        ConnectError::Ftp(err)
    }
}

/// A logged-in control connection to one server.
///
/// The session is closed with `QUIT` when dropped.
pub struct FtpSession {
    stream: NativeTlsFtpStream,
    site: String,
}

impl FtpSession {
    pub fn connect(site: &SiteConfig) -> std::result::Result<Self, ConnectError> {
        let addr = resolve(&site.socket_address()).map_err(ConnectError::Resolve)?;
        let mut stream = NativeTlsFtpStream::connect_timeout(addr, site.connect_timeout())?;

        if site.tls {
            // Mirrors routinely run self-signed certificates
            let connector = TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(ConnectError::Tls)?;
            stream = stream.into_secure(NativeTlsConnector::from(connector), site.host())?;
        }

        stream.login(site.username.as_str(), site.password.as_str())?;
        info!(site = %site.name, address = %addr, tls = site.tls, "connected");

        Ok(Self {
            stream,
            site: site.name.clone(),
        })
    }
}

fn resolve(address: &str) -> std::io::Result<SocketAddr> {
    address.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no address found for {}", address),
        )
    })
}

impl Lister for FtpSession {
    fn list(&mut self, path: &str) -> std::result::Result<Vec<Entry>, ListingError> {
        let lines = self.stream.list(Some(path)).map_err(|err| match err {
            FtpError::ConnectionError(io) => ListingError::Io(io),
            other => ListingError::Protocol(other.to_string()),
        })?;

        let entries = parse_listing(path, &lines)?;
        debug!(site = %self.site, path, entries = entries.len(), "listed");
        Ok(entries)
    }
}

impl Drop for FtpSession {
    fn drop(&mut self) {
        if let Err(err) = self.stream.quit() {
            debug!(site = %self.site, error = %err, "quit failed");
        }
    }
}

/// Parse `LIST` output lines for directory `dir`.
///
/// Lines that are not entries (the `total N` header, blank lines) are skipped.
/// Other unreadable lines are skipped with a warning; when every such line
/// fails and nothing parses, the reply is a [`ListingError::Parse`] so the
/// directory is not mistaken for an empty one.
pub fn parse_listing(
    dir: &str,
    lines: &[String],
) -> std::result::Result<Vec<Entry>, ListingError> {
    let mut entries = Vec::with_capacity(lines.len());
    let mut rejected = 0usize;

    for line in lines {
        if line.trim().is_empty() || line.starts_with("total ") {
            continue;
        }
        match line.parse::<File>() {
            Ok(file) => entries.push(to_entry(dir, &file)),
            Err(_) => {
                warn!(dir, line = line.as_str(), "skipping unparseable listing line");
                rejected += 1;
            }
        }
    }

    if entries.is_empty() && rejected > 0 {
        return Err(ListingError::Parse(format!(
            "{}: none of {} lines could be parsed",
            dir, rejected
        )));
    }
    Ok(entries)
}

fn to_entry(dir: &str, file: &File) -> Entry {
    let kind = if file.is_directory() {
        EntryKind::Directory
    } else if file.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };
    let modified: DateTime<Utc> = file.modified().into();
    Entry::new(dir, file.name(), kind, modified)
}
