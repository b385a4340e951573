use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_FTP_PORT: u16 = 21;

/// Resolve the data directory (database location) based on priority:
/// 1. DIRSNAP_DATA_DIR environment variable (with tilde expansion)
/// 2. XDG data directory
/// 3. ~/.dirsnap (fallback for systems without XDG)
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(env_path) = std::env::var("DIRSNAP_DATA_DIR") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("dirsnap"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".dirsnap"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_root() -> String {
    "/".to_string()
}

fn default_username() -> String {
    "anonymous".to_string()
}

/// One remote server to crawl.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Unique name; snapshots are keyed by it.
    pub name: String,
    /// `host` or `host:port`; port 21 when omitted.
    pub address: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Explicit FTPS (AUTH TLS) before login.
    #[serde(default)]
    pub tls: bool,
    /// Seconds to wait for the control connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Directory the crawl starts from.
    #[serde(default = "default_root")]
    pub root: String,
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            username: default_username(),
            password: String::new(),
            tls: false,
            connect_timeout: default_connect_timeout(),
            root: default_root(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Host part of the address, used as the TLS domain.
    pub fn host(&self) -> &str {
        match self.address.rsplit_once(':') {
            Some((host, port)) if port.parse::<u16>().is_ok() => {
                host.trim_start_matches('[').trim_end_matches(']')
            }
            _ => &self.address,
        }
    }

    /// Address with the default FTP port filled in.
    pub fn socket_address(&self) -> String {
        match self.address.rsplit_once(':') {
            Some((_, port)) if port.parse::<u16>().is_ok() => self.address.clone(),
            _ => format!("{}:{}", self.address, DEFAULT_FTP_PORT),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("site with an empty name".to_string()));
        }
        if self.address.trim().is_empty() {
            return Err(Error::Config(format!("site '{}' has no address", self.name)));
        }
        if self.connect_timeout == 0 {
            return Err(Error::Config(format!(
                "site '{}': connect_timeout must be at least 1 second",
                self.name
            )));
        }
        if !self.root.starts_with('/') {
            return Err(Error::Config(format!(
                "site '{}': root must be an absolute path, got '{}'",
                self.name, self.root
            )));
        }
        Ok(())
    }
}

// Keeps passwords out of logs and error output
impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"***")
            .field("tls", &self.tls)
            .field("connect_timeout", &self.connect_timeout)
            .field("root", &self.root)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// SQLite file; `<data dir>/dirsnap.db` when omitted.
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `DIRSNAP_CONFIG`, or `config.toml` in the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("DIRSNAP_CONFIG") {
            return Ok(expand_tilde(&env_path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            return Ok(config_dir.join("dirsnap").join("config.toml"));
        }

        Ok(resolve_data_dir()?.join("config.toml"))
    }

    /// Check every site and name uniqueness. An empty site list is valid:
    /// `gc` with no sites clears the whole catalog.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for site in &self.sites {
            site.validate()?;
            if !names.insert(site.name.as_str()) {
                return Err(Error::Config(format!("duplicate site name '{}'", site.name)));
            }
        }

        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(expand_tilde(path)),
            None => Ok(resolve_data_dir()?.join("dirsnap.db")),
        }
    }

    pub fn site(&self, name: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.name == name)
    }

    pub fn site_names(&self) -> Vec<&str> {
        self.sites.iter().map(|s| s.name.as_str()).collect()
    }

    /// The sites an `update` should crawl: one by name, or all of them.
    /// Fails when there is nothing to crawl.
    pub fn select_sites(&self, name: Option<&str>) -> Result<Vec<&SiteConfig>> {
        if self.sites.is_empty() {
            return Err(Error::Config("no sites configured".to_string()));
        }

        match name {
            Some(name) => self
                .site(name)
                .map(|site| vec![site])
                .ok_or_else(|| Error::UnknownSite(name.to_string())),
            None => Ok(self.sites.iter().collect()),
        }
    }
}
