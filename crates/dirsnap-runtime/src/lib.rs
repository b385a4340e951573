pub mod config;
pub mod crawl;
pub mod error;
pub mod ftp;
pub mod gc;
pub mod session;
pub mod update;

pub use config::{Config, SiteConfig, resolve_data_dir};
pub use crawl::{CrawlStats, crawl_site};
pub use error::{Error, Result};
pub use ftp::{FtpConnector, FtpSession};
pub use gc::{GcReport, collect_garbage};
pub use session::Connector;
pub use update::{SiteReport, UpdateReport, UpdateService};
