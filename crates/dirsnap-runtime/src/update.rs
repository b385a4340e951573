use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use dirsnap_index::Database;
use serde::Serialize;
use tracing::{error, info, info_span};

use crate::crawl::{CrawlStats, crawl_site};
use crate::session::Connector;
use crate::{Error, Result, SiteConfig};

/// Outcome for one site of an `update` run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SiteReport {
    Crawled {
        site: String,
        #[serde(flatten)]
        stats: CrawlStats,
    },
    Failed {
        site: String,
        reason: String,
    },
}

impl SiteReport {
    pub fn site(&self) -> &str {
        match self {
            SiteReport::Crawled { site, .. } | SiteReport::Failed { site, .. } => site,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SiteReport::Failed { .. })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    /// One report per requested site, in configuration order.
    pub sites: Vec<SiteReport>,
}

impl UpdateReport {
    pub fn crawled(&self) -> usize {
        self.sites.iter().filter(|s| !s.is_failure()).count()
    }

    pub fn failed(&self) -> usize {
        self.sites.iter().filter(|s| s.is_failure()).count()
    }
}

/// Drives connect → walk → extract → replace for a batch of sites.
///
/// Connection failures and unlistable roots only fail their own site.
/// A database error stops the run: no further site is started and the
/// error is returned.
pub struct UpdateService<'a, C: Connector> {
    db: &'a Database,
    connector: &'a C,
    jobs: usize,
}

impl<'a, C: Connector> UpdateService<'a, C> {
    pub fn new(db: &'a Database, connector: &'a C) -> Self {
        Self {
            db,
            connector,
            jobs: 1,
        }
    }

    /// Crawl up to `jobs` sites at the same time (at least one).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn run(&self, sites: &[&SiteConfig]) -> Result<UpdateReport> {
        let reports = if self.jobs == 1 || sites.len() <= 1 {
            sites
                .iter()
                .map(|site| self.update_site(site))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.run_parallel(sites)?
        };

        let report = UpdateReport { sites: reports };
        info!(
            crawled = report.crawled(),
            failed = report.failed(),
            "update finished"
        );
        Ok(report)
    }

    fn run_parallel(&self, sites: &[&SiteConfig]) -> Result<Vec<SiteReport>> {
        let next = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let done: Mutex<Vec<(usize, SiteReport)>> = Mutex::new(Vec::with_capacity(sites.len()));
        let fatal: Mutex<Option<Error>> = Mutex::new(None);

        thread::scope(|scope| {
            for _ in 0..self.jobs.min(sites.len()) {
                scope.spawn(|| {
                    while !abort.load(Ordering::SeqCst) {
                        let idx = next.fetch_add(1, Ordering::SeqCst);
                        let Some(site) = sites.get(idx) else {
                            break;
                        };

                        match self.update_site(site) {
                            Ok(report) => lock(&done).push((idx, report)),
                            Err(err) => {
                                abort.store(true, Ordering::SeqCst);
                                lock(&fatal).get_or_insert(err);
                                break;
                            }
                        }
                    }
                });
            }
        });

        if let Some(err) = into_inner(fatal) {
            return Err(err);
        }

        let mut done = into_inner(done);
        done.sort_by_key(|(idx, _)| *idx);
        Ok(done.into_iter().map(|(_, report)| report).collect())
    }

    /// Crawl one site. `Err` only for errors that must stop the whole run.
    fn update_site(&self, site: &SiteConfig) -> Result<SiteReport> {
        let span = info_span!("site", name = %site.name);
        let _enter = span.enter();

        let outcome = self
            .connector
            .connect(site)
            .and_then(|mut session| crawl_site(self.db, site, &mut session));

        match outcome {
            Ok(stats) => Ok(SiteReport::Crawled {
                site: site.name.clone(),
                stats,
            }),
            Err(err) if err.is_site_local() => {
                error!(error = %err, "site skipped");
                Ok(SiteReport::Failed {
                    site: site.name.clone(),
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn into_inner<T>(mutex: Mutex<T>) -> T {
    mutex
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
