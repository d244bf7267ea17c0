//! State shared by every connection, and the runtime control API.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use chrono::Local;

use crate::config::{Config, MAX_VERBOSITY};
use crate::content::ContentTable;
use crate::logging::{self, Logger};
use crate::stats::Stats;

/// Everything a request or connection handler needs.
///
/// Only the counters (behind the [`Stats`] actor), the `version` table entry
/// and the verbosity level change after startup.
#[derive(Debug)]
pub struct ServerState {
    pub table: ContentTable,
    pub stats: Stats,
    pub log: Logger,
    verbosity: AtomicU8,
    cache_control: String,
    read_deadline: Option<Duration>,
}

impl ServerState {
    /// Starts the stats and log actors and builds the state around them.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(cfg: &Config) -> Self {
        let log = Logger::spawn(logging::select_backend(cfg.log_file.as_deref()));
        Self::with_parts(cfg, ContentTable::default(), Stats::spawn(), log)
    }

    pub fn with_parts(cfg: &Config, table: ContentTable, stats: Stats, log: Logger) -> Self {
        Self {
            table,
            stats,
            log,
            verbosity: AtomicU8::new(cfg.verbose),
            cache_control: cfg.cache_control(),
            read_deadline: cfg.read_deadline(),
        }
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity.load(Ordering::Relaxed)
    }

    /// Cache-Control value for canned content.
    pub fn cache_control(&self) -> &str {
        &self.cache_control
    }

    /// How long a client may take to send its first bytes.
    pub fn read_deadline(&self) -> Option<Duration> {
        self.read_deadline
    }

    /// Raises the verbosity by one, wrapping to 0 past the maximum.
    pub async fn increase_verbosity(&self) -> u8 {
        let previous = self
            .verbosity
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |level| {
                Some(if level >= MAX_VERBOSITY { 0 } else { level + 1 })
            })
            .unwrap_or_default();
        let level = if previous >= MAX_VERBOSITY { 0 } else { previous + 1 };

        self.log.notice(format!("debug level {}", level)).await;
        level
    }

    /// Logs the current counters without clearing them.
    pub async fn request_snapshot(&self) {
        let counters = self.stats.snapshot().await;
        let text = serde_json::to_string(&counters).unwrap_or_else(|_| "{}".to_string());
        self.log.notice(format!("stats {}", text)).await;
    }

    /// Clears every counter and stamps a new reset date on `version`.
    pub async fn request_reset(&self) {
        self.stats.reset().await;
        self.table.regenerate_version(Local::now());
        if self.verbosity() > 0 {
            self.log.notice("stats reset").await;
        }
    }
}
