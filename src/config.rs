use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

/// Longest max-age allowed (one year, RFC 2616 section 14.21).
pub const HTTP_MAX_AGE: i64 = 31_536_000;

/// Highest verbosity level; raising it further wraps back to 0.
pub const MAX_VERBOSITY: u8 = 9;

/// Cache-Control value for live or uncacheable responses.
pub const NO_CACHE: &str = "no-store, max-age=0";

/// Command line flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "nullserv", about = "Null file responder for ad blocking DNS sinkholes")]
pub struct Cli {
    /// JSON config file; its fields override the flags
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// HTTP address (empty = all interfaces)
    #[arg(short = 'a', long = "http-address", default_value = "")]
    pub http_address: String,

    /// HTTP port
    #[arg(short = 'p', long = "http-port", default_value_t = 80)]
    pub http_port: u16,

    /// HTTPS address (empty = all interfaces)
    #[arg(short = 'A', long = "https-address", default_value = "")]
    pub https_address: String,

    /// HTTPS port
    #[arg(short = 'P', long = "https-port", default_value_t = 443)]
    pub https_port: u16,

    /// Content cache age in seconds (negative disables caching)
    #[arg(short = 'm', long = "max-age", default_value_t = HTTP_MAX_AGE, allow_negative_numbers = true)]
    pub max_age: i64,

    /// Verbosity level 0..=9
    #[arg(short = 'v', long = "verbose", default_value_t = 0)]
    pub verbose: u8,

    /// Append event logs to this file instead of the console
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Seconds to wait for a client to send data (0 = forever)
    #[arg(short = 't', long = "read-timeout", default_value_t = 30)]
    pub read_timeout: u64,
}

/// Address and port of one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    pub address: String,
    pub port: u16,
}

impl ListenConfig {
    /// `host:port` suitable for binding; an empty address means all interfaces.
    pub fn bind_addr(&self) -> String {
        if self.address.is_empty() {
            format!("0.0.0.0:{}", self.port)
        } else if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub http: ListenConfig,
    pub https: ListenConfig,
    pub max_age: i64,
    pub verbose: u8,
    pub log_file: Option<PathBuf>,
    pub read_timeout: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListenFile {
    address: Option<String>,
    port: Option<u16>,
}

/// On-disk overrides. Only the fields present replace the flag values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    max_age: Option<i64>,
    verbose: Option<u8>,
    log_file: Option<PathBuf>,
    read_timeout: Option<u64>,
    #[serde(alias = "Http")]
    http: Option<ListenFile>,
    #[serde(alias = "Https")]
    https: Option<ListenFile>,
}

impl Config {
    /// Builds the configuration from flags and the optional config file.
    pub fn load(cli: Cli) -> anyhow::Result<Self> {
        let mut cfg = Self::from(&cli);

        if let Some(path) = &cli.config {
            cfg.apply_file(path)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to open conf file {}", path.display()))?;
        self.apply_str(&text)
            .with_context(|| format!("error parsing conf file {}", path.display()))
    }

    /// Applies a JSON document on top of the current values.
    pub fn apply_str(&mut self, text: &str) -> anyhow::Result<()> {
        let file: ConfigFile = serde_json::from_str(text)?;

        if let Some(max_age) = file.max_age {
            self.max_age = max_age;
        }
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
        }
        if let Some(log_file) = file.log_file {
            self.log_file = Some(log_file);
        }
        if let Some(read_timeout) = file.read_timeout {
            self.read_timeout = read_timeout;
        }
        if let Some(http) = file.http {
            merge_listen(&mut self.http, http);
        }
        if let Some(https) = file.https {
            merge_listen(&mut self.https, https);
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_age > HTTP_MAX_AGE {
            bail!("max age must be at most {}", HTTP_MAX_AGE);
        }
        if self.verbose > MAX_VERBOSITY {
            bail!("verbose must be in range 0..={}", MAX_VERBOSITY);
        }
        Ok(())
    }

    /// Cache-Control value for canned content.
    pub fn cache_control(&self) -> String {
        if self.max_age < 0 {
            NO_CACHE.to_string()
        } else {
            format!("public, max-age={}", self.max_age)
        }
    }

    pub fn read_deadline(&self) -> Option<Duration> {
        (self.read_timeout > 0).then(|| Duration::from_secs(self.read_timeout))
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            http: ListenConfig {
                address: cli.http_address.clone(),
                port: cli.http_port,
            },
            https: ListenConfig {
                address: cli.https_address.clone(),
                port: cli.https_port,
            },
            max_age: cli.max_age,
            verbose: cli.verbose,
            log_file: cli.log_file.clone(),
            read_timeout: cli.read_timeout,
        }
    }
}

fn merge_listen(target: &mut ListenConfig, file: ListenFile) {
    if let Some(address) = file.address {
        target.address = address;
    }
    if let Some(port) = file.port {
        target.port = port;
    }
}
