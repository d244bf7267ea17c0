use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::content::payloads::{BLOCKED, NULL_FILES};

/// Extension served for anything the table does not know.
pub const DEFAULT_EXTENSION: &str = "html";

/// Extension whose body is the live counter snapshot.
pub const STATS_EXTENSION: &str = "stats";

/// Extension whose body is build and reset metadata.
pub const VERSION_EXTENSION: &str = "version";

/// Extension that clears the counters before answering like `stats`.
pub const RESET_EXTENSION: &str = "reset";

/// A canned response body and its MIME type.
///
/// A `None` payload sends headers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullFile {
    pub payload: Option<Bytes>,
    pub mime: &'static str,
}

impl NullFile {
    pub fn new(payload: Option<Bytes>, mime: &'static str) -> Self {
        Self { payload, mime }
    }

    /// Length of the body that will be written.
    pub fn len(&self) -> usize {
        self.payload.as_ref().map_or(0, Bytes::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build metadata reported by the `version` extension.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub build_date: String,
    pub commit_date: String,
    pub sha: String,
    pub version: String,
}

impl BuildInfo {
    /// Metadata baked in at compile time.
    pub fn current() -> Self {
        Self {
            build_date: option_env!("NULLSERV_BUILD_DATE").unwrap_or("unknown").to_string(),
            commit_date: option_env!("NULLSERV_COMMIT_DATE").unwrap_or("unknown").to_string(),
            sha: option_env!("NULLSERV_SHA").unwrap_or("unknown").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize)]
struct VersionBody<'a> {
    build_date: &'a str,
    commit_date: &'a str,
    reset_date: String,
    sha: &'a str,
    version: &'a str,
}

/// Extension to null file mapping, plus the blocked set.
///
/// Everything is fixed at construction except the `version` entry, which
/// [`ContentTable::regenerate_version`] rewrites on every reset.
#[derive(Debug)]
pub struct ContentTable {
    files: HashMap<&'static str, NullFile>,
    blocked: HashSet<&'static str>,
    build: BuildInfo,
    version: RwLock<NullFile>,
}

impl ContentTable {
    pub fn new(build: BuildInfo) -> Self {
        let files = NULL_FILES
            .iter()
            .map(|(ext, payload, mime)| (*ext, NullFile::new(payload.map(Bytes::from_static), *mime)))
            .collect();

        let table = Self {
            files,
            blocked: BLOCKED.iter().copied().collect(),
            version: RwLock::new(NullFile::new(None, "application/json")),
            build,
        };
        table.regenerate_version(Local::now());
        table
    }

    /// Null file for `extension`, falling back to the HTML entry.
    pub fn lookup(&self, extension: &str) -> NullFile {
        if extension == VERSION_EXTENSION {
            return self
                .version
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
        }

        match self.files.get(extension) {
            Some(file) => file.clone(),
            None => self.files[DEFAULT_EXTENSION].clone(),
        }
    }

    /// Whether `extension` has an entry of its own.
    pub fn contains(&self, extension: &str) -> bool {
        extension == STATS_EXTENSION
            || extension == VERSION_EXTENSION
            || self.files.contains_key(extension)
    }

    pub fn is_blocked(&self, extension: &str) -> bool {
        self.blocked.contains(extension)
    }

    /// Rewrites the `version` entry with `reset_at` as the reset date.
    pub fn regenerate_version(&self, reset_at: DateTime<Local>) {
        let body = VersionBody {
            build_date: &self.build.build_date,
            commit_date: &self.build.commit_date,
            reset_date: reset_at.to_rfc2822(),
            sha: &self.build.sha,
            version: &self.build.version,
        };
        let payload = serde_json::to_vec_pretty(&body).unwrap_or_else(|_| b"{}".to_vec());

        let mut version = self.version.write().unwrap_or_else(PoisonError::into_inner);
        *version = NullFile::new(Some(Bytes::from(payload)), "application/json");
    }
}

impl Default for ContentTable {
    fn default() -> Self {
        Self::new(BuildInfo::current())
    }
}
