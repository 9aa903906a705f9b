//! JSON-file store for rating entries.
//!
//! # Responsibility
//! - Create the ratings file as an empty array when it is missing.
//! - Append entries with their `User <n>` label and list them back.
//!
//! # Invariants
//! - The file always holds one JSON array, pretty-printed with two spaces.
//! - Appends within one process are serialized; the label count and the
//!   write see the same array.
//! - An existing file is never truncated by `initialize`.

use crate::model::rating::{user_label, RatingEntry};
use log::{debug, error, info};
use serde_json::Number;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub type RatingStoreResult<T> = Result<T, RatingStoreError>;

/// Failure reading or writing the ratings file.
#[derive(Debug)]
pub enum RatingStoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file exists but does not hold an array of entries.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for RatingStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "ratings file `{}` unavailable: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "ratings file `{}` is corrupt: {source}", path.display())
            }
        }
    }
}

impl Error for RatingStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Ratings kept as a single JSON array on local disk.
#[derive(Debug)]
pub struct RatingStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `[]` when the file does not exist yet.
    pub fn initialize(&self) -> RatingStoreResult<()> {
        let created = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(b"[]").map_err(|source| self.io_error(source))?;
                true
            }
            Err(source) if source.kind() == ErrorKind::AlreadyExists => false,
            Err(source) => {
                error!(
                    "event=ratings_init module=repo status=error error_code=ratings_init_failed error={}",
                    source
                );
                return Err(self.io_error(source));
            }
        };

        info!(
            "event=ratings_init module=repo status=ok created={} path={}",
            created,
            self.path.display()
        );
        Ok(())
    }

    /// Returns every entry in append order.
    pub fn list_all(&self) -> RatingStoreResult<Vec<RatingEntry>> {
        self.read_entries()
    }

    /// Labels and appends one entry, returning it as stored.
    pub fn append(&self, rating: Number, comment: String) -> RatingStoreResult<RatingEntry> {
        // The guard protects no data; a poisoned lock is still usable.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        let entry = RatingEntry {
            user: user_label(entries.len()),
            rating,
            comment,
        };
        entries.push(entry.clone());
        self.write_entries(&entries)?;

        debug!(
            "event=rating_append module=repo status=ok entries={}",
            entries.len()
        );
        Ok(entry)
    }

    fn read_entries(&self) -> RatingStoreResult<Vec<RatingEntry>> {
        let raw = std::fs::read(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_slice(&raw).map_err(|source| RatingStoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &[RatingEntry]) -> RatingStoreResult<()> {
        let body = serde_json::to_string_pretty(entries).map_err(|source| RatingStoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, body).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> RatingStoreError {
        RatingStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
