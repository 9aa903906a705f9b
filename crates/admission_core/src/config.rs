//! Immutable service configuration.
//!
//! # Responsibility
//! - Bundle the store location, upload directory and price table.
//! - Perform the one-time start-up side effects (schema and upload dir).
//!
//! # Invariants
//! - Built once at process start and only shared by reference afterwards.

use crate::fees::SubjectFeeTable;
use crate::repo::admission_repo::StorageError;
use crate::repo::admission_store::AdmissionStore;
use crate::upload::{PhotoError, PhotoStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "admissions.db";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Start-up failure while preparing storage.
#[derive(Debug)]
pub enum BootstrapError {
    Storage(StorageError),
    Photo(PhotoError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "store initialization failed: {err}"),
            Self::Photo(err) => write!(f, "upload directory setup failed: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Photo(err) => Some(err),
        }
    }
}

/// Everything the submission path needs, constructed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionConfig {
    pub store: AdmissionStore,
    pub photos: PhotoStore,
    pub fee_table: SubjectFeeTable,
}

impl AdmissionConfig {
    pub fn new(
        db_path: impl Into<PathBuf>,
        upload_dir: impl Into<PathBuf>,
        fee_table: SubjectFeeTable,
    ) -> Self {
        Self {
            store: AdmissionStore::new(db_path),
            photos: PhotoStore::new(upload_dir),
            fee_table,
        }
    }

    /// Creates the upload directory and the admission table.
    ///
    /// Idempotent; meant to run once before serving requests.
    pub fn bootstrap(&self) -> Result<(), BootstrapError> {
        self.photos.ensure_dir().map_err(BootstrapError::Photo)?;
        self.store.initialize().map_err(BootstrapError::Storage)?;
        Ok(())
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_DB_PATH,
            DEFAULT_UPLOAD_DIR,
            SubjectFeeTable::standard(),
        )
    }
}
