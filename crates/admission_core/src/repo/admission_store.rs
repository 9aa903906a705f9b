//! Path-based admission store with one connection per operation.
//!
//! # Responsibility
//! - Expose the store lifecycle: `initialize`, `insert`, `list_all`.
//! - Open a fresh connection for every call and close it before returning.
//!
//! # Invariants
//! - No connection is cached or shared between calls.
//! - `initialize` is idempotent and only ever creates schema.

use super::admission_repo::{
    AdmissionRepository, InsertedAdmission, SqliteAdmissionRepository, StorageResult,
};
use crate::db::open_db;
use crate::model::admission::{AdmissionRecord, NewAdmission};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Admission store backed by a SQLite file on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionStore {
    db_path: PathBuf,
}

impl AdmissionStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Ensures the backing table exists.
    ///
    /// Safe to call on every process start.
    pub fn initialize(&self) -> StorageResult<()> {
        let started_at = Instant::now();
        match self.connect() {
            Ok(_conn) => {
                info!(
                    "event=store_init module=repo status=ok duration_ms={} db_path={}",
                    started_at.elapsed().as_millis(),
                    self.db_path.display()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_init module=repo status=error duration_ms={} error_code=store_init_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Inserts one admission and returns its new ID plus the stored fee.
    pub fn insert(&self, admission: &NewAdmission) -> StorageResult<InsertedAdmission> {
        let conn = self.connect()?;
        SqliteAdmissionRepository::new(&conn).insert_admission(admission)
    }

    /// Returns every admission in ascending ID order.
    pub fn list_all(&self) -> StorageResult<Vec<AdmissionRecord>> {
        let conn = self.connect()?;
        SqliteAdmissionRepository::new(&conn).list_admissions()
    }

    fn connect(&self) -> StorageResult<Connection> {
        Ok(open_db(&self.db_path)?)
    }
}

impl AdmissionRepository for AdmissionStore {
    fn insert_admission(&self, admission: &NewAdmission) -> StorageResult<InsertedAdmission> {
        self.insert(admission)
    }

    fn list_admissions(&self) -> StorageResult<Vec<AdmissionRecord>> {
        self.list_all()
    }
}
