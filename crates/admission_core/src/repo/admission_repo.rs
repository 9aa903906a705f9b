//! Admission repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert and list APIs over the `students` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Inserts never validate beyond what SQLite constraints enforce.
//! - Listing order is ascending by `id`, which is insertion order.

use crate::db::DbError;
use crate::fees::Fee;
use crate::model::admission::{join_subjects, AdmissionId, AdmissionRecord, NewAdmission};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    guardian_name,
    guardian_phone,
    student_phone,
    dob,
    address,
    class,
    subjects,
    photo_path,
    fees
FROM students";

/// Largest whole number an SQLite REAL holds exactly (2^53).
const MAX_EXACT_REAL: f64 = 9_007_199_254_740_992.0;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of any persistence-layer operation.
#[derive(Debug)]
pub enum StorageError {
    /// Connection, bootstrap, or statement failure.
    Db(DbError),
    /// A value cannot be represented in, or decoded from, the table.
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid admission data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedAdmission {
    pub id: AdmissionId,
    /// Echo of the stored fee, returned for caller convenience.
    pub fees: Fee,
}

/// Repository interface for admission persistence.
pub trait AdmissionRepository {
    fn insert_admission(&self, admission: &NewAdmission) -> StorageResult<InsertedAdmission>;
    fn list_admissions(&self) -> StorageResult<Vec<AdmissionRecord>>;
}

/// SQLite-backed repository over a caller-owned connection.
pub struct SqliteAdmissionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAdmissionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AdmissionRepository for SqliteAdmissionRepository<'_> {
    fn insert_admission(&self, admission: &NewAdmission) -> StorageResult<InsertedAdmission> {
        let stored_fees = i64::try_from(admission.fees).map_err(|_| {
            StorageError::InvalidData(format!(
                "fee total {} exceeds the storable range",
                admission.fees
            ))
        })?;

        self.conn.execute(
            "INSERT INTO students (
                name,
                guardian_name,
                guardian_phone,
                student_phone,
                dob,
                address,
                class,
                subjects,
                photo_path,
                fees
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                admission.name.as_str(),
                admission.guardian_name.as_str(),
                admission.guardian_phone.as_str(),
                admission.student_phone.as_str(),
                admission.dob.as_str(),
                admission.address.as_str(),
                admission.class_name.as_str(),
                join_subjects(&admission.subjects),
                admission.photo_path.as_deref(),
                stored_fees,
            ],
        )?;

        Ok(InsertedAdmission {
            id: self.conn.last_insert_rowid(),
            fees: admission.fees,
        })
    }

    fn list_admissions(&self) -> StorageResult<Vec<AdmissionRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_student_row(row)?);
        }

        Ok(records)
    }
}

fn parse_student_row(row: &Row<'_>) -> StorageResult<AdmissionRecord> {
    let id: AdmissionId = row.get("id")?;

    let fees = parse_fees(row.get("fees")?).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid fee value in students.fees for id {id}"))
    })?;

    let subjects = row.get::<_, Option<String>>("subjects")?.unwrap_or_default();

    Ok(AdmissionRecord {
        id,
        name: row.get("name")?,
        guardian_name: row.get("guardian_name")?,
        guardian_phone: row.get("guardian_phone")?,
        student_phone: row.get("student_phone")?,
        dob: row.get("dob")?,
        address: row.get("address")?,
        class_name: row.get("class")?,
        subjects,
        photo_path: row.get("photo_path")?,
        fees,
    })
}

// Tables created by earlier deployments declare `fees REAL`.
fn parse_fees(value: Value) -> Option<Fee> {
    match value {
        Value::Integer(amount) => Fee::try_from(amount).ok(),
        Value::Real(amount) if (0.0..=MAX_EXACT_REAL).contains(&amount) && amount.fract() == 0.0 => {
            Some(amount as Fee)
        }
        _ => None,
    }
}
