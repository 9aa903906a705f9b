//! Admission record model.
//!
//! # Responsibility
//! - Define the canonical admission row returned to administrators.
//! - Define the subject list encoding used by the `subjects` column.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `fees` is computed once at submission time and never recomputed.
//! - `subjects` is returned exactly as stored; it is never split back into
//!   names, so a submitted value containing the delimiter stays one value.
//! - `photo_path`, when set, names a file written before the row insert.

use crate::fees::Fee;
use serde::Serialize;

/// Store-assigned, monotonically increasing row identifier.
pub type AdmissionId = i64;

/// Delimiter used when a subject list is flattened into one column.
pub const SUBJECT_DELIMITER: &str = ", ";

/// Admission data ready to be inserted; the store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmission {
    pub name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    /// Empty when the form omitted it.
    pub student_phone: String,
    /// Free text exactly as submitted.
    pub dob: String,
    pub address: String,
    pub class_name: String,
    /// Selected subjects in submission order.
    pub subjects: Vec<String>,
    pub photo_path: Option<String>,
    pub fees: Fee,
}

/// One persisted admission submission.
///
/// Serialized with the field names of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionRecord {
    pub id: AdmissionId,
    pub name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    /// Nullable in storage for rows written by older clients.
    pub student_phone: Option<String>,
    pub dob: String,
    pub address: String,
    #[serde(rename = "class")]
    pub class_name: String,
    /// Stored `", "`-joined subject list.
    pub subjects: String,
    pub photo_path: Option<String>,
    pub fees: Fee,
}

/// Flattens a subject list into its stored form.
pub fn join_subjects<S: AsRef<str>>(subjects: &[S]) -> String {
    subjects
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SUBJECT_DELIMITER)
}
