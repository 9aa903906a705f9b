//! Admission submission and listing use-cases.
//!
//! # Responsibility
//! - Presence-check submitted form data.
//! - Compute fees, store the photo, then insert the admission row.
//! - List stored admissions for administrators.
//!
//! # Invariants
//! - A missing required field aborts before any file or row is written.
//! - The photo is written before the insert; a failed insert leaves the
//!   photo behind and it is never cleaned up.
//! - Stored `fees` always equals the fee table total for the stored subjects.

use crate::config::AdmissionConfig;
use crate::fees::{calculate_fees, Fee, SubjectFeeTable};
use crate::model::admission::{AdmissionId, AdmissionRecord, NewAdmission};
use crate::repo::admission_repo::{AdmissionRepository, StorageError};
use crate::repo::admission_store::AdmissionStore;
use crate::upload::{PhotoError, PhotoStore, PhotoUpload};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Multipart field names accepted by the submission form.
pub mod fields {
    pub const NAME: &str = "name";
    pub const GUARDIAN_NAME: &str = "guardian-name";
    pub const GUARDIAN_PHONE: &str = "guardian-phone";
    pub const STUDENT_PHONE: &str = "student-phone";
    pub const DOB: &str = "dob";
    pub const ADDRESS: &str = "address";
    pub const CLASS: &str = "class";
    pub const SUBJECTS: &str = "subjects";
    pub const PHOTO: &str = "photo";
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Failure of a submission or listing request.
#[derive(Debug)]
pub enum AdmissionError {
    /// A required form field was absent.
    MissingField(&'static str),
    /// The request body could not be read as a form.
    MalformedForm(String),
    /// An accepted photo could not be written.
    Photo(PhotoError),
    /// Persistence failed.
    Storage(StorageError),
}

impl AdmissionError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::MalformedForm(_) => "malformed_form",
            Self::Photo(_) => "photo_write_failed",
            Self::Storage(_) => "storage_failed",
        }
    }

    /// Whether the caller, rather than the infrastructure, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::MalformedForm(_))
    }
}

impl Display for AdmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::MalformedForm(message) => write!(f, "malformed form data: {message}"),
            Self::Photo(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AdmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField(_) | Self::MalformedForm(_) => None,
            Self::Photo(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<PhotoError> for AdmissionError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

impl From<StorageError> for AdmissionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Raw submission as collected from the form, before presence checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub student_phone: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub class_name: Option<String>,
    pub subjects: Vec<String>,
    pub photo: Option<PhotoUpload>,
}

impl SubmissionForm {
    /// Records one text field by its form name.
    ///
    /// Repeated `subjects` values accumulate in order; other repeated fields
    /// keep the first value. Returns `false` for unknown field names.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            fields::SUBJECTS => {
                self.subjects.push(value);
                return true;
            }
            fields::NAME => &mut self.name,
            fields::GUARDIAN_NAME => &mut self.guardian_name,
            fields::GUARDIAN_PHONE => &mut self.guardian_phone,
            fields::STUDENT_PHONE => &mut self.student_phone,
            fields::DOB => &mut self.dob,
            fields::ADDRESS => &mut self.address,
            fields::CLASS => &mut self.class_name,
            _ => return false,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
        true
    }
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: AdmissionId,
    pub fees: Fee,
}

/// Use-case service for admission submissions.
pub struct AdmissionService<'cfg, R: AdmissionRepository> {
    repo: R,
    fee_table: &'cfg SubjectFeeTable,
    photos: &'cfg PhotoStore,
}

impl<'cfg> AdmissionService<'cfg, AdmissionStore> {
    /// Builds a service over the configured file-backed store.
    pub fn from_config(config: &'cfg AdmissionConfig) -> Self {
        Self::new(config.store.clone(), &config.fee_table, &config.photos)
    }
}

impl<'cfg, R: AdmissionRepository> AdmissionService<'cfg, R> {
    pub fn new(repo: R, fee_table: &'cfg SubjectFeeTable, photos: &'cfg PhotoStore) -> Self {
        Self {
            repo,
            fee_table,
            photos,
        }
    }

    /// Accepts one admission submission.
    ///
    /// # Contract
    /// - `student-phone` defaults to empty; `subjects` may be empty.
    /// - Unacceptable photos are skipped, leaving `photo_path` unset.
    /// - Returns the new record ID and the computed fee.
    pub fn submit(&self, form: SubmissionForm) -> AdmissionResult<SubmissionReceipt> {
        let started_at = Instant::now();
        match self.submit_inner(form) {
            Ok(receipt) => {
                info!(
                    "event=admission_submit module=service status=ok id={} fees={} duration_ms={}",
                    receipt.id,
                    receipt.fees,
                    started_at.elapsed().as_millis()
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    "event=admission_submit module=service status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Lists every stored admission in ascending ID order.
    pub fn list(&self) -> AdmissionResult<Vec<AdmissionRecord>> {
        let started_at = Instant::now();
        match self.repo.list_admissions() {
            Ok(records) => {
                info!(
                    "event=admission_list module=service status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=admission_list module=service status=error duration_ms={} error_code=storage_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn submit_inner(&self, form: SubmissionForm) -> AdmissionResult<SubmissionReceipt> {
        let name = required(form.name, fields::NAME)?;
        let guardian_name = required(form.guardian_name, fields::GUARDIAN_NAME)?;
        let guardian_phone = required(form.guardian_phone, fields::GUARDIAN_PHONE)?;
        let dob = required(form.dob, fields::DOB)?;
        let address = required(form.address, fields::ADDRESS)?;
        let class_name = required(form.class_name, fields::CLASS)?;

        let fees = calculate_fees(self.fee_table, &form.subjects);

        let photo_path = match &form.photo {
            Some(upload) => self.photos.save(upload)?,
            None => None,
        };

        let admission = NewAdmission {
            name,
            guardian_name,
            guardian_phone,
            student_phone: form.student_phone.unwrap_or_default(),
            dob,
            address,
            class_name,
            subjects: form.subjects,
            photo_path,
            fees,
        };

        match self.repo.insert_admission(&admission) {
            Ok(inserted) => Ok(SubmissionReceipt {
                id: inserted.id,
                fees: inserted.fees,
            }),
            Err(err) => {
                if admission.photo_path.is_some() {
                    warn!(
                        "event=admission_submit module=service status=partial error_code=orphaned_photo"
                    );
                }
                Err(err.into())
            }
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> AdmissionResult<String> {
    value.ok_or(AdmissionError::MissingField(field))
}
