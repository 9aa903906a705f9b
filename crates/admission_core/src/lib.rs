//! Core domain logic for the admission service.
//! Fee calculation, photo storage, the admission record store and the ratings
//! file live here; the HTTP surface is a thin layer on top.

pub mod config;
pub mod db;
pub mod fees;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod upload;

pub use config::{AdmissionConfig, BootstrapError};
pub use fees::{calculate_fees, parse_fee_override, Fee, FeeTableError, SubjectFeeTable};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::admission::{AdmissionId, AdmissionRecord, NewAdmission};
pub use model::rating::{RatingEntry, DEFAULT_COMMENT};
pub use repo::admission_repo::{
    AdmissionRepository, InsertedAdmission, SqliteAdmissionRepository, StorageError,
    StorageResult,
};
pub use repo::admission_store::AdmissionStore;
pub use repo::rating_store::{RatingStore, RatingStoreError};
pub use service::admission_service::{
    fields, AdmissionError, AdmissionResult, AdmissionService, SubmissionForm, SubmissionReceipt,
};
pub use service::rating_service::{
    RatingError, RatingService, RatingSubmission, INVALID_RATING_MESSAGE, RATING_SAVED_MESSAGE,
};
pub use upload::{PhotoError, PhotoStore, PhotoUpload};

