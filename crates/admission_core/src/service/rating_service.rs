//! Rating submission and listing use-cases.
//!
//! # Responsibility
//! - Validate the submitted rating and default an absent comment.
//! - Append accepted ratings to the ratings file.
//!
//! # Invariants
//! - Only JSON numbers in `0..=100` are accepted; nothing is written otherwise.
//! - An absent, null or empty comment is stored as the default comment.

use crate::model::rating::{RatingEntry, DEFAULT_COMMENT};
use crate::repo::rating_store::{RatingStore, RatingStoreError};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 100.0;
pub const INVALID_RATING_MESSAGE: &str = "Invalid rating. Rating must be between 0 and 100.";
pub const RATING_SAVED_MESSAGE: &str = "Submission saved successfully!";

/// Rating request body as received; fields are checked by [`RatingService`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatingSubmission {
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub comment: Option<Value>,
}

impl RatingSubmission {
    /// Reads a request body; anything other than an object counts as empty.
    pub fn from_json(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }
}

/// Failure of a rating request.
#[derive(Debug)]
pub enum RatingError {
    /// Rating absent, not a number, or outside `0..=100`.
    InvalidRating,
    Storage(RatingStoreError),
}

impl RatingError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRating => "invalid_rating",
            Self::Storage(_) => "ratings_storage_failed",
        }
    }
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRating => write!(f, "{INVALID_RATING_MESSAGE}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RatingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRating => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RatingStoreError> for RatingError {
    fn from(value: RatingStoreError) -> Self {
        Self::Storage(value)
    }
}

/// Rating use-cases over one ratings file.
pub struct RatingService<'s> {
    store: &'s RatingStore,
}

impl<'s> RatingService<'s> {
    pub fn new(store: &'s RatingStore) -> Self {
        Self { store }
    }

    /// Validates and appends one rating.
    ///
    /// # Errors
    /// - [`RatingError::InvalidRating`] before anything is written.
    /// - [`RatingError::Storage`] when the ratings file cannot be read or written.
    pub fn submit(&self, submission: RatingSubmission) -> Result<RatingEntry, RatingError> {
        let Some(rating) = valid_rating(submission.rating.as_ref()) else {
            warn!("event=rating_submit module=service status=rejected error_code=invalid_rating");
            return Err(RatingError::InvalidRating);
        };
        let comment = comment_or_default(submission.comment);

        match self.store.append(rating, comment) {
            Ok(entry) => {
                info!(
                    "event=rating_submit module=service status=ok user_label={}",
                    entry.user
                );
                Ok(entry)
            }
            Err(err) => {
                error!(
                    "event=rating_submit module=service status=error error_code=ratings_storage_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    pub fn list(&self) -> Result<Vec<RatingEntry>, RatingError> {
        Ok(self.store.list_all()?)
    }
}

fn valid_rating(value: Option<&Value>) -> Option<Number> {
    let Some(Value::Number(number)) = value else {
        return None;
    };
    let as_float = number.as_f64()?;
    (MIN_RATING..=MAX_RATING)
        .contains(&as_float)
        .then(|| number.clone())
}

fn comment_or_default(value: Option<Value>) -> String {
    match value {
        Some(Value::String(comment)) if !comment.is_empty() => comment,
        _ => DEFAULT_COMMENT.to_string(),
    }
}
