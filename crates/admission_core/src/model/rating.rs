//! Rating entry model.
//!
//! # Invariants
//! - `user` is `User <n>` where `n` is the entry's 1-based position at the
//!   time it was appended.
//! - `rating` keeps the number exactly as submitted (`50` stays `50`).

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Comment stored when a submission carries none.
pub const DEFAULT_COMMENT: &str = "No comment provided.";

/// One stored rating submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub user: String,
    pub rating: Number,
    pub comment: String,
}

/// Display label for the entry appended after `existing` entries.
pub fn user_label(existing: usize) -> String {
    format!("User {}", existing + 1)
}
