//! Admission domain model.
//!
//! # Responsibility
//! - Define the persisted admission record and its insert-time shape.
//! - Define the rating entry kept in the ratings file.
//!
//! # Invariants
//! - Records are append-only: created once, never updated or deleted.

pub mod admission;
pub mod rating;
