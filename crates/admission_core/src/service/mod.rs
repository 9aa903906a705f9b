//! Admission use-case services.
//!
//! # Responsibility
//! - Orchestrate fee calculation, photo storage and persistence.
//! - Validate rating submissions before they are appended.
//! - Keep the HTTP layer decoupled from storage details.

pub mod admission_service;
pub mod rating_service;
