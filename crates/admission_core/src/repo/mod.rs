//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the admission data access contract.
//! - Keep rating entries in their JSON file.
//! - Isolate SQLite query details from the submission service.
//!
//! # Invariants
//! - Only insert and full-scan read exist; rows are never updated or deleted.
//! - Read paths reject undecodable rows instead of masking them.

pub mod admission_repo;
pub mod admission_store;
pub mod rating_store;
