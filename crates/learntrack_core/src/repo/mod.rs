//! Repository layer: student collection operations and persistence.
//!
//! # Responsibility
//! - Enforce the one-assessment-per-calendar-day rule on write.
//! - Expose chronological assessment queries.
//! - Isolate the backing key-value store behind `StudentStore`.
//!
//! # Invariants
//! - Collection operations are pure over in-memory data; persistence happens
//!   only through `StudentStore::save`.
//! - Repository APIs return semantic errors (`StudentNotFound`) separately from
//!   storage transport errors.

pub mod assessment_repo;
pub mod student_store;
