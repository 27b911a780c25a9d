//! Chart-ready projections of a student's assessment history.
//!
//! # Invariants
//! - Projections are recomputed from the full assessment list on every call.
//! - Series are ordered oldest first; history listings newest first.

pub mod projector;
