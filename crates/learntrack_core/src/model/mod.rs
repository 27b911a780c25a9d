//! Domain model for student competency tracking.
//!
//! # Responsibility
//! - Define the closed competency taxonomy and typed score tree.
//! - Define student and assessment records plus their wire format.
//!
//! # Invariants
//! - Unrated indicators are `Rating::Unrated`, never a numeric zero score.
//! - Score trees are indexed by taxonomy keys, never by ad hoc strings.

pub mod assessment;
pub mod calendar;
pub mod rating;
pub mod scores;
pub mod student;
pub mod taxonomy;
