//! Score aggregation over sparse rating trees.
//!
//! # Responsibility
//! - Roll indicator ratings up into sub-dimension, dimension and overall scores.
//!
//! # Invariants
//! - Unrated indicators never participate in any average.
//! - Aggregation is total: empty inputs yield `0.0`, never an error.
//! - Results are full precision; rounding is a display concern.

pub mod aggregate;
