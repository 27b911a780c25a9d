//! Core use-case services.
//!
//! # Responsibility
//! - Bind the in-memory student collection to its store, clock and id source.
//! - Keep presentation callers decoupled from storage details.

pub mod collaborators;
pub mod profile_service;
