//! Core domain logic for LearnTrack.
//! This crate is the single source of truth for assessment invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scoring;
pub mod service;
pub mod trend;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::assessment::{Assessment, AssessmentId, Feedback, StudentId};
pub use model::calendar::DayPolicy;
pub use model::rating::{Rating, RatingError, Stars};
pub use model::scores::{AssessmentScores, EvaluationProgress, IndicatorPath, ScoreEditError};
pub use model::student::Student;
pub use model::taxonomy::{
    DimensionKey, IndicatorKey, SubDimensionKey, Taxonomy, TaxonomyError, TaxonomyNode,
};
pub use repo::assessment_repo::{RepoError, RepoResult, UpsertAction, UpsertOutcome};
pub use repo::student_store::{SqliteStudentStore, StoreError, StudentStore};
pub use scoring::aggregate::{average_dimension, average_overall, average_sub_dimension, format_score};
pub use service::collaborators::{Clock, IdGenerator, SystemClock, UuidV4Generator};
pub use service::profile_service::{ProfileService, ProfileServiceError, ServiceResult};
pub use trend::projector::{
    deduplicated_history, dimension_radar, latest_radar_snapshot, recent_series, RadarPoint,
    TrendPoint,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
