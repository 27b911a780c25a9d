//! Average computations for sub-dimensions, dimensions and whole assessments.
//!
//! Each level averages only the children that carry signal: rated indicators
//! for a sub-dimension, non-zero sub-dimension averages for a dimension, and
//! non-zero dimension averages overall.

use crate::model::rating::Rating;
use crate::model::scores::{AssessmentScores, DimensionScores, SubDimensionScores};

/// Mean of the rated indicators; `0.0` when none is rated.
pub fn average_sub_dimension(sub_dimension: &SubDimensionScores<'_>) -> f64 {
    mean_of_signal(
        sub_dimension
            .ratings()
            .filter_map(|(_, rating)| rating_value(rating)),
    )
}

/// Mean of the non-zero sub-dimension averages; `0.0` when all are zero.
pub fn average_dimension(dimension: &DimensionScores<'_>) -> f64 {
    mean_of_signal(
        dimension
            .sub_dimensions()
            .map(|sub_dimension| average_sub_dimension(&sub_dimension)),
    )
}

/// Mean of the non-zero dimension averages; `0.0` when all four are zero.
pub fn average_overall(scores: &AssessmentScores) -> f64 {
    mean_of_signal(
        scores
            .dimensions()
            .map(|dimension| average_dimension(&dimension)),
    )
}

/// Renders a score with one decimal place for display.
///
/// Ties round away from zero (`3.25` -> `3.3`), unlike `{:.1}` which rounds
/// them to even.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", (score * 10.0).round() / 10.0)
}

fn rating_value(rating: Rating) -> Option<f64> {
    rating.stars().map(|stars| f64::from(stars.get()))
}

fn mean_of_signal(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .filter(|value| *value > 0.0)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
