//! Strongly typed score tree of one assessment.
//!
//! # Responsibility
//! - Store one `Rating` per taxonomy indicator.
//! - Expose dimension / sub-dimension views through typed accessors.
//! - Validate raw edits coming from the presentation layer.
//! - Keep the nested camelCase wire shape
//!   `{ dimension: { subDimension: { indicator: 0..=5 } } }`.
//!
//! # Invariants
//! - Every taxonomy indicator always has exactly one rating slot.
//! - A rejected edit leaves the tree unchanged.

use crate::model::rating::{Rating, RatingError, Stars};
use crate::model::taxonomy::{
    DimensionKey, IndicatorKey, SubDimensionKey, Taxonomy, TaxonomyError, INDICATOR_COUNT,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected raw score edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEditError {
    Taxonomy(TaxonomyError),
    Rating(RatingError),
}

impl Display for ScoreEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Taxonomy(err) => write!(f, "{err}"),
            Self::Rating(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScoreEditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Taxonomy(err) => Some(err),
            Self::Rating(err) => Some(err),
        }
    }
}

impl From<TaxonomyError> for ScoreEditError {
    fn from(value: TaxonomyError) -> Self {
        Self::Taxonomy(value)
    }
}

impl From<RatingError> for ScoreEditError {
    fn from(value: RatingError) -> Self {
        Self::Rating(value)
    }
}

/// Ratings for all four dimensions of one assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentScores {
    ratings: [Rating; INDICATOR_COUNT],
}

impl Default for AssessmentScores {
    fn default() -> Self {
        Self {
            ratings: [Rating::Unrated; INDICATOR_COUNT],
        }
    }
}

/// Borrowed view of one dimension.
#[derive(Debug, Clone, Copy)]
pub struct DimensionScores<'a> {
    key: DimensionKey,
    scores: &'a AssessmentScores,
}

/// Borrowed view of one sub-dimension.
#[derive(Debug, Clone, Copy)]
pub struct SubDimensionScores<'a> {
    key: SubDimensionKey,
    scores: &'a AssessmentScores,
}

/// Fully qualified location of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPath {
    pub dimension: DimensionKey,
    pub sub_dimension: SubDimensionKey,
    pub indicator: IndicatorKey,
}

impl IndicatorPath {
    pub fn of(indicator: IndicatorKey) -> Self {
        Self {
            dimension: indicator.dimension(),
            sub_dimension: indicator.sub_dimension(),
            indicator,
        }
    }

    /// Combined display label, e.g. `学习能力 - 题目掌握度 - 1⭐题正确率`.
    pub fn label(&self) -> String {
        format!(
            "{} - {} - {}",
            self.dimension.label(),
            self.sub_dimension.label(),
            self.indicator.label()
        )
    }
}

impl Display for IndicatorPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.dimension, self.sub_dimension, self.indicator
        )
    }
}

/// How many indicators carry a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationProgress {
    pub rated: usize,
    pub total: usize,
}

impl EvaluationProgress {
    pub fn is_complete(&self) -> bool {
        self.rated == self.total
    }
}

impl AssessmentScores {
    /// Creates a tree with every indicator unrated.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rating(&self, indicator: IndicatorKey) -> Rating {
        self.ratings[indicator.slot()]
    }

    pub fn set_rating(&mut self, indicator: IndicatorKey, rating: Rating) {
        self.ratings[indicator.slot()] = rating;
    }

    /// Applies a rating click; picking the current value clears it.
    pub fn toggle(&mut self, indicator: IndicatorKey, stars: Stars) -> Rating {
        let next = self.rating(indicator).toggled(stars);
        self.set_rating(indicator, next);
        next
    }

    /// Applies a raw edit from the presentation layer.
    ///
    /// # Errors
    /// - `Taxonomy(UnknownKey | MisplacedKey)` when the path is not a valid
    ///   taxonomy path.
    /// - `Rating(InvalidRating)` when `value` is outside `0..=5`.
    ///
    /// The tree is untouched on error.
    pub fn apply_edit(
        &mut self,
        dimension_key: &str,
        sub_dimension_key: &str,
        indicator_key: &str,
        value: i64,
    ) -> Result<IndicatorKey, ScoreEditError> {
        let indicator =
            Taxonomy::global().resolve_path(dimension_key, sub_dimension_key, indicator_key)?;
        let rating = Rating::from_value(value)?;
        self.set_rating(indicator, rating);
        Ok(indicator)
    }

    pub fn dimension(&self, key: DimensionKey) -> DimensionScores<'_> {
        DimensionScores { key, scores: self }
    }

    pub fn sub_dimension(&self, key: SubDimensionKey) -> SubDimensionScores<'_> {
        SubDimensionScores { key, scores: self }
    }

    /// Views of all four dimensions in taxonomy order.
    pub fn dimensions(&self) -> impl Iterator<Item = DimensionScores<'_>> {
        DimensionKey::ALL.into_iter().map(|key| self.dimension(key))
    }

    /// Indicators still unrated, in taxonomy order.
    pub fn unevaluated_indicators(&self) -> Vec<IndicatorPath> {
        IndicatorKey::ALL
            .into_iter()
            .filter(|indicator| !self.rating(*indicator).is_rated())
            .map(IndicatorPath::of)
            .collect()
    }

    pub fn progress(&self) -> EvaluationProgress {
        EvaluationProgress {
            rated: self.ratings.iter().filter(|rating| rating.is_rated()).count(),
            total: INDICATOR_COUNT,
        }
    }
}

impl<'a> DimensionScores<'a> {
    pub fn key(&self) -> DimensionKey {
        self.key
    }

    pub fn sub_dimensions(&self) -> impl Iterator<Item = SubDimensionScores<'a>> + 'a {
        let scores = self.scores;
        self.key
            .sub_dimensions()
            .iter()
            .map(move |key| scores.sub_dimension(*key))
    }
}

impl<'a> SubDimensionScores<'a> {
    pub fn key(&self) -> SubDimensionKey {
        self.key
    }

    /// `(indicator, rating)` pairs in taxonomy order.
    pub fn ratings(&self) -> impl Iterator<Item = (IndicatorKey, Rating)> + 'a {
        let scores = self.scores;
        self.key
            .indicators()
            .iter()
            .map(move |indicator| (*indicator, scores.rating(*indicator)))
    }
}

impl Serialize for AssessmentScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DimensionKey::ALL.len()))?;
        for dimension in self.dimensions() {
            let sub_dimensions: BTreeMap<&str, BTreeMap<&str, u8>> = dimension
                .sub_dimensions()
                .map(|sub_dimension| {
                    let indicators = sub_dimension
                        .ratings()
                        .map(|(indicator, rating)| (indicator.key(), rating.value()))
                        .collect();
                    (sub_dimension.key().key(), indicators)
                })
                .collect();
            map.serialize_entry(dimension.key().key(), &sub_dimensions)?;
        }
        map.end()
    }
}

type WireScores = BTreeMap<String, BTreeMap<String, BTreeMap<String, i64>>>;

impl<'de> Deserialize<'de> for AssessmentScores {
    /// Missing indicators decode as unrated; unknown or misplaced keys and
    /// out-of-range values are rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireScores::deserialize(deserializer)?;
        let mut scores = AssessmentScores::empty();
        for (dimension_key, sub_dimensions) in &wire {
            for (sub_dimension_key, indicators) in sub_dimensions {
                for (indicator_key, value) in indicators {
                    scores
                        .apply_edit(dimension_key, sub_dimension_key, indicator_key, *value)
                        .map_err(serde::de::Error::custom)?;
                }
            }
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssessmentScores, ScoreEditError};
    use crate::model::rating::{Rating, RatingError, Stars};
    use crate::model::taxonomy::{IndicatorKey, SubDimensionKey, TaxonomyError};

    #[test]
    fn rejected_edits_do_not_change_the_tree() {
        let mut scores = AssessmentScores::empty();
        scores
            .apply_edit("learningAbility", "problemMastery", "oneStar", 4)
            .expect("valid edit");

        let err = scores
            .apply_edit("learningAbility", "problemMastery", "oneStar", 7)
            .expect_err("out of range");
        assert_eq!(err, ScoreEditError::Rating(RatingError::InvalidRating(7)));

        let err = scores
            .apply_edit("learningAbility", "problemMastery", "sevenStar", 2)
            .expect_err("unknown indicator");
        assert!(matches!(err, ScoreEditError::Taxonomy(TaxonomyError::UnknownKey(_))));

        assert_eq!(scores.rating(IndicatorKey::OneStar).value(), 4);
        assert_eq!(scores.progress().rated, 1);
    }

    #[test]
    fn sub_dimension_view_follows_taxonomy_order() {
        let mut scores = AssessmentScores::empty();
        scores.set_rating(IndicatorKey::PomodoroEfficiency, Rating::from_value(2).unwrap());

        let pairs: Vec<(IndicatorKey, u8)> = scores
            .sub_dimension(SubDimensionKey::MistakeOvercomingEfficiency)
            .ratings()
            .map(|(indicator, rating)| (indicator, rating.value()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (IndicatorKey::SelfLearningSpeed, 0),
                (IndicatorKey::PomodoroEfficiency, 2),
            ]
        );
    }

    #[test]
    fn unevaluated_listing_shrinks_as_ratings_arrive() {
        let mut scores = AssessmentScores::empty();
        assert_eq!(scores.unevaluated_indicators().len(), 44);

        scores.toggle(IndicatorKey::GoalClarity, Stars::new(3).unwrap());
        let remaining = scores.unevaluated_indicators();
        assert_eq!(remaining.len(), 43);
        assert!(remaining
            .iter()
            .all(|path| path.indicator != IndicatorKey::GoalClarity));
        assert_eq!(
            remaining[0].to_string(),
            "learningAbility.problemMastery.oneStar"
        );

        scores.toggle(IndicatorKey::GoalClarity, Stars::new(3).unwrap());
        assert_eq!(scores.unevaluated_indicators().len(), 44);
    }

    #[test]
    fn wire_shape_is_nested_camel_case() {
        let mut scores = AssessmentScores::empty();
        scores.set_rating(IndicatorKey::TaskQuality, Rating::from_value(5).unwrap());

        let value = serde_json::to_value(&scores).expect("scores serialize");
        assert_eq!(value["executionAbility"]["taskExecution"]["taskQuality"], 5);
        assert_eq!(value["learningAbility"]["problemMastery"]["oneStar"], 0);

        let decoded: AssessmentScores = serde_json::from_value(value).expect("scores decode");
        assert_eq!(decoded, scores);
    }

    #[test]
    fn decoding_fills_missing_and_rejects_misplaced_keys() {
        let partial = r#"{"learningHabits":{"toolUseHabits":{"pomodoroUse":4}}}"#;
        let decoded: AssessmentScores = serde_json::from_str(partial).expect("partial decodes");
        assert_eq!(decoded.rating(IndicatorKey::PomodoroUse).value(), 4);
        assert_eq!(decoded.progress().rated, 1);

        let misplaced = r#"{"learningHabits":{"taskExecution":{"taskQuality":4}}}"#;
        assert!(serde_json::from_str::<AssessmentScores>(misplaced).is_err());
    }
}
