//! Trend series, radar snapshots and history listings.

use crate::model::assessment::Assessment;
use crate::model::calendar::DayPolicy;
use crate::model::scores::AssessmentScores;
use crate::model::taxonomy::{DimensionKey, TaxonomyNode};
use crate::repo::assessment_repo::{latest_assessment, newest_first, recent_assessments};
use crate::scoring::aggregate::{average_dimension, average_overall, average_sub_dimension};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// Upper bound of every radar axis.
pub const RADAR_FULL_MARK: f64 = 5.0;

/// The four dimension averages of one assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionAverages {
    values: [f64; 4],
}

impl DimensionAverages {
    pub fn of(scores: &AssessmentScores) -> Self {
        Self {
            values: DimensionKey::ALL
                .map(|dimension| average_dimension(&scores.dimension(dimension))),
        }
    }

    pub fn get(&self, dimension: DimensionKey) -> f64 {
        self.values[dimension as usize]
    }

    /// `(dimension, average)` pairs in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (DimensionKey, f64)> + '_ {
        DimensionKey::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }
}

/// One point of the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub dimensions: DimensionAverages,
    pub overall: f64,
}

impl TrendPoint {
    pub fn of(assessment: &Assessment) -> Self {
        Self {
            date: assessment.date,
            dimensions: DimensionAverages::of(&assessment.scores),
            overall: average_overall(&assessment.scores),
        }
    }
}

/// One labelled axis value of a radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub node: TaxonomyNode,
    pub label: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

impl RadarPoint {
    fn new(node: TaxonomyNode, value: f64) -> Self {
        Self {
            node,
            label: node.label(),
            value,
            full_mark: RADAR_FULL_MARK,
        }
    }
}

/// The `limit` most recent assessments as a chronological series, oldest first.
pub fn recent_series(assessments: &[Assessment], limit: usize) -> Vec<TrendPoint> {
    let mut recent = recent_assessments(assessments, limit);
    recent.reverse();
    recent.into_iter().map(TrendPoint::of).collect()
}

/// Dimension averages of the most recent assessment, one point per dimension.
///
/// Empty when there are no assessments.
pub fn latest_radar_snapshot(assessments: &[Assessment]) -> Vec<RadarPoint> {
    let Some(latest) = latest_assessment(assessments) else {
        return Vec::new();
    };
    DimensionAverages::of(&latest.scores)
        .iter()
        .map(|(dimension, value)| RadarPoint::new(TaxonomyNode::Dimension(dimension), value))
        .collect()
}

/// Sub-dimension averages of one dimension of `assessment`.
pub fn dimension_radar(assessment: &Assessment, dimension: DimensionKey) -> Vec<RadarPoint> {
    assessment
        .scores
        .dimension(dimension)
        .sub_dimensions()
        .map(|sub_dimension| {
            RadarPoint::new(
                TaxonomyNode::SubDimension(sub_dimension.key()),
                average_sub_dimension(&sub_dimension),
            )
        })
        .collect()
}

/// History listing, newest first, with one entry per calendar date.
///
/// On a date with several records the first one in newest-first order is kept.
pub fn deduplicated_history(assessments: &[Assessment], policy: DayPolicy) -> Vec<&Assessment> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    newest_first(assessments)
        .into_iter()
        .filter(|assessment| seen.insert(policy.calendar_day(assessment.date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{deduplicated_history, dimension_radar, latest_radar_snapshot, recent_series};
    use crate::model::assessment::Assessment;
    use crate::model::calendar::DayPolicy;
    use crate::model::rating::Rating;
    use crate::model::taxonomy::{DimensionKey, IndicatorKey, SubDimensionKey, TaxonomyNode};
    use chrono::{Datelike, TimeZone, Utc};
    use uuid::Uuid;

    fn assessment(n: u128, month: u32, day: u32, hour: u32) -> Assessment {
        Assessment::empty(
            Uuid::from_u128(n),
            Uuid::from_u128(500),
            Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn recent_series_keeps_the_latest_window_oldest_first() {
        // Inserted out of order on purpose.
        let list: Vec<Assessment> = [4, 1, 6, 2, 5, 3]
            .into_iter()
            .map(|month| assessment(u128::from(month), month, 1, 10))
            .collect();

        let months: Vec<u32> = recent_series(&list, 4)
            .iter()
            .map(|point| point.date.month())
            .collect();
        assert_eq!(months, vec![3, 4, 5, 6]);
    }

    #[test]
    fn series_points_carry_dimension_and_overall_averages() {
        let mut only = assessment(1, 2, 2, 8);
        only.scores
            .set_rating(IndicatorKey::TaskQuality, Rating::from_value(4).unwrap());

        let series = recent_series(std::slice::from_ref(&only), 4);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].dimensions.get(DimensionKey::ExecutionAbility), 4.0);
        assert_eq!(series[0].dimensions.get(DimensionKey::LearningAbility), 0.0);
        assert_eq!(series[0].overall, 4.0);
    }

    #[test]
    fn radar_snapshot_uses_latest_assessment() {
        let mut older = assessment(1, 1, 5, 9);
        older
            .scores
            .set_rating(IndicatorKey::FocusDuration, Rating::from_value(1).unwrap());
        let mut newer = assessment(2, 2, 5, 9);
        newer
            .scores
            .set_rating(IndicatorKey::FocusDuration, Rating::from_value(5).unwrap());

        let snapshot = latest_radar_snapshot(&[older, newer]);
        assert_eq!(snapshot.len(), 4);
        assert_eq!(
            snapshot[1].node,
            TaxonomyNode::Dimension(DimensionKey::TimeEfficiency)
        );
        assert_eq!(snapshot[1].label, "时间利用效率");
        assert_eq!(snapshot[1].value, 5.0);
        assert!(latest_radar_snapshot(&[]).is_empty());
    }

    #[test]
    fn dimension_radar_lists_sub_dimension_averages() {
        let mut item = assessment(1, 1, 5, 9);
        item.scores
            .set_rating(IndicatorKey::PomodoroUse, Rating::from_value(3).unwrap());

        let points = dimension_radar(&item, DimensionKey::LearningHabits);
        let values: Vec<(TaxonomyNode, f64)> =
            points.iter().map(|point| (point.node, point.value)).collect();
        assert_eq!(
            values,
            vec![
                (TaxonomyNode::SubDimension(SubDimensionKey::ProactiveHabits), 0.0),
                (TaxonomyNode::SubDimension(SubDimensionKey::ToolUseHabits), 3.0),
                (TaxonomyNode::SubDimension(SubDimensionKey::SystematicLearning), 0.0),
            ]
        );
    }

    #[test]
    fn history_collapses_same_day_records() {
        let list = vec![
            assessment(1, 5, 1, 8),
            assessment(2, 5, 2, 8),
            assessment(3, 5, 1, 20),
        ];

        let ids: Vec<u128> = deduplicated_history(&list, DayPolicy::Utc)
            .into_iter()
            .map(|item| item.id.as_u128())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
