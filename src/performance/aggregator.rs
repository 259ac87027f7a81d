//! Player-card aggregation
//!
//! Merges the three independently fetched score families into one ordered
//! list of stat rows and a single 0-99 overall rating.
//!
//! Row policy:
//! - Behaviour metrics always produce a row, with `None` for "no data"
//! - Activity-rating metrics produce a row only when a value exists
//! - Best-self produces one row only when a score exists

use crate::performance::types::{
    ActivityMetric, ActivityRatingAverages, BehaviourAverage, BehaviourMetric, PreAveraged,
    BEST_SELF_KEY, BEST_SELF_LABEL,
};
use crate::types::{AggregatedPerformance, StatCategory, StatRow};
use tracing::debug;

/// Maps the 0-10 mean onto the 0-99 card scale
const RATING_SCALE: f64 = 9.9;

/// Highest displayable overall rating
const MAX_RATING: f64 = 99.0;

/// Stateless aggregator for player-card ratings
pub struct PerformanceAggregator;

impl PerformanceAggregator {
    /// Build the player card for one profile.
    ///
    /// Rows are emitted (and summed) in a fixed order: behaviour metrics,
    /// then activity-rating metrics, then best-self, so identical inputs
    /// always give identical output.
    pub fn aggregate(
        profile_name: &str,
        avatar_url: Option<&str>,
        behaviour: &PreAveraged<Vec<BehaviourAverage>>,
        activity: Option<&PreAveraged<ActivityRatingAverages>>,
        best_self: Option<f64>,
    ) -> AggregatedPerformance {
        let mut stats = behaviour_rows(behaviour.get());

        if let Some(activity) = activity {
            stats.extend(activity_rows(activity.get()));
        }

        if let Some(score) = best_self.filter(|s| s.is_finite()) {
            stats.push(StatRow {
                key: BEST_SELF_KEY.to_string(),
                label: BEST_SELF_LABEL.to_string(),
                category: StatCategory::BestSelf,
                value: Some(score),
            });
        }

        let (overall_rating, has_data) = overall_rating(&stats);

        debug!(
            profile = profile_name,
            rows = stats.len(),
            overall_rating,
            has_data,
            "aggregated performance"
        );

        AggregatedPerformance {
            profile_name: profile_name.to_string(),
            avatar_url: avatar_url.map(str::to_string),
            overall_rating,
            has_data,
            stats,
        }
    }
}

/// One row per fixed behaviour metric, present or not
fn behaviour_rows(averages: &[BehaviourAverage]) -> Vec<StatRow> {
    BehaviourMetric::ALL
        .iter()
        .map(|metric| {
            let value = averages
                .iter()
                .find(|a| a.metric_type == metric.key())
                .and_then(|a| a.average_score)
                .filter(|v| v.is_finite());

            StatRow {
                key: metric.key().to_string(),
                label: metric.label().to_string(),
                category: StatCategory::Behaviour,
                value,
            }
        })
        .collect()
}

/// Rows only for rated activity dimensions
fn activity_rows(averages: &ActivityRatingAverages) -> Vec<StatRow> {
    ActivityMetric::ALL
        .iter()
        .filter_map(|metric| {
            averages
                .get(*metric)
                .filter(|v| v.is_finite())
                .map(|value| StatRow {
                    key: metric.key().to_string(),
                    label: metric.label().to_string(),
                    category: StatCategory::ActivityRating,
                    value: Some(value),
                })
        })
        .collect()
}

/// Mean of all present values scaled to 0..=99; `(0, false)` without data
fn overall_rating(stats: &[StatRow]) -> (u8, bool) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in stats.iter().filter_map(|s| s.value) {
        sum += value;
        count += 1;
    }

    if count == 0 {
        return (0, false);
    }

    let mean = sum / count as f64;
    let rating = (mean * RATING_SCALE).round().clamp(0.0, MAX_RATING);
    (rating as u8, true)
}
