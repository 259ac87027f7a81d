//! Performance rating module
//!
//! Combines behaviour ratings, post-activity ratings and the best-self score
//! into the player card shown to players and parents.
//!
//! Pipeline: raw samples → grouping (pre-average per metric) → aggregator →
//! player card

pub mod aggregator;
pub mod grouping;
pub mod types;

pub use aggregator::PerformanceAggregator;
pub use grouping::{
    average_activity_ratings, average_behaviour_samples, latest_best_self, normalize_best_self,
};
pub use types::{
    ActivityMetric, ActivityRatingAverages, ActivityRatingSample, BehaviourAverage,
    BehaviourMetric, BehaviourSample, BestSelfSample, PreAveraged,
};

use crate::types::AggregatedPerformance;

/// Group raw samples and aggregate them in one call
pub fn rate_player(
    profile_name: &str,
    avatar_url: Option<&str>,
    behaviour_samples: &[BehaviourSample],
    activity_samples: &[ActivityRatingSample],
    best_self_samples: &[BestSelfSample],
) -> AggregatedPerformance {
    let behaviour = average_behaviour_samples(behaviour_samples);
    let activity = average_activity_ratings(activity_samples);
    let best_self = latest_best_self(best_self_samples);

    PerformanceAggregator::aggregate(
        profile_name,
        avatar_url,
        &behaviour,
        activity.as_ref(),
        best_self,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_rate_player_from_raw_samples() {
        let behaviour = vec![
            BehaviourSample {
                metric_type: "bravery".to_string(),
                score: Some(6.0),
            },
            BehaviourSample {
                metric_type: "bravery".to_string(),
                score: Some(8.0),
            },
        ];
        let activity = vec![ActivityRatingSample {
            confidence: Some(7.0),
            focus: Some(7.0),
            effort: Some(7.0),
            composure: Some(7.0),
            enjoyment: Some(7.0),
        }];
        let best_self = vec![BestSelfSample {
            score: 70.0,
            recorded_at: Utc.with_ymd_and_hms(2024, 2, 1, 18, 0, 0).unwrap(),
        }];

        let card = rate_player("Alex", None, &behaviour, &activity, &best_self);

        assert!(card.has_data);
        assert_eq!(card.stats.len(), 10);
        assert_eq!(card.stats[0].value, Some(7.0));
        // every present value is 7.0 -> 69.3
        assert_eq!(card.overall_rating, 69);
    }

    #[test]
    fn test_rate_player_with_nothing() {
        let card = rate_player("New Player", None, &[], &[], &[]);
        assert!(!card.has_data);
        assert_eq!(card.stats.len(), 4);
    }
}
