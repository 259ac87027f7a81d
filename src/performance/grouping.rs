//! Pre-averaging of raw score samples
//!
//! Groups what the data store returns (one row per rating submission) into
//! the one-row-per-metric form the aggregator expects.

use crate::performance::types::{
    ActivityMetric, ActivityRatingAverages, ActivityRatingSample, BehaviourAverage,
    BehaviourSample, BestSelfSample, PreAveraged,
};

/// Group behaviour samples by type (first-seen order) and average each group.
///
/// Non-finite or missing scores are ignored; a type with no usable score keeps
/// its row with `average_score = None`.
pub fn average_behaviour_samples(samples: &[BehaviourSample]) -> PreAveraged<Vec<BehaviourAverage>> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for sample in samples {
        let index = match groups.iter().position(|(t, _)| *t == sample.metric_type) {
            Some(index) => index,
            None => {
                groups.push((sample.metric_type.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(score) = sample.score.filter(|s| s.is_finite()) {
            groups[index].1.push(score);
        }
    }

    PreAveraged::from_averages(
        groups
            .into_iter()
            .map(|(metric_type, scores)| BehaviourAverage {
                metric_type,
                average_score: mean(&scores),
            })
            .collect(),
    )
}

/// Average activity ratings over complete submissions only.
///
/// A submission missing any of its five dimensions is excluded entirely.
/// Returns `None` when no complete submission exists.
pub fn average_activity_ratings(
    samples: &[ActivityRatingSample],
) -> Option<PreAveraged<ActivityRatingAverages>> {
    let complete: Vec<&ActivityRatingSample> = samples.iter().filter(|s| s.is_complete()).collect();
    if complete.is_empty() {
        return None;
    }

    let mut averages = ActivityRatingAverages::default();
    for metric in ActivityMetric::ALL {
        let values: Vec<f64> = complete
            .iter()
            .filter_map(|s| s.get(metric))
            .filter(|v| v.is_finite())
            .collect();
        averages.set(metric, mean(&values));
    }

    Some(PreAveraged::from_averages(averages))
}

/// Map a 0-100 best-self rating onto the 0-10 card scale
pub fn normalize_best_self(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    Some((raw / 10.0).clamp(0.0, 10.0))
}

/// Normalized score of the most recent best-self rating
pub fn latest_best_self(samples: &[BestSelfSample]) -> Option<f64> {
    samples
        .iter()
        .max_by_key(|s| s.recorded_at)
        .and_then(|s| normalize_best_self(s.score))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn behaviour(metric_type: &str, score: Option<f64>) -> BehaviourSample {
        BehaviourSample {
            metric_type: metric_type.to_string(),
            score,
        }
    }

    fn rating(values: [Option<f64>; 5]) -> ActivityRatingSample {
        ActivityRatingSample {
            confidence: values[0],
            focus: values[1],
            effort: values[2],
            composure: values[3],
            enjoyment: values[4],
        }
    }

    #[test]
    fn test_behaviour_grouped_in_first_seen_order() {
        let averaged = average_behaviour_samples(&[
            behaviour("energy", Some(6.0)),
            behaviour("bravery", Some(8.0)),
            behaviour("energy", Some(8.0)),
            behaviour("bravery", None),
        ]);

        assert_eq!(
            averaged.into_inner(),
            vec![
                BehaviourAverage {
                    metric_type: "energy".to_string(),
                    average_score: Some(7.0),
                },
                BehaviourAverage {
                    metric_type: "bravery".to_string(),
                    average_score: Some(8.0),
                },
            ]
        );
    }

    #[test]
    fn test_behaviour_without_scores_keeps_row() {
        let averaged = average_behaviour_samples(&[behaviour("teamwork", None)]);
        assert_eq!(averaged.get()[0].average_score, None);
    }

    #[test]
    fn test_activity_partial_samples_excluded() {
        let averaged = average_activity_ratings(&[
            rating([Some(6.0), Some(6.0), Some(6.0), Some(6.0), Some(6.0)]),
            rating([Some(8.0), Some(8.0), Some(8.0), Some(8.0), Some(8.0)]),
            rating([Some(0.0), None, Some(0.0), Some(0.0), Some(0.0)]),
        ])
        .unwrap();

        assert_eq!(averaged.get().confidence, Some(7.0));
        assert_eq!(averaged.get().focus, Some(7.0));
        assert_eq!(averaged.get().enjoyment, Some(7.0));
    }

    #[test]
    fn test_activity_no_complete_samples() {
        assert!(average_activity_ratings(&[]).is_none());
        assert!(average_activity_ratings(&[rating([Some(5.0), None, None, None, None])]).is_none());
    }

    #[test]
    fn test_normalize_best_self() {
        assert_eq!(normalize_best_self(85.0), Some(8.5));
        assert_eq!(normalize_best_self(140.0), Some(10.0));
        assert_eq!(normalize_best_self(-5.0), Some(0.0));
        assert_eq!(normalize_best_self(f64::NAN), None);
    }

    #[test]
    fn test_latest_best_self_uses_most_recent() {
        let samples = vec![
            BestSelfSample {
                score: 90.0,
                recorded_at: Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
            },
            BestSelfSample {
                score: 40.0,
                recorded_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            },
        ];
        assert_eq!(latest_best_self(&samples), Some(9.0));
        assert_eq!(latest_best_self(&[]), None);
    }
}
