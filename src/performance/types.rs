//! Score inputs for the performance aggregator
//!
//! Raw samples as stored per player, the pre-averaged forms the aggregator
//! accepts, and the fixed metric sets that decide which rows appear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Behaviour traits rated 0-10 by coaches; always shown on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviourMetric {
    Bravery,
    Energy,
    Resilience,
    Teamwork,
}

impl BehaviourMetric {
    /// Display order on the player card
    pub const ALL: [BehaviourMetric; 4] = [
        BehaviourMetric::Bravery,
        BehaviourMetric::Energy,
        BehaviourMetric::Resilience,
        BehaviourMetric::Teamwork,
    ];

    /// Stored type string
    pub fn key(&self) -> &'static str {
        match self {
            BehaviourMetric::Bravery => "bravery",
            BehaviourMetric::Energy => "energy",
            BehaviourMetric::Resilience => "resilience",
            BehaviourMetric::Teamwork => "teamwork",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BehaviourMetric::Bravery => "Bravery",
            BehaviourMetric::Energy => "Energy",
            BehaviourMetric::Resilience => "Resilience",
            BehaviourMetric::Teamwork => "Teamwork",
        }
    }
}

/// Post-activity self-rating dimensions; shown only when rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityMetric {
    Confidence,
    Focus,
    Effort,
    Composure,
    Enjoyment,
}

impl ActivityMetric {
    /// Display order on the player card
    pub const ALL: [ActivityMetric; 5] = [
        ActivityMetric::Confidence,
        ActivityMetric::Focus,
        ActivityMetric::Effort,
        ActivityMetric::Composure,
        ActivityMetric::Enjoyment,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ActivityMetric::Confidence => "confidence",
            ActivityMetric::Focus => "focus",
            ActivityMetric::Effort => "effort",
            ActivityMetric::Composure => "composure",
            ActivityMetric::Enjoyment => "enjoyment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityMetric::Confidence => "Confidence",
            ActivityMetric::Focus => "Focus",
            ActivityMetric::Effort => "Effort",
            ActivityMetric::Composure => "Composure",
            ActivityMetric::Enjoyment => "Enjoyment",
        }
    }
}

/// Key and label of the best-self stat row
pub const BEST_SELF_KEY: &str = "best_self";
pub const BEST_SELF_LABEL: &str = "Best Self";

/// One raw behaviour rating as recorded after a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourSample {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub score: Option<f64>,
}

/// Mean behaviour score for one metric type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourAverage {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub average_score: Option<f64>,
}

/// One post-activity rating submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityRatingSample {
    pub confidence: Option<f64>,
    pub focus: Option<f64>,
    pub effort: Option<f64>,
    pub composure: Option<f64>,
    pub enjoyment: Option<f64>,
}

impl ActivityRatingSample {
    /// All five dimensions rated
    pub fn is_complete(&self) -> bool {
        ActivityMetric::ALL.iter().all(|m| self.get(*m).is_some())
    }

    pub fn get(&self, metric: ActivityMetric) -> Option<f64> {
        match metric {
            ActivityMetric::Confidence => self.confidence,
            ActivityMetric::Focus => self.focus,
            ActivityMetric::Effort => self.effort,
            ActivityMetric::Composure => self.composure,
            ActivityMetric::Enjoyment => self.enjoyment,
        }
    }
}

/// Mean of each activity-rating dimension across recent complete submissions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRatingAverages {
    pub confidence: Option<f64>,
    pub focus: Option<f64>,
    pub effort: Option<f64>,
    pub composure: Option<f64>,
    pub enjoyment: Option<f64>,
}

impl ActivityRatingAverages {
    pub fn get(&self, metric: ActivityMetric) -> Option<f64> {
        match metric {
            ActivityMetric::Confidence => self.confidence,
            ActivityMetric::Focus => self.focus,
            ActivityMetric::Effort => self.effort,
            ActivityMetric::Composure => self.composure,
            ActivityMetric::Enjoyment => self.enjoyment,
        }
    }

    fn slot(&mut self, metric: ActivityMetric) -> &mut Option<f64> {
        match metric {
            ActivityMetric::Confidence => &mut self.confidence,
            ActivityMetric::Focus => &mut self.focus,
            ActivityMetric::Effort => &mut self.effort,
            ActivityMetric::Composure => &mut self.composure,
            ActivityMetric::Enjoyment => &mut self.enjoyment,
        }
    }

    pub fn set(&mut self, metric: ActivityMetric, value: Option<f64>) {
        *self.slot(metric) = value;
    }
}

/// A best-self self-rating on the 0-100 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestSelfSample {
    pub score: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Marks score inputs as already grouped by metric and averaged.
///
/// The aggregator assumes one row per metric rather than one per sample; this
/// wrapper is how that is enforced. Build it with the grouping functions in
/// [`crate::performance::grouping`], or with [`PreAveraged::from_averages`]
/// when the averages were computed elsewhere (for example by a database query).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PreAveraged<T>(T);

impl<T> PreAveraged<T> {
    /// Wrap values the caller has already averaged per metric
    pub fn from_averages(averages: T) -> Self {
        Self(averages)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}
