//! Player-card encoder
//!
//! Wraps an [`AggregatedPerformance`] in a versioned payload with producer
//! metadata, ready to hand to the app or store alongside the player record.

use crate::error::CoachError;
use crate::types::AggregatedPerformance;
use crate::{COACH_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current player-card payload version
pub const CARD_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Player-card payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCardPayload {
    pub card_version: String,
    pub producer: CardProducer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<Uuid>,
    pub computed_at_utc: String,
    pub performance: AggregatedPerformance,
}

/// Player-card encoder
pub struct PlayerCardEncoder {
    instance_id: String,
}

impl Default for PlayerCardEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCardEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn encode(
        &self,
        performance: &AggregatedPerformance,
        player_id: Option<Uuid>,
    ) -> PlayerCardPayload {
        PlayerCardPayload {
            card_version: CARD_VERSION.to_string(),
            producer: CardProducer {
                name: PRODUCER_NAME.to_string(),
                version: COACH_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            player_id,
            computed_at_utc: Utc::now().to_rfc3339(),
            performance: performance.clone(),
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        performance: &AggregatedPerformance,
        player_id: Option<Uuid>,
    ) -> Result<String, CoachError> {
        let payload = self.encode(performance, player_id);
        serde_json::to_string_pretty(&payload).map_err(CoachError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::{PerformanceAggregator, PreAveraged};

    fn sample_card() -> AggregatedPerformance {
        PerformanceAggregator::aggregate(
            "Alex",
            Some("https://cdn.example/alex.png"),
            &PreAveraged::from_averages(Vec::new()),
            None,
            Some(7.5),
        )
    }

    #[test]
    fn test_encode_producer_metadata() {
        let encoder = PlayerCardEncoder::with_instance_id("test-instance".to_string());
        let payload = encoder.encode(&sample_card(), None);

        assert_eq!(payload.card_version, CARD_VERSION);
        assert_eq!(payload.producer.name, "mindcoach-core");
        assert_eq!(payload.producer.instance_id, "test-instance");
        assert!(payload.player_id.is_none());
    }

    #[test]
    fn test_encode_to_json_shape() {
        let player_id = Uuid::new_v4();
        let json = PlayerCardEncoder::new()
            .encode_to_json(&sample_card(), Some(player_id))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["player_id"], player_id.to_string());
        assert_eq!(value["performance"]["profile_name"], "Alex");
        assert_eq!(value["performance"]["has_data"], true);
        assert_eq!(value["performance"]["overall_rating"], 74);
        assert_eq!(value["performance"]["stats"].as_array().unwrap().len(), 5);
        assert!(value["performance"]["stats"][0]["value"].is_null());
        assert_eq!(value["performance"]["stats"][4]["category"], "best_self");
    }

    #[test]
    fn test_payload_round_trips() {
        let encoder = PlayerCardEncoder::new();
        let json = encoder.encode_to_json(&sample_card(), None).unwrap();
        let decoded: PlayerCardPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.performance, sample_card());
    }
}
