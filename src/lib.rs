//! Mindcoach Core - schedule interpretation and player-card ratings
//!
//! Two stateless transforms sit at the centre of the crate:
//!
//! - **Schedule**: turns a loosely structured weekly schedule (JSON object, JSON
//!   array or free text) into ordered [`ScheduleEntry`] values, and can pick out
//!   today's entries or attach calendar dates for a given week.
//! - **Performance**: merges pre-averaged behaviour ratings, post-activity
//!   ratings and a best-self score into one [`AggregatedPerformance`] with a
//!   0-99 overall rating.
//!
//! Around them sit the caller-side grouping helpers, the player-card encoder,
//! and the maintenance-mode configuration with its route guard.

pub mod config;
pub mod encoder;
pub mod error;
pub mod guard;
pub mod performance;
pub mod schedule;
pub mod types;

pub use config::AppConfig;
pub use encoder::PlayerCardEncoder;
pub use error::CoachError;
pub use guard::{RouteDecision, RouteGuard};
pub use performance::{PerformanceAggregator, PreAveraged};
pub use schedule::ScheduleInterpreter;
pub use types::{AggregatedPerformance, Day, ScheduleEntry, StatCategory, StatRow};

/// Crate version embedded in all player-card payloads
pub const COACH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for player-card payloads
pub const PRODUCER_NAME: &str = "mindcoach-core";
