pub mod category;
pub mod config;
pub mod engine;
pub mod points;
pub mod results;
pub mod validation;

pub use category::{is_diving, is_relay, EventCategory};
pub use config::{ScoringConfig, ScoringRules};
pub use engine::{calculate_event_points, calculate_scores, round2, tie_points, TeamScore};
pub use points::{PlaceCounts, PointSystem, PointSystems, Preset, MAX_SCORING_PLACE};
pub use results::{consumed_place_count, validate_results};
pub use validation::validate_scoring;
