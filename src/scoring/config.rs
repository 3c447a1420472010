use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::points::{PlaceCounts, PointSystem, PointSystems, Preset};

/// Main scoring configuration.
///
/// Starts from a named preset; any place count or point table given here replaces
/// the preset's value for that category.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   preset: dual
///   relay_places: 3
///   team_place_limit: true
///   relay_points: {1: 8, 2: 4, 3: 2}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Preset name: "dual", "championship" or "championship-16" (default: dual)
    #[serde(default)]
    pub preset: Option<String>,

    /// Number of scoring places in individual events
    #[serde(default)]
    pub individual_places: Option<u32>,

    /// Number of scoring places in relays
    #[serde(default)]
    pub relay_places: Option<u32>,

    /// Number of scoring places in diving
    #[serde(default)]
    pub diving_places: Option<u32>,

    /// Stop one team from taking every scoring place in a relay
    #[serde(default)]
    pub team_place_limit: Option<bool>,

    #[serde(default)]
    pub individual_points: Option<PointSystem>,

    #[serde(default)]
    pub relay_points: Option<PointSystem>,

    #[serde(default)]
    pub diving_points: Option<PointSystem>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let preset = Preset::Dual;
        let counts = preset.place_counts();
        Self {
            preset: Some(preset.name().to_string()),
            individual_places: Some(counts.individual),
            relay_places: Some(counts.relay),
            diving_places: Some(counts.diving),
            team_place_limit: Some(true),
            individual_points: None,
            relay_points: None,
            diving_points: None,
        }
    }
}

/// Fully resolved rules handed to the engine on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRules {
    pub point_systems: PointSystems,
    pub place_counts: PlaceCounts,
    pub team_place_limit: bool,
}

impl ScoringConfig {
    /// Fill unset fields from the preset. Fails only on an unknown preset name;
    /// range checks live in `validate_scoring`.
    pub fn resolve(&self) -> Result<ScoringRules> {
        let preset = match self.preset.as_deref() {
            Some(name) => Preset::parse(name)?,
            None => Preset::Dual,
        };
        let base_points = preset.point_systems();
        let base_counts = preset.place_counts();

        Ok(ScoringRules {
            point_systems: PointSystems {
                individual: self.individual_points.clone().unwrap_or(base_points.individual),
                relay: self.relay_points.clone().unwrap_or(base_points.relay),
                diving: self.diving_points.clone().unwrap_or(base_points.diving),
            },
            place_counts: PlaceCounts {
                individual: self.individual_places.unwrap_or(base_counts.individual),
                relay: self.relay_places.unwrap_or(base_counts.relay),
                diving: self.diving_places.unwrap_or(base_counts.diving),
            },
            team_place_limit: self.team_place_limit.unwrap_or(true),
        })
    }
}
