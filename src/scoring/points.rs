use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::EventCategory;

/// Highest place a point table may list.
pub const MAX_SCORING_PLACE: u32 = 20;

/// Place -> points table. Places that are not listed score zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PointSystem(BTreeMap<u32, u32>);

impl PointSystem {
    pub fn new(table: BTreeMap<u32, u32>) -> Self {
        Self(table)
    }

    /// Build a table from points listed for places 1, 2, 3, ...
    pub fn from_descending(points: &[u32]) -> Self {
        Self(
            points
                .iter()
                .enumerate()
                .map(|(i, &p)| (i as u32 + 1, p))
                .collect(),
        )
    }

    pub fn points(&self, place: u32) -> u32 {
        self.0.get(&place).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn places(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(&place, &points)| (place, points))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSystems {
    pub individual: PointSystem,
    pub relay: PointSystem,
    pub diving: PointSystem,
}

impl PointSystems {
    pub fn for_category(&self, category: EventCategory) -> &PointSystem {
        match category {
            EventCategory::Individual => &self.individual,
            EventCategory::Relay => &self.relay,
            EventCategory::Diving => &self.diving,
        }
    }
}

/// How many places score in each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceCounts {
    pub individual: u32,
    pub relay: u32,
    pub diving: u32,
}

impl PlaceCounts {
    pub fn for_category(&self, category: EventCategory) -> u32 {
        match category {
            EventCategory::Individual => self.individual,
            EventCategory::Relay => self.relay,
            EventCategory::Diving => self.diving,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Dual,
    Championship,
    Championship16,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Dual, Preset::Championship, Preset::Championship16];

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "dual" => Ok(Preset::Dual),
            "championship" => Ok(Preset::Championship),
            "championship-16" => Ok(Preset::Championship16),
            other => bail!(
                "Unknown preset '{}' (expected dual, championship or championship-16)",
                other
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Dual => "dual",
            Preset::Championship => "championship",
            Preset::Championship16 => "championship-16",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Dual => "Dual meet: 5 individual/diving places, 3 relay places",
            Preset::Championship => "Championship: 8 scoring places, relays double",
            Preset::Championship16 => "Championship finals: 16 scoring places, relays double",
        }
    }

    pub fn point_systems(&self) -> PointSystems {
        match self {
            Preset::Dual => PointSystems {
                individual: PointSystem::from_descending(&[6, 4, 3, 2, 1]),
                relay: PointSystem::from_descending(&[8, 4, 2]),
                diving: PointSystem::from_descending(&[6, 4, 3, 2, 1]),
            },
            Preset::Championship => PointSystems {
                individual: PointSystem::from_descending(&[10, 8, 6, 5, 4, 3, 2, 1]),
                relay: PointSystem::from_descending(&[20, 16, 12, 10, 8, 6, 4, 2]),
                diving: PointSystem::from_descending(&[10, 8, 6, 5, 4, 3, 2, 1]),
            },
            Preset::Championship16 => {
                let individual = [20, 17, 16, 15, 14, 13, 12, 11, 9, 7, 6, 5, 4, 3, 2, 1];
                let relay: Vec<u32> = individual.iter().map(|p| p * 2).collect();
                PointSystems {
                    individual: PointSystem::from_descending(&individual),
                    relay: PointSystem::from_descending(&relay),
                    diving: PointSystem::from_descending(&individual),
                }
            }
        }
    }

    pub fn place_counts(&self) -> PlaceCounts {
        match self {
            Preset::Dual => PlaceCounts {
                individual: 5,
                relay: 3,
                diving: 5,
            },
            Preset::Championship => PlaceCounts {
                individual: 8,
                relay: 8,
                diving: 8,
            },
            Preset::Championship16 => PlaceCounts {
                individual: 16,
                relay: 16,
                diving: 16,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_place_scores_zero() {
        let system = PointSystem::from_descending(&[6, 4, 3, 2, 1]);
        assert_eq!(system.points(1), 6);
        assert_eq!(system.points(5), 1);
        assert_eq!(system.points(6), 0);
        assert_eq!(system.points(0), 0);
        assert_eq!(PointSystem::default().points(1), 0);
    }

    #[test]
    fn test_for_category_selects_table() {
        let systems = Preset::Dual.point_systems();
        assert_eq!(systems.for_category(EventCategory::Relay).points(1), 8);
        assert_eq!(systems.for_category(EventCategory::Individual).points(1), 6);
        assert_eq!(systems.for_category(EventCategory::Diving).points(2), 4);

        let counts = Preset::Dual.place_counts();
        assert_eq!(counts.for_category(EventCategory::Relay), 3);
        assert_eq!(counts.for_category(EventCategory::Individual), 5);
    }

    #[test]
    fn test_preset_parse() {
        for preset in Preset::ALL {
            assert_eq!(Preset::parse(preset.name()).unwrap(), preset);
        }
        assert!(Preset::parse("olympic").is_err());
    }

    #[test]
    fn test_presets_stay_within_scoring_places() {
        for preset in Preset::ALL {
            let systems = preset.point_systems();
            for system in [&systems.individual, &systems.relay, &systems.diving] {
                assert!(system.places().all(|p| (1..=MAX_SCORING_PLACE).contains(&p)));
            }
        }
    }

    #[test]
    fn test_championship_16_relay_doubles() {
        let systems = Preset::Championship16.point_systems();
        assert_eq!(systems.relay.points(1), 40);
        assert_eq!(systems.relay.points(16), 2);
        assert_eq!(systems.individual.points(9), 9);
    }

    #[test]
    fn test_point_system_json_keys() {
        let system: PointSystem = serde_json::from_str(r#"{"1": 6, "3": 3}"#).unwrap();
        assert_eq!(system.points(1), 6);
        assert_eq!(system.points(2), 0);
        assert_eq!(system.points(3), 3);
    }
}
