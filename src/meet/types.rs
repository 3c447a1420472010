use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::scoring::EventCategory;

/// Current on-disk schema version of a meet file.
pub const MEET_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Girls,
    Boys,
}

/// One occupied place. More than one team id means a tie at `place`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place: u32,
    #[serde(rename = "teamIds")]
    pub team_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub category: EventCategory,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// Everything the scoresheet persists. Scores are not stored; they are always
/// recomputed from `events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetState {
    pub version: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "savedAt")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Default for MeetState {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetState {
    /// Create a new empty meet at the current schema version
    pub fn new() -> Self {
        Self {
            version: MEET_VERSION,
            name: None,
            saved_at: None,
            teams: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Display name for a team id, falling back to the id itself
    pub fn team_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or(id)
    }

    /// Result team ids that do not name a team in this meet, as (event name, team id)
    pub fn unknown_team_refs(&self) -> Vec<(&str, &str)> {
        let known: HashSet<&str> = self.teams.iter().map(|t| t.id.as_str()).collect();
        self.events
            .iter()
            .flat_map(|event| {
                event
                    .results
                    .iter()
                    .flat_map(|r| r.team_ids.iter())
                    .map(move |id| (event.name.as_str(), id.as_str()))
            })
            .filter(|(_, id)| !known.contains(id))
            .collect()
    }
}
