use super::types::{Event, Gender, MeetState, PlaceResult, Team, MEET_VERSION};
use crate::buffered_eprintln;
use crate::scoring::EventCategory;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape accepted for every supported version.
///
/// Version 1 stored a single `teamId` per result and had no event category.
#[derive(Debug, Deserialize)]
struct StoredMeet {
    version: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "savedAt")]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    teams: Vec<Team>,
    #[serde(default)]
    events: Vec<StoredEvent>,
}

#[derive(Debug, Deserialize)]
struct StoredEvent {
    id: String,
    name: String,
    gender: Gender,
    #[serde(default)]
    category: Option<EventCategory>,
    #[serde(default)]
    results: Vec<StoredResult>,
}

#[derive(Debug, Deserialize)]
struct StoredResult {
    #[serde(default)]
    place: Option<u32>,
    #[serde(default, rename = "teamId")]
    team_id: Option<String>,
    #[serde(default, rename = "teamIds")]
    team_ids: Option<Vec<String>>,
}

/// Parse a meet document and bring it up to the current schema.
pub fn parse_meet(content: &str) -> Result<MeetState> {
    let stored: StoredMeet =
        serde_json::from_str(content).context("Failed to parse meet file: invalid JSON")?;

    if stored.version == 0 || stored.version > MEET_VERSION {
        anyhow::bail!("Unsupported meet file version: {}", stored.version);
    }

    let events = stored.events.into_iter().map(migrate_event).collect();

    let meet = MeetState {
        version: MEET_VERSION,
        name: stored.name,
        saved_at: stored.saved_at,
        teams: stored.teams,
        events,
    };

    for (event, team_id) in meet.unknown_team_refs() {
        buffered_eprintln!(
            "Warning: {}: result names unknown team '{}', it will not score",
            event,
            team_id
        );
    }

    Ok(meet)
}

fn migrate_event(stored: StoredEvent) -> Event {
    // Category is derived from the name once, here, and stored from then on
    let category = stored
        .category
        .unwrap_or_else(|| EventCategory::from_legacy_name(&stored.name));

    let mut results = Vec::with_capacity(stored.results.len());
    for result in stored.results {
        let team_ids = match (result.team_ids, result.team_id) {
            (Some(ids), _) if !ids.is_empty() => ids,
            (_, Some(id)) => vec![id],
            _ => Vec::new(),
        };

        match result.place {
            Some(place) if place >= 1 && !team_ids.is_empty() => {
                results.push(PlaceResult { place, team_ids });
            }
            _ => {
                buffered_eprintln!(
                    "Warning: {}: dropping result without a place or team",
                    stored.name
                );
            }
        }
    }

    Event {
        id: stored.id,
        name: stored.name,
        gender: stored.gender,
        category,
        results,
    }
}

/// Load a meet from a JSON file
///
/// Older schema versions are migrated in memory; the file is not rewritten.
pub fn load_meet(path: &Path) -> Result<MeetState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read meet file at {}", path.display()))?;

    parse_meet(&content).with_context(|| format!("Failed to load meet from {}", path.display()))
}

/// Save a meet to a JSON file atomically, stamping it with the current version
/// and save time.
pub fn save_meet(path: &Path, meet: &mut MeetState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    meet.version = MEET_VERSION;
    meet.saved_at = Some(Utc::now());

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, meet).context("Failed to serialize meet")?;

    file.commit().context("Failed to save meet")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_current_version() {
        let json = r#"{
            "version": 2,
            "name": "Home vs Away",
            "teams": [{"id": "t1", "name": "Home"}, {"id": "t2", "name": "Away"}],
            "events": [{
                "id": "e1",
                "name": "200 Free Relay",
                "gender": "boys",
                "category": "relay",
                "results": [{"place": 1, "teamIds": ["t1", "t2"]}]
            }]
        }"#;
        let meet = parse_meet(json).unwrap();
        assert_eq!(meet.name.as_deref(), Some("Home vs Away"));
        assert_eq!(meet.teams.len(), 2);
        assert_eq!(meet.events[0].category, EventCategory::Relay);
        assert_eq!(meet.events[0].gender, Gender::Boys);
        assert_eq!(meet.events[0].results[0].team_ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_migrate_version_1() {
        let json = r#"{
            "version": 1,
            "teams": [{"id": "t1", "name": "Home"}],
            "events": [
                {"id": "e1", "name": "Diving", "gender": "girls",
                 "results": [{"place": 1, "teamId": "t1"}]},
                {"id": "e2", "name": "400 Free Relay", "gender": "girls", "results": []},
                {"id": "e3", "name": "1m Diving", "gender": "boys", "results": []}
            ]
        }"#;
        let meet = parse_meet(json).unwrap();
        assert_eq!(meet.version, MEET_VERSION);
        assert_eq!(meet.events[0].category, EventCategory::Diving);
        assert_eq!(meet.events[0].results[0].team_ids, vec!["t1"]);
        assert_eq!(meet.events[1].category, EventCategory::Relay);
        assert_eq!(meet.events[2].category, EventCategory::Individual);
    }

    #[test]
    fn test_stored_category_wins_over_name() {
        let json = r#"{
            "version": 2,
            "events": [{"id": "e1", "name": "Springboard", "gender": "boys", "category": "diving"}]
        }"#;
        let meet = parse_meet(json).unwrap();
        assert_eq!(meet.events[0].category, EventCategory::Diving);
    }

    #[test]
    fn test_malformed_results_are_dropped() {
        let json = r#"{
            "version": 2,
            "events": [{
                "id": "e1", "name": "50 Free", "gender": "girls", "category": "individual",
                "results": [
                    {"place": 1, "teamIds": []},
                    {"teamIds": ["t1"]},
                    {"place": 0, "teamIds": ["t1"]},
                    {"place": 2, "teamIds": ["t1"]}
                ]
            }]
        }"#;
        let meet = parse_meet(json).unwrap();
        assert_eq!(meet.events[0].results.len(), 1);
        assert_eq!(meet.events[0].results[0].place, 2);
    }

    #[test]
    fn test_tie_at_highest_place_loads_and_validates() {
        let json = r#"{
            "version": 2,
            "teams": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "events": [{
                "id": "e1", "name": "50 Free", "gender": "boys", "category": "individual",
                "results": [{"place": 4294967295, "teamIds": ["a", "b"]}]
            }]
        }"#;
        let meet = parse_meet(json).unwrap();
        assert!(crate::scoring::validate_results(&meet.events[0].results).is_ok());
    }

    #[test]
    fn test_unsupported_version() {
        let result = parse_meet(r#"{"version": 9}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported meet file version"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let temp_path = env::temp_dir().join("meet_score_test_missing.json");
        let _ = fs::remove_file(&temp_path);
        assert!(load_meet(&temp_path).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("meet_score_test_roundtrip.json");
        let _ = fs::remove_file(&temp_path);

        let mut meet = MeetState::new();
        meet.name = Some("Roundtrip".to_string());
        meet.teams.push(Team {
            id: "t1".to_string(),
            name: "Home".to_string(),
        });
        meet.events.push(Event {
            id: "e1".to_string(),
            name: "100 Back".to_string(),
            gender: Gender::Girls,
            category: EventCategory::Individual,
            results: vec![PlaceResult {
                place: 1,
                team_ids: vec!["t1".to_string()],
            }],
        });

        save_meet(&temp_path, &mut meet).unwrap();
        assert!(meet.saved_at.is_some());

        let loaded = load_meet(&temp_path).unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Roundtrip"));
        assert_eq!(loaded.teams, meet.teams);
        assert_eq!(loaded.events, meet.events);

        let _ = fs::remove_file(&temp_path);
    }
}
