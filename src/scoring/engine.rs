use std::collections::{BTreeMap, HashMap};

use super::category::EventCategory;
use super::points::{PlaceCounts, PointSystem, PointSystems};
use crate::meet::types::{Event, Gender, Team};

/// Point totals for one team, split by the gender of the events they came from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamScore {
    pub score: f64,
    pub girls_score: f64,
    pub boys_score: f64,
}

impl TeamScore {
    fn add(&mut self, points: f64, gender: Gender) {
        self.score += points;
        match gender {
            Gender::Girls => self.girls_score += points,
            Gender::Boys => self.boys_score += points,
        }
    }

    fn rounded(self) -> Self {
        Self {
            score: round2(self.score),
            girls_score: round2(self.girls_score),
            boys_score: round2(self.boys_score),
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Points each of `num_tied` teams receives when they share consecutive places
/// starting at `start_place`.
///
/// Places past `max_place` add nothing to the pool. The result is not rounded.
pub fn tie_points(start_place: u32, num_tied: usize, system: &PointSystem, max_place: u32) -> f64 {
    if num_tied == 0 || start_place > max_place || system.is_empty() {
        return 0.0;
    }

    let pool: f64 = (start_place..=max_place)
        .take(num_tied)
        .map(|place| f64::from(system.points(place)))
        .sum();

    pool / num_tied as f64
}

/// Unrounded points awarded to each team in a single event.
///
/// Only teams that were awarded points appear in the map. Relays honour the team
/// place limit when `team_place_limit` is set: a team already holding
/// `max(1, places - 1)` scoring places is skipped for any further place, and the
/// remaining teams at that place split the points among themselves. The full tie
/// span is consumed either way.
pub fn calculate_event_points(
    event: &Event,
    point_systems: &PointSystems,
    place_counts: &PlaceCounts,
    team_place_limit: bool,
) -> BTreeMap<String, f64> {
    let system = point_systems.for_category(event.category);
    let max_place = place_counts.for_category(event.category);
    let apply_limit = team_place_limit && event.category == EventCategory::Relay;
    let max_team_places = if apply_limit {
        max_place.saturating_sub(1).max(1)
    } else {
        u32::MAX
    };

    let mut teams_by_place: BTreeMap<u32, &[String]> = BTreeMap::new();
    for result in &event.results {
        if result.place == 0 || result.team_ids.is_empty() {
            continue;
        }
        teams_by_place.insert(result.place, result.team_ids.as_slice());
    }

    let mut awarded: BTreeMap<String, f64> = BTreeMap::new();
    let mut places_held: HashMap<&str, u32> = HashMap::new();
    let mut current_place = 1;

    while current_place <= max_place {
        // Unoccupied places are skipped
        let Some((&place, &teams_at_place)) = teams_by_place.range(current_place..=max_place).next()
        else {
            break;
        };
        current_place = place;

        let eligible: Vec<&str> = teams_at_place
            .iter()
            .map(String::as_str)
            .filter(|id| places_held.get(id).copied().unwrap_or(0) < max_team_places)
            .collect();

        if !eligible.is_empty() {
            let points_per_team = tie_points(current_place, eligible.len(), system, max_place);
            for id in eligible {
                *awarded.entry(id.to_string()).or_insert(0.0) += points_per_team;
                *places_held.entry(id).or_insert(0) += 1;
            }
        }

        let span = u32::try_from(teams_at_place.len()).unwrap_or(u32::MAX);
        match current_place.checked_add(span) {
            Some(next) => current_place = next,
            None => break,
        }
    }

    awarded
}

/// Recompute every team's score from scratch.
///
/// The returned map has one entry per team in `teams`, rounded to two decimals
/// only after all events are summed. Result entries naming a team that is not in
/// `teams` are ignored.
pub fn calculate_scores(
    teams: &[Team],
    events: &[Event],
    point_systems: &PointSystems,
    place_counts: &PlaceCounts,
    team_place_limit: bool,
) -> HashMap<String, TeamScore> {
    let mut scores: HashMap<String, TeamScore> = teams
        .iter()
        .map(|team| (team.id.clone(), TeamScore::default()))
        .collect();

    for event in events {
        let awarded = calculate_event_points(event, point_systems, place_counts, team_place_limit);
        for (team_id, points) in awarded {
            if let Some(entry) = scores.get_mut(&team_id) {
                entry.add(points, event.gender);
            }
        }
    }

    scores
        .into_iter()
        .map(|(id, score)| (id, score.rounded()))
        .collect()
}
