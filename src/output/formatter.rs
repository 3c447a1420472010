use owo_colors::OwoColorize;
use std::collections::{BTreeMap, HashMap};
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::meet::{Event, Gender, MeetState, Team};
use crate::scoring::{PointSystem, Preset, TeamScore};

/// A team with its computed totals for display
pub struct Standing<'a> {
    pub rank: usize,
    pub team: &'a Team,
    pub score: TeamScore,
}

/// Order teams by total score, highest first. Equal totals share a rank and are
/// listed by name.
pub fn rank_standings<'a>(
    teams: &'a [Team],
    scores: &HashMap<String, TeamScore>,
) -> Vec<Standing<'a>> {
    let mut sorted: Vec<(&Team, TeamScore)> = teams
        .iter()
        .map(|team| (team, scores.get(&team.id).copied().unwrap_or_default()))
        .collect();

    sorted.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.name.cmp(&b.0.name))
    });

    let mut standings: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (idx, (team, score)) in sorted.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.score.score == score.score => prev.rank,
            _ => idx + 1,
        };
        standings.push(Standing { rank, team, score });
    }
    standings
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points without trailing zeros ("5", "4.33", "1.5")
pub fn format_points(points: f64) -> String {
    let formatted = format!("{:.2}", points);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format standings as a table with columns: Rank, Team, Total, Girls, Boys
pub fn format_standings_table(standings: &[Standing], use_colors: bool) -> String {
    if standings.is_empty() {
        return "No teams in this meet.".to_string();
    }

    let points_width = 8;
    let rank_width = 4;
    let fixed_width = rank_width + 1 + points_width * 3;

    let longest = standings
        .iter()
        .map(|s| s.team.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    let header = format!(
        "{:>rank_width$} {:<name_width$}{:>points_width$}{:>points_width$}{:>points_width$}",
        "#",
        "Team",
        "Total",
        "Girls",
        "Boys",
    );

    let rows = standings.iter().map(|s| {
        let rank = format!("{:>w$}", format!("{}.", s.rank), w = rank_width);
        let name = format!(
            "{:<name_width$}",
            truncate_name(&s.team.name, name_width)
        );
        let total = format!("{:>points_width$}", format_points(s.score.score));
        let girls = format!("{:>points_width$}", format_points(s.score.girls_score));
        let boys = format!("{:>points_width$}", format_points(s.score.boys_score));

        if use_colors {
            format!(
                "{} {}{}{}{}",
                rank.dimmed(),
                name,
                total.bold(),
                girls.magenta(),
                boys.cyan()
            )
        } else {
            format!("{} {}{}{}{}", rank, name, total, girls, boys)
        }
    });

    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one event's awarded points, for verbose mode
pub fn format_event_breakdown(
    event: &Event,
    awarded: &BTreeMap<String, f64>,
    meet: &MeetState,
    filled_places: usize,
    scoring_places: u32,
    use_colors: bool,
) -> String {
    let gender = match event.gender {
        Gender::Girls => "girls",
        Gender::Boys => "boys",
    };
    let title = format!(
        "{} ({}, {}) - {}/{} scoring places filled",
        event.name,
        gender,
        event.category.label(),
        filled_places.min(scoring_places as usize),
        scoring_places
    );

    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    if awarded.is_empty() {
        lines.push("  no points awarded".to_string());
    }
    for (team_id, points) in awarded {
        // Unknown ids still take their place but never reach the standings
        let line = match meet.team(team_id) {
            Some(team) => format!("  {}: {}", team.name, format_points(*points)),
            None => format!(
                "  {}: {} (unknown team, not scored)",
                team_id,
                format_points(*points)
            ),
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn format_point_table(system: &PointSystem) -> String {
    system
        .iter()
        .map(|(_, points)| points.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Format the built-in presets for the `presets` command
pub fn format_presets(use_colors: bool) -> String {
    Preset::ALL
        .iter()
        .map(|preset| {
            let systems = preset.point_systems();
            let counts = preset.place_counts();
            let name = if use_colors {
                preset.name().bold().to_string()
            } else {
                preset.name().to_string()
            };
            format!(
                "{}\n  {}\n  Individual ({} places): {}\n  Relay ({} places): {}\n  Diving ({} places): {}",
                name,
                preset.description(),
                counts.individual,
                format_point_table(&systems.individual),
                counts.relay,
                format_point_table(&systems.relay),
                counts.diving,
                format_point_table(&systems.diving),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
