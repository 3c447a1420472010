use super::config::ScoringConfig;
use super::points::{PointSystem, Preset, MAX_SCORING_PLACE};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate preset name
    if let Some(ref name) = config.preset {
        if let Err(e) = Preset::parse(name) {
            errors.push(format!("scoring.preset: {}", e));
        }
    }

    // Validate place counts
    let place_counts = [
        ("individual_places", config.individual_places),
        ("relay_places", config.relay_places),
        ("diving_places", config.diving_places),
    ];
    for (field, value) in place_counts {
        if let Some(count) = value {
            if !(1..=MAX_SCORING_PLACE).contains(&count) {
                errors.push(format!(
                    "scoring.{}: must be between 1 and {}, got {}",
                    field, MAX_SCORING_PLACE, count
                ));
            }
        }
    }

    // Validate point tables
    let tables = [
        ("individual_points", &config.individual_points),
        ("relay_points", &config.relay_points),
        ("diving_points", &config.diving_points),
    ];
    for (field, table) in tables {
        if let Some(table) = table {
            check_point_table(field, table, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_point_table(field: &str, table: &PointSystem, errors: &mut Vec<String>) {
    for place in table.places() {
        if !(1..=MAX_SCORING_PLACE).contains(&place) {
            errors.push(format!(
                "scoring.{}[{}]: place must be between 1 and {}",
                field, place, MAX_SCORING_PLACE
            ));
        }
    }
}
