use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::scoring::{Preset, ScoringConfig, MAX_SCORING_PLACE};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a scoring place count, accepting 1 through MAX_SCORING_PLACE.
fn parse_place_count(input: &str) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_SCORING_PLACE).contains(&n) => Ok(n),
        Ok(_) => Err(format!("must be between 1 and {}", MAX_SCORING_PLACE)),
        Err(_) => Err("must be a whole number".to_string()),
    }
}

fn prompt_place_count(label: &str, default: u32) -> Result<u32> {
    loop {
        let input = prompt_with_default(label, &default.to_string())?;
        match parse_place_count(&input) {
            Ok(n) => return Ok(n),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Meet Score Configuration Wizard");
    println!("===============================");
    println!();

    // 1. Point system preset
    println!("Point systems decide how many points each place is worth.");
    for preset in Preset::ALL {
        println!("  {:<16} {}", preset.name(), preset.description());
    }
    let preset = loop {
        let input = prompt_with_default("Preset", Preset::Dual.name())?;
        match Preset::parse(&input) {
            Ok(p) => break p,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Scoring places
    println!();
    let counts = preset.place_counts();
    let use_preset_places = prompt_yes_no(
        &format!(
            "Scoring places - use preset? ({} individual, {} relay, {} diving)",
            counts.individual, counts.relay, counts.diving
        ),
        true,
    )?;
    let (individual_places, relay_places, diving_places) = if use_preset_places {
        (counts.individual, counts.relay, counts.diving)
    } else {
        (
            prompt_place_count("Individual scoring places", counts.individual)?,
            prompt_place_count("Relay scoring places", counts.relay)?,
            prompt_place_count("Diving scoring places", counts.diving)?,
        )
    };

    // 3. Relay place limit
    println!();
    println!("With the team place limit on, one team can take at most all but one");
    println!("of a relay's scoring places. Individual and diving events are unaffected.");
    let team_place_limit = prompt_yes_no("Enable team place limit for relays?", true)?;

    // 4. Default meet file
    println!();
    let default_meet = prompt("Default meet file (leave empty for none): ")?;
    let default_meet = if default_meet.is_empty() {
        None
    } else {
        Some(default_meet)
    };

    // 5. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        scoring: Some(ScoringConfig {
            preset: Some(preset.name().to_string()),
            individual_places: Some(individual_places),
            relay_places: Some(relay_places),
            diving_places: Some(diving_places),
            team_place_limit: Some(team_place_limit),
            individual_points: None,
            relay_points: None,
            diving_points: None,
        }),
        default_meet,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Point tables can be overridden per category (individual_points, relay_points, diving_points).");
    println!("Run `meet-score score <MEET>` to get started.");

    Ok(())
}
