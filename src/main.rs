use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use meet_score::meet::MeetState;
use meet_score::scoring::ScoringRules;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_INVALID_RESULTS: i32 = 5;
const EXIT_MEET_FILE: i32 = 6;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute and print team standings
    Score {
        /// Meet file (defaults to default_meet from the config)
        meet: Option<PathBuf>,
    },
    /// Check every event for places that collide with a tie
    Validate {
        /// Meet file (defaults to default_meet from the config)
        meet: Option<PathBuf>,
    },
    /// Rewrite a meet file in the current schema version
    Migrate {
        /// Meet file to upgrade
        meet: PathBuf,
        /// Where to write the upgraded file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in point systems
    Presets,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "meet-score")]
#[command(about = "Swim meet scoresheet: team standings from event placements", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/meet-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        if let Err(e) = meet_score::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    if let Commands::Presets = cli.command {
        let use_colors = meet_score::output::should_use_colors();
        println!("{}", meet_score::output::format_presets(use_colors));
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match meet_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.effective_scoring();
    if let Err(errors) = meet_score::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let rules = match effective_scoring.resolve() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Scoring places: {} individual, {} relay, {} diving; team place limit {}",
            rules.place_counts.individual,
            rules.place_counts.relay,
            rules.place_counts.diving,
            if rules.team_place_limit { "on" } else { "off" }
        );
    }

    let default_meet = config.default_meet.map(PathBuf::from);
    let code = match cli.command {
        Commands::Score { meet } => {
            let meet = load_meet_or_exit(meet.or(default_meet), cli.verbose);
            run_score(&meet, &rules, cli.verbose)
        }
        Commands::Validate { meet } => {
            let meet = load_meet_or_exit(meet.or(default_meet), cli.verbose);
            run_validate(&meet)
        }
        Commands::Migrate { meet, output } => run_migrate(&meet, output, cli.verbose),
        Commands::Presets | Commands::Init => EXIT_SUCCESS,
    };

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(code);
}

fn load_meet_or_exit(path: Option<PathBuf>, verbose: bool) -> MeetState {
    let Some(path) = path else {
        eprintln!("No meet file given and no default_meet set in config.");
        std::process::exit(EXIT_MEET_FILE);
    };

    // Hold load warnings back until the command output is printed
    meet_score::stderr_buffer::activate();
    let meet = match meet_score::meet::load_meet(&path) {
        Ok(m) => m,
        Err(e) => {
            flush_warnings();
            eprintln!("Meet file error: {:#}", e);
            std::process::exit(EXIT_MEET_FILE);
        }
    };

    if verbose {
        eprintln!(
            "Loaded {}: {} teams, {} events",
            path.display(),
            meet.teams.len(),
            meet.events.len()
        );
    }
    meet
}

fn flush_warnings() {
    for warning in meet_score::stderr_buffer::drain() {
        eprintln!("{}", warning);
    }
}

fn run_score(meet: &MeetState, rules: &ScoringRules, verbose: bool) -> i32 {
    use meet_score::output;
    use meet_score::scoring;

    let use_colors = output::should_use_colors();

    let scores = scoring::calculate_scores(
        &meet.teams,
        &meet.events,
        &rules.point_systems,
        &rules.place_counts,
        rules.team_place_limit,
    );

    if let Some(ref name) = meet.name {
        println!("{}", name);
        println!();
    }

    if verbose {
        for event in &meet.events {
            let awarded = scoring::calculate_event_points(
                event,
                &rules.point_systems,
                &rules.place_counts,
                rules.team_place_limit,
            );
            let scoring_places = rules.place_counts.for_category(event.category);
            let filled = scoring::consumed_place_count(&event.results, scoring_places);
            println!(
                "{}",
                output::format_event_breakdown(event, &awarded, meet, filled, scoring_places, use_colors)
            );
            println!();
        }
    }

    let standings = output::rank_standings(&meet.teams, &scores);
    println!("{}", output::format_standings_table(&standings, use_colors));

    flush_warnings();
    EXIT_SUCCESS
}

fn run_validate(meet: &MeetState) -> i32 {
    let mut conflicts = 0;

    for event in &meet.events {
        if let Err(errors) = meet_score::scoring::validate_results(&event.results) {
            println!("{}:", event.name);
            for error in &errors {
                println!("  - {}", error);
            }
            conflicts += errors.len();
        }
    }

    flush_warnings();

    if conflicts > 0 {
        eprintln!("{} conflicting result(s) found.", conflicts);
        EXIT_INVALID_RESULTS
    } else {
        println!("All {} events are valid.", meet.events.len());
        EXIT_SUCCESS
    }
}

fn run_migrate(path: &Path, output: Option<PathBuf>, verbose: bool) -> i32 {
    let mut meet = match meet_score::meet::load_meet(path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Meet file error: {:#}", e);
            return EXIT_MEET_FILE;
        }
    };

    let target = output.unwrap_or_else(|| path.to_path_buf());
    if let Err(e) = meet_score::meet::save_meet(&target, &mut meet) {
        eprintln!("Failed to write meet file: {:#}", e);
        return EXIT_MEET_FILE;
    }

    if verbose {
        eprintln!("Wrote schema version {}", meet.version);
    }
    println!("Migrated {} -> {}", path.display(), target.display());
    EXIT_SUCCESS
}
