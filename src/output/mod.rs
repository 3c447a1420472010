pub mod formatter;

pub use formatter::{
    format_event_breakdown, format_points, format_presets, format_standings_table,
    rank_standings, should_use_colors, Standing,
};
