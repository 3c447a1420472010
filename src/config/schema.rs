use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Meet file used when a command is given no path
    #[serde(default)]
    pub default_meet: Option<String>,
}

impl Config {
    /// Scoring settings in effect, falling back to the built-in defaults
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
default_meet: meets/home-opener.json
scoring:
  preset: championship
  team_place_limit: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.default_meet.as_deref(), Some("meets/home-opener.json"));
        let scoring = config.effective_scoring();
        assert_eq!(scoring.preset, Some("championship".to_string()));
        assert_eq!(scoring.team_place_limit, Some(false));
    }

    #[test]
    fn test_missing_scoring_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }
}
