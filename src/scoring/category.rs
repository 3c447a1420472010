use serde::{Deserialize, Serialize};

/// Which point system and place-count ceiling an event scores under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Individual,
    Relay,
    Diving,
}

impl EventCategory {
    /// Derive the category from an event name written before categories were stored.
    ///
    /// Diving requires an exact match on "Diving"; relays match any name containing
    /// "Relay". Everything else is individual.
    pub fn from_legacy_name(name: &str) -> Self {
        if is_diving(name) {
            EventCategory::Diving
        } else if is_relay(name) {
            EventCategory::Relay
        } else {
            EventCategory::Individual
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Individual => "individual",
            EventCategory::Relay => "relay",
            EventCategory::Diving => "diving",
        }
    }
}

pub fn is_diving(name: &str) -> bool {
    name == "Diving"
}

pub fn is_relay(name: &str) -> bool {
    name.contains("Relay")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diving_is_exact_match() {
        assert_eq!(EventCategory::from_legacy_name("Diving"), EventCategory::Diving);
        assert_eq!(
            EventCategory::from_legacy_name("1m Diving"),
            EventCategory::Individual
        );
        assert_eq!(EventCategory::from_legacy_name("diving"), EventCategory::Individual);
    }

    #[test]
    fn test_relay_is_substring_match() {
        assert_eq!(
            EventCategory::from_legacy_name("200 Medley Relay"),
            EventCategory::Relay
        );
        assert_eq!(
            EventCategory::from_legacy_name("Relay"),
            EventCategory::Relay
        );
        // Case sensitive, same as the stored names it was derived from
        assert_eq!(
            EventCategory::from_legacy_name("200 free relay"),
            EventCategory::Individual
        );
    }

    #[test]
    fn test_everything_else_is_individual() {
        assert_eq!(
            EventCategory::from_legacy_name("100 Butterfly"),
            EventCategory::Individual
        );
        assert_eq!(EventCategory::from_legacy_name(""), EventCategory::Individual);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&EventCategory::Relay).unwrap();
        assert_eq!(json, "\"relay\"");
        let parsed: EventCategory = serde_json::from_str("\"diving\"").unwrap();
        assert_eq!(parsed, EventCategory::Diving);
    }
}
