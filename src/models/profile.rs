//! Traveler profile model

use serde::{Deserialize, Serialize};

use super::poi::{PhysicalTier, PriceTier, Season};

/// Overall style of trip a traveler prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStyle {
    Active,
    Cultural,
    Relax,
    Mixed,
}

/// Read-only description of the traveler the itinerary is planned for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelerProfile {
    /// Preferred style of travel
    #[serde(default = "default_travel_style")]
    pub travel_style: TravelStyle,
    /// Budget tier
    #[serde(default = "default_budget_level")]
    pub budget_level: PriceTier,
    /// Physical fitness tier
    #[serde(default = "default_physical_level")]
    pub physical_level: PhysicalTier,
    /// Season the trip is planned for
    #[serde(default = "default_preferred_season")]
    pub preferred_season: Season,
    /// Whether children travel along
    #[serde(default)]
    pub with_children: bool,
    /// Free-text interest keywords (e.g. "shamanism, archaeology")
    #[serde(default)]
    pub interests: String,
}

fn default_travel_style() -> TravelStyle {
    TravelStyle::Mixed
}

fn default_budget_level() -> PriceTier {
    PriceTier::Medium
}

fn default_physical_level() -> PhysicalTier {
    PhysicalTier::Medium
}

fn default_preferred_season() -> Season {
    Season::Summer
}

impl Default for TravelerProfile {
    fn default() -> Self {
        Self {
            travel_style: default_travel_style(),
            budget_level: default_budget_level(),
            physical_level: default_physical_level(),
            preferred_season: default_preferred_season(),
            with_children: false,
            interests: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let profile = TravelerProfile::default();
        assert_eq!(profile.travel_style, TravelStyle::Mixed);
        assert_eq!(profile.budget_level, PriceTier::Medium);
        assert_eq!(profile.preferred_season, Season::Summer);
        assert!(!profile.with_children);
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: TravelerProfile =
            serde_json::from_str(r#"{"travel_style": "CULTURAL"}"#).unwrap();
        assert_eq!(profile.travel_style, TravelStyle::Cultural);
        assert_eq!(profile.physical_level, PhysicalTier::Medium);
        assert!(profile.interests.is_empty());
    }
}
