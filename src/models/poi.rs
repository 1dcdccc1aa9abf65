//! Point-of-interest model and its classification enums
//!
//! POIs are immutable snapshots from the planner's perspective: the catalog
//! collaborator owns them and hands them to the core as in-memory values.

use serde::{Deserialize, Serialize};

/// Kind of place a POI represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiCategory {
    Nature,
    Culture,
    Museum,
    Guesthouse,
    ShamanClinic,
    Food,
    Other,
}

/// Season in which a POI can be visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    YearRound,
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// Price tier of a POI, and budget tier of a traveler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

/// Physical difficulty of a POI, and fitness tier of a traveler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicalTier {
    Easy,
    Medium,
    Hard,
}

/// A place that can be visited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Catalog identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Short description shown in lists
    #[serde(default)]
    pub short_description: String,
    /// Detailed description shown on the POI page
    #[serde(default)]
    pub detailed_description: String,
    /// Kind of place
    pub category: PoiCategory,
    /// Region or district text
    #[serde(default)]
    pub region: String,
    /// Latitude in decimal degrees (present only together with longitude)
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees (present only together with latitude)
    pub longitude: Option<f64>,
    /// Planned visit duration in hours; 2.0 assumed when unset
    pub visit_duration_hours: Option<f64>,
    /// Physical difficulty of the visit
    pub physical_level: PhysicalTier,
    /// Season availability
    pub season: Season,
    /// Price tier
    pub price_level: PriceTier,
    /// Estimated cost of a visit, when known
    pub base_cost: Option<u32>,
    /// Average visitor rating, 0-5
    pub avg_rating: Option<f64>,
}

/// Visit duration assumed for POIs that do not declare one
pub const DEFAULT_VISIT_HOURS: f64 = 2.0;

impl Poi {
    /// Create a POI with neutral defaults, useful as a starting point
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, category: PoiCategory) -> Self {
        Self {
            id,
            name: name.into(),
            short_description: String::new(),
            detailed_description: String::new(),
            category,
            region: String::new(),
            latitude: None,
            longitude: None,
            visit_duration_hours: None,
            physical_level: PhysicalTier::Medium,
            season: Season::YearRound,
            price_level: PriceTier::Medium,
            base_cost: None,
            avg_rating: None,
        }
    }

    /// Set both coordinates
    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set season availability
    #[must_use]
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    /// Set physical difficulty
    #[must_use]
    pub fn with_physical_level(mut self, level: PhysicalTier) -> Self {
        self.physical_level = level;
        self
    }

    /// Set price tier
    #[must_use]
    pub fn with_price_level(mut self, level: PriceTier) -> Self {
        self.price_level = level;
        self
    }

    /// Set the estimated cost
    #[must_use]
    pub fn with_base_cost(mut self, cost: u32) -> Self {
        self.base_cost = Some(cost);
        self
    }

    /// Set the average rating
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.avg_rating = Some(rating);
        self
    }

    /// Set the planned visit duration in hours
    #[must_use]
    pub fn with_visit_hours(mut self, hours: f64) -> Self {
        self.visit_duration_hours = Some(hours);
        self
    }

    /// Coordinates of the POI, only when both latitude and longitude are set
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Planned visit duration in hours, defaulting when the catalog has none
    #[must_use]
    pub fn visit_hours(&self) -> f64 {
        self.visit_duration_hours.unwrap_or(DEFAULT_VISIT_HOURS)
    }

    /// Rating with missing values treated as zero for ordering
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.avg_rating.unwrap_or(0.0)
    }
}
