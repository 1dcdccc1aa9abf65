//! `TrailPlan` - Multi-day travel itinerary planning engine
//!
//! This library provides the core functionality for preference-based POI
//! ranking, greedy day-packing of visits, per-day route optimization, and
//! travel-logistics computation, all fully functional offline.

pub mod builder;
pub mod conditions;
pub mod config;
pub mod editing;
pub mod equipment;
pub mod error;
pub mod geo;
pub mod logistics;
pub mod models;
pub mod optimizer;
pub mod planner;
pub mod scoring;
pub mod store;

// Re-export core types for public API
pub use builder::{build_itinerary, BuildRequest, DAY_CAP_HOURS, MAX_DAYS_COUNT};
pub use conditions::{
    provider_from_config, Conditions, DrivingLeg, ExternalConditionsProvider,
    HttpConditionsProvider, OfflineConditionsProvider, PlaceInfo, WeatherNow,
};
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use logistics::{DayLogistics, ItineraryLogistics};
pub use models::{
    DayPlan, Itinerary, PhysicalTier, Poi, PoiCategory, PriceTier, Season, TravelStyle,
    TravelerProfile, Visit,
};
pub use planner::{GenerateRequest, Planner};
pub use store::{InMemoryItineraryStore, ItineraryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
