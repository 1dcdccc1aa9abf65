//! Domain models for POIs, traveler profiles, and itineraries

pub mod itinerary;
pub mod poi;
pub mod profile;

pub use itinerary::{DayPlan, Itinerary, Visit};
pub use poi::{PhysicalTier, Poi, PoiCategory, PriceTier, Season};
pub use profile::{TravelStyle, TravelerProfile};
