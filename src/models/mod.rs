//! Data models for the `Itinera` service
//!
//! The core domain types live in one module:
//! - Itinerary: a persisted trip plan with its day-by-day activities
//! - DayPlan: one day's ordered activities
//! - ItineraryRequest / ItineraryAdjustment: inbound trip parameters

pub mod itinerary;

// Re-export all public types for convenient access
pub use itinerary::{DayPlan, Itinerary, ItineraryAdjustment, ItineraryRequest};
