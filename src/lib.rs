//! `Itinera` - AI-assisted travel itinerary planning and management
//!
//! This library provides the core functionality for itinerary generation
//! through an external text-generation provider, extraction of structured
//! day plans from provider output, and document persistence.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod service;
pub mod store;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::ItineraError;
pub use extract::extract_day_plans;
pub use models::{DayPlan, Itinerary, ItineraryAdjustment, ItineraryRequest};
pub use provider::{GeminiClient, GeneratedText, TextGenerator};
pub use service::ItineraryService;
pub use store::ItineraryStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ItineraError>;
