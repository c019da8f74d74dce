//! Itinerary domain models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ItineraError, Result};

/// Inbound parameters for generating a new itinerary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryRequest {
    /// Destination name (city, region, country)
    pub destination: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip (inclusive)
    pub end_date: NaiveDate,
    /// Interest tags, ordered, duplicates permitted
    pub interests: Vec<String>,
}

impl ItineraryRequest {
    /// Check the request invariants: non-empty destination, end date not
    /// before start date.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(ItineraError::validation("destination cannot be empty"));
        }
        if self.end_date < self.start_date {
            return Err(ItineraError::validation(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Trip length in days, inclusive of both endpoints
    #[must_use]
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// One day's ordered list of activity descriptions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPlan {
    /// 1-based day index within the itinerary
    pub day: u32,
    /// Ordered activity descriptions
    pub activities: Vec<String>,
}

impl DayPlan {
    #[must_use]
    pub fn new(day: u32, activities: Vec<String>) -> Self {
        Self { day, activities }
    }
}

/// A trip plan: request parameters plus the day-by-day activities
///
/// The identifier is absent until the store adapter assigns one at first
/// save and never changes afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Vec<String>,
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Assemble an unpersisted itinerary from a request and extracted plans
    #[must_use]
    pub fn from_request(request: ItineraryRequest, days: Vec<DayPlan>) -> Self {
        Self {
            id: None,
            destination: request.destination,
            start_date: request.start_date,
            end_date: request.end_date,
            interests: request.interests,
            days,
        }
    }

    /// Copy of this itinerary with the day-plan sequence replaced; identifier,
    /// destination, dates, and interests are preserved.
    #[must_use]
    pub fn with_days(&self, days: Vec<DayPlan>) -> Self {
        Self {
            days,
            ..self.clone()
        }
    }

    /// Check the itinerary invariants: valid trip parameters plus unique,
    /// positive day indices.
    pub fn validate(&self) -> Result<()> {
        let request = ItineraryRequest {
            destination: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            interests: self.interests.clone(),
        };
        request.validate()?;

        let mut seen = std::collections::HashSet::new();
        for plan in &self.days {
            if plan.day == 0 {
                return Err(ItineraError::validation("day index must be positive"));
            }
            if !seen.insert(plan.day) {
                return Err(ItineraError::validation(format!(
                    "duplicate day index {}",
                    plan.day
                )));
            }
        }
        Ok(())
    }
}

/// A single free-text instruction for reworking an itinerary's activities.
/// Consumed once, never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryAdjustment {
    pub instruction: String,
}
