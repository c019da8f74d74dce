//! Prompt construction for the text-generation provider
//!
//! Pure functions from trip parameters to natural-language instructions.
//! Both variants demand JSON-only output matching the schema example; the
//! provider is still free to ignore that, which is why extraction stays
//! defensive.

use crate::models::{Itinerary, ItineraryRequest};

/// Maximum output tokens supported by the configured model
pub const MODEL_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Baseline output budget covering intro and JSON structure
const BASE_OUTPUT_TOKENS: u32 = 500;
/// Estimated output budget for one day's activities plus its day object
const TOKENS_PER_DAY: u32 = 150;
/// Floor so short trips still get headroom for verbose generators
const MIN_OUTPUT_TOKENS: u32 = 2048;

const SCHEMA_EXAMPLE: &str = r#"{
    "days": [
        {
            "day": 1,
            "activities": ["activity1", "activity2", "activity3"]
        },
        ...
    ]
}"#;

/// Output-token budget scaled to trip length, floored and capped.
///
/// A heuristic against truncated output on long trips, not a guarantee;
/// truncated responses still surface through the extraction failure path.
#[must_use]
pub fn max_output_tokens(num_days: i64) -> u32 {
    let days = u32::try_from(num_days.max(0)).unwrap_or(u32::MAX);
    let recommended = BASE_OUTPUT_TOKENS
        .saturating_add(days.saturating_mul(TOKENS_PER_DAY))
        .max(MIN_OUTPUT_TOKENS);
    recommended.min(MODEL_MAX_OUTPUT_TOKENS)
}

/// Instruction for generating a fresh itinerary from trip parameters
#[must_use]
pub fn generation_prompt(request: &ItineraryRequest) -> String {
    let interests = request.interests.join(", ");
    format!(
        "Create a detailed travel itinerary for {destination} from {start} to {end}.\n\
         \n\
         Trip details:\n\
         - Destination: {destination}\n\
         - Duration: {num_days} days\n\
         - Interests: {interests}\n\
         \n\
         Please provide a day-by-day itinerary with 3-4 activities per day if it is realistic.\n\
         Format your response as JSON with this structure:\n\
         {schema}\n\
         \n\
         Focus on activities related to: {interests}.\n\
         Include realistic timing.\n\
         Make sure to return only valid JSON without any additional text or markdown formatting.\n",
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        num_days = request.num_days(),
        interests = interests,
        schema = SCHEMA_EXAMPLE,
    )
}

/// Instruction for reworking an existing itinerary's activities while
/// keeping its day count
#[must_use]
pub fn adjustment_prompt(current: &Itinerary, instruction: &str) -> String {
    let mut current_plan = String::new();
    for plan in &current.days {
        current_plan.push_str(&format!(
            "Day {}: {}\n",
            plan.day,
            plan.activities.join(", ")
        ));
    }

    format!(
        "You have a travel itinerary for {destination} that needs to be adjusted.\n\
         \n\
         Current itinerary:\n\
         {current_plan}\n\
         Trip details:\n\
         - Destination: {destination}\n\
         - Duration: {num_days} days\n\
         - Original interests: {interests}\n\
         \n\
         Please adjust this itinerary based on this request: \"{instruction}\"\n\
         \n\
         Format your response as JSON with this structure:\n\
         {schema}\n\
         \n\
         Keep the same number of days but modify activities according to the request.\n\
         Make sure to return only valid JSON without any additional text or markdown formatting.\n",
        destination = current.destination,
        current_plan = current_plan,
        num_days = current.days.len(),
        interests = current.interests.join(", "),
        instruction = instruction,
        schema = SCHEMA_EXAMPLE,
    )
}
