//! Extraction of day plans from generator output
//!
//! The provider is prompted, not schema-enforced, so its output may arrive
//! bare, fenced in markdown, truncated, or malformed. Extraction is a pure
//! two-stage function: isolate the candidate JSON payload, then convert it
//! into validated day plans.
//!
//! Policy: a payload without a `days` key is a soft empty result on every
//! path; invalid JSON or a malformed `days` element fails the whole
//! extraction. There is no partial success.

use serde_json::Value;

use crate::models::DayPlan;
use crate::{ItineraError, Result};

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Convert raw generator text into an ordered sequence of day plans.
///
/// Returns an empty sequence when the payload parses but carries no `days`
/// key; callers must treat that as "no itinerary produced", not an error.
pub fn extract_day_plans(raw: &str) -> Result<Vec<DayPlan>> {
    let candidate = isolate_payload(raw);
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ItineraError::extraction(format!("response is not valid JSON: {e}")))?;

    match value.get("days") {
        Some(days) => parse_days(days),
        None => Ok(Vec::new()),
    }
}

/// Stage one: locate a fenced JSON block and return its interior, or fall
/// back to the whole trimmed text when no complete fence is present.
fn isolate_payload(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(open) = trimmed.find(FENCE_OPEN) {
        let after_marker = &trimmed[open + FENCE_OPEN.len()..];
        let interior = after_marker
            .strip_prefix("\r\n")
            .or_else(|| after_marker.strip_prefix('\n'));
        if let Some(interior) = interior
            && let Some(close) = interior.find(FENCE_CLOSE)
        {
            return interior[..close].trim();
        }
    }

    trimmed
}

/// Stage two: convert the `days` value element by element. Any malformed
/// element or duplicate day index fails the whole extraction.
fn parse_days(days: &Value) -> Result<Vec<DayPlan>> {
    let entries = days
        .as_array()
        .ok_or_else(|| ItineraError::extraction("`days` is not an array"))?;

    let mut seen = std::collections::HashSet::new();
    let mut plans = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let object = entry.as_object().ok_or_else(|| {
            ItineraError::extraction(format!("`days[{index}]` is not an object"))
        })?;

        let day = object
            .get("day")
            .and_then(Value::as_u64)
            .filter(|day| *day >= 1)
            .ok_or_else(|| {
                ItineraError::extraction(format!(
                    "`days[{index}].day` is missing or not a positive integer"
                ))
            })?;
        let day = u32::try_from(day).map_err(|_| {
            ItineraError::extraction(format!("`days[{index}].day` is out of range"))
        })?;

        let activities = object
            .get("activities")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ItineraError::extraction(format!(
                    "`days[{index}].activities` is missing or not an array"
                ))
            })?;
        let activities = activities
            .iter()
            .map(|activity| {
                activity.as_str().map(str::to_owned).ok_or_else(|| {
                    ItineraError::extraction(format!(
                        "`days[{index}].activities` contains a non-string entry"
                    ))
                })
            })
            .collect::<Result<Vec<String>>>()?;

        if !seen.insert(day) {
            return Err(ItineraError::extraction(format!(
                "duplicate day index {day}"
            )));
        }

        plans.push(DayPlan::new(day, activities));
    }

    Ok(plans)
}
