//! Document-store adapter for itineraries
//!
//! Maps `Itinerary` to and from a neutral JSON document persisted in a
//! fjall keyspace, and owns identifier assignment. Identifiers are opaque
//! UUID strings handed out at first insert; the adapter parses them back
//! into store keys and rejects malformed ones with a typed failure.
//!
//! All fjall calls are blocking and run on the blocking thread pool.

use std::path::Path;

use chrono::Utc;
use serde_json::{Value, json};
use tokio::task;
use tracing::warn;
use uuid::Uuid;

use crate::models::{DayPlan, Itinerary};
use crate::{ItineraError, Result};

pub struct ItineraryStore {
    docs: fjall::Keyspace,
}

impl ItineraryStore {
    /// Open (or create) the document store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let docs = db.keyspace("itineraries", fjall::KeyspaceCreateOptions::default)?;
        Ok(ItineraryStore { docs })
    }

    /// Persist a new itinerary and return its freshly assigned identifier
    pub async fn insert(&self, itinerary: &Itinerary) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let bytes = doc_bytes(&itinerary_to_doc(itinerary))?;
        let key = id.as_bytes().to_vec();
        self.run_blocking(move |docs| docs.insert(key, bytes)).await?;
        Ok(id)
    }

    /// Load one itinerary by identifier; `None` when no document matches
    pub async fn find_one(&self, id: &str) -> Result<Option<Itinerary>> {
        let key = parse_key(id)?;
        let maybe_bytes = self
            .run_blocking(move |docs| Ok(docs.get(key.as_bytes())?.map(|v| v.to_vec())))
            .await?;

        match maybe_bytes {
            Some(bytes) => {
                let doc: Value = serde_json::from_slice(&bytes).map_err(|e| {
                    ItineraError::persistence(format!("stored document {id} is not JSON: {e}"))
                })?;
                Ok(Some(doc_to_itinerary(id, &doc)?))
            }
            None => Ok(None),
        }
    }

    /// Load every stored itinerary, skipping documents that no longer
    /// deserialize. Skips are logged, never fatal.
    pub async fn find_all(&self) -> Result<Vec<Itinerary>> {
        let pairs: Vec<(Vec<u8>, Vec<u8>)> = self
            .run_blocking(|docs| {
                docs.iter()
                    .map(|kv| {
                        kv.into_inner()
                            .map(|(key, value)| (key.to_vec(), value.to_vec()))
                            .map_err(fjall::Error::from)
                    })
                    .collect()
            })
            .await?;

        let mut itineraries = Vec::with_capacity(pairs.len());
        for (key, bytes) in pairs {
            let id = String::from_utf8_lossy(&key).into_owned();
            let parsed = serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| ItineraError::persistence(format!("document is not JSON: {e}")))
                .and_then(|doc| doc_to_itinerary(&id, &doc));
            match parsed {
                Ok(itinerary) => itineraries.push(itinerary),
                Err(e) => warn!("Skipping malformed document {}: {}", id, e),
            }
        }
        Ok(itineraries)
    }

    /// Replace the document under `id`; returns how many documents matched
    /// (0 or 1). The stored copy gets an `updated_at` stamp.
    pub async fn update_one(&self, id: &str, itinerary: &Itinerary) -> Result<u64> {
        let key = parse_key(id)?;
        let mut doc = itinerary_to_doc(itinerary);
        doc["updated_at"] = json!(Utc::now().to_rfc3339());
        let bytes = doc_bytes(&doc)?;

        self.run_blocking(move |docs| {
            if docs.get(key.as_bytes())?.is_none() {
                return Ok(0);
            }
            docs.insert(key.as_bytes(), bytes)?;
            Ok(1)
        })
        .await
    }

    /// Remove the document under `id`; returns how many documents were
    /// deleted (0 or 1). An unknown identifier is not an error.
    pub async fn delete_one(&self, id: &str) -> Result<u64> {
        let key = parse_key(id)?;
        self.run_blocking(move |docs| {
            if docs.get(key.as_bytes())?.is_none() {
                return Ok(0);
            }
            docs.remove(key.as_bytes())?;
            Ok(1)
        })
        .await
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(fjall::Keyspace) -> std::result::Result<T, fjall::Error> + Send + 'static,
    {
        let docs = self.docs.clone();
        task::spawn_blocking(move || op(docs))
            .await
            .map_err(|e| ItineraError::persistence(format!("store task failed: {e}")))?
            .map_err(ItineraError::from)
    }
}

/// Parse an opaque identifier into its canonical store key. Malformed
/// identifiers are a validation failure, not a crash.
fn parse_key(id: &str) -> Result<String> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| ItineraError::validation(format!("malformed itinerary id: {id}")))?;
    Ok(uuid.to_string())
}

/// Serialize an itinerary into its neutral document form. The identifier is
/// the document key and is not duplicated inside the document.
pub(crate) fn itinerary_to_doc(itinerary: &Itinerary) -> Value {
    json!({
        "destination": itinerary.destination,
        "start_date": itinerary.start_date.to_string(),
        "end_date": itinerary.end_date.to_string(),
        "interests": itinerary.interests,
        "days": itinerary.days.iter().map(|plan| json!({
            "day": plan.day,
            "activities": plan.activities,
        })).collect::<Vec<Value>>(),
    })
}

/// Deserialize a stored document, validated field by field. Unknown extra
/// fields (such as `updated_at`) are ignored.
pub(crate) fn doc_to_itinerary(id: &str, doc: &Value) -> Result<Itinerary> {
    let field = |name: &str| -> Result<&Value> {
        doc.get(name).ok_or_else(|| {
            ItineraError::persistence(format!("document {id} is missing `{name}`"))
        })
    };
    let date_field = |name: &str| -> Result<chrono::NaiveDate> {
        field(name)?
            .as_str()
            .ok_or_else(|| {
                ItineraError::persistence(format!("document {id}: `{name}` is not a string"))
            })?
            .parse()
            .map_err(|e| {
                ItineraError::persistence(format!("document {id}: `{name}` is not a date: {e}"))
            })
    };

    let destination = field("destination")?
        .as_str()
        .ok_or_else(|| {
            ItineraError::persistence(format!("document {id}: `destination` is not a string"))
        })?
        .to_string();
    let interests: Vec<String> = serde_json::from_value(field("interests")?.clone())
        .map_err(|e| ItineraError::persistence(format!("document {id}: bad `interests`: {e}")))?;
    let days: Vec<DayPlan> = serde_json::from_value(field("days")?.clone())
        .map_err(|e| ItineraError::persistence(format!("document {id}: bad `days`: {e}")))?;

    Ok(Itinerary {
        id: Some(id.to_string()),
        destination,
        start_date: date_field("start_date")?,
        end_date: date_field("end_date")?,
        interests,
        days,
    })
}

fn doc_bytes(doc: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(doc)
        .map_err(|e| ItineraError::persistence(format!("failed to encode document: {e}")))
}
