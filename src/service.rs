//! Itinerary orchestration service
//!
//! Composes the prompt builders, the text-generation provider, the
//! extractor, and the document store into the create/read/update/delete
//! operations exposed over HTTP. The provider and store handles are
//! injected at construction and live for the service's lifetime.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::models::{Itinerary, ItineraryAdjustment, ItineraryRequest};
use crate::provider::TextGenerator;
use crate::store::ItineraryStore;
use crate::{ItineraError, Result, extract, prompt};

pub struct ItineraryService {
    generator: Arc<dyn TextGenerator>,
    store: ItineraryStore,
    temperature: f32,
}

impl ItineraryService {
    pub fn new(generator: Arc<dyn TextGenerator>, store: ItineraryStore, temperature: f32) -> Self {
        Self {
            generator,
            store,
            temperature,
        }
    }

    /// Generate an unpersisted itinerary for the given trip parameters.
    ///
    /// An empty extraction result means "no itinerary produced" and is
    /// returned as an itinerary with no day plans, not as an error.
    #[instrument(skip(self), fields(destination = %request.destination))]
    pub async fn generate(&self, request: ItineraryRequest) -> Result<Itinerary> {
        request.validate()?;

        let prompt = prompt::generation_prompt(&request);
        let max_output_tokens = prompt::max_output_tokens(request.num_days());
        let response = self
            .generator
            .generate(&prompt, max_output_tokens, self.temperature)
            .await?;
        let text = response.require_text()?;

        let days = extract::extract_day_plans(&text)?;
        if days.is_empty() {
            warn!(
                "Generator produced no day plans for {}",
                request.destination
            );
        }
        Ok(Itinerary::from_request(request, days))
    }

    /// Persist an itinerary. A first save assigns the identifier; saving an
    /// already-identified itinerary updates it in place and never reassigns
    /// the identifier.
    #[instrument(skip(self, itinerary))]
    pub async fn save(&self, mut itinerary: Itinerary) -> Result<Itinerary> {
        itinerary.validate()?;

        match itinerary.id.clone() {
            None => {
                let id = self.store.insert(&itinerary).await?;
                info!("Saved itinerary {}", id);
                itinerary.id = Some(id);
                Ok(itinerary)
            }
            Some(id) => {
                if self.store.update_one(&id, &itinerary).await? == 0 {
                    return Err(ItineraError::not_found(id));
                }
                Ok(itinerary)
            }
        }
    }

    /// Load one itinerary by identifier
    pub async fn get(&self, id: &str) -> Result<Itinerary> {
        self.store
            .find_one(id)
            .await?
            .ok_or_else(|| ItineraError::not_found(id))
    }

    /// Load every stored itinerary, tolerating malformed documents
    pub async fn list(&self) -> Result<Vec<Itinerary>> {
        self.store.find_all().await
    }

    /// Delete an itinerary. Returns whether a document was removed; an
    /// unknown identifier is `false`, not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.store.delete_one(id).await? > 0)
    }

    /// Rework an itinerary's activities from a free-text instruction.
    ///
    /// Identifier, destination, dates, and interests are preserved; only the
    /// day-plan sequence changes. An empty extraction leaves the existing
    /// day plans in place, keeping the day count stable.
    #[instrument(skip(self, adjustment))]
    pub async fn adjust(&self, id: &str, adjustment: ItineraryAdjustment) -> Result<Itinerary> {
        let current = self.get(id).await?;

        let prompt = prompt::adjustment_prompt(&current, &adjustment.instruction);
        let response = self
            .generator
            .generate(&prompt, prompt::MODEL_MAX_OUTPUT_TOKENS, self.temperature)
            .await?;
        let text = response.require_text()?;

        let days = extract::extract_day_plans(&text)?;
        let updated = if days.is_empty() {
            warn!("Adjustment produced no day plans for {}, keeping current", id);
            current.clone()
        } else {
            current.with_days(days)
        };

        if self.store.update_one(id, &updated).await? == 0 {
            return Err(ItineraError::not_found(id));
        }
        Ok(updated)
    }
}
