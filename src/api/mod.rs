//! HTTP surface for the itinerary service
//!
//! Thin DTO and routing layer over [`ItineraryService`]. Error taxonomy maps
//! to status codes here and nowhere else: validation 400, not-found 404,
//! everything else 500.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::ItineraError;
use crate::models::{DayPlan, Itinerary, ItineraryAdjustment, ItineraryRequest};
use crate::service::ItineraryService;

#[derive(Serialize, Deserialize)]
pub struct ApiDayPlan {
    pub day: u32,
    pub activities: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiItinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Vec<String>,
    pub days: Vec<ApiDayPlan>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiItineraryRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiAdjustment {
    pub instruction: String,
}

#[derive(Serialize)]
struct ApiMessage {
    message: String,
}

impl From<&Itinerary> for ApiItinerary {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            id: itinerary.id.clone(),
            destination: itinerary.destination.clone(),
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            interests: itinerary.interests.clone(),
            days: itinerary
                .days
                .iter()
                .map(|plan| ApiDayPlan {
                    day: plan.day,
                    activities: plan.activities.clone(),
                })
                .collect(),
        }
    }
}

impl From<ApiItinerary> for Itinerary {
    fn from(api: ApiItinerary) -> Self {
        Self {
            id: api.id,
            destination: api.destination,
            start_date: api.start_date,
            end_date: api.end_date,
            interests: api.interests,
            days: api
                .days
                .into_iter()
                .map(|plan| DayPlan::new(plan.day, plan.activities))
                .collect(),
        }
    }
}

impl From<ApiItineraryRequest> for ItineraryRequest {
    fn from(api: ApiItineraryRequest) -> Self {
        Self {
            destination: api.destination,
            start_date: api.start_date,
            end_date: api.end_date,
            interests: api.interests,
        }
    }
}

/// Boundary error wrapper carrying the status-code mapping
pub struct ApiError(ItineraError);

impl From<ItineraError> for ApiError {
    fn from(err: ItineraError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ItineraError::Validation { .. } => StatusCode::BAD_REQUEST,
            ItineraError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(service: Arc<ItineraryService>) -> Router {
    Router::new()
        .route("/itinerary/generate", post(generate_itinerary))
        .route("/itinerary", get(list_itineraries).post(save_itinerary))
        .route(
            "/itinerary/{id}",
            get(get_itinerary)
                .patch(adjust_itinerary)
                .delete(delete_itinerary),
        )
        .with_state(service)
}

async fn generate_itinerary(
    State(service): State<Arc<ItineraryService>>,
    Json(input): Json<ApiItineraryRequest>,
) -> Result<Json<ApiItinerary>, ApiError> {
    let itinerary = service.generate(input.into()).await?;
    Ok(Json(ApiItinerary::from(&itinerary)))
}

async fn list_itineraries(
    State(service): State<Arc<ItineraryService>>,
) -> Result<Json<Vec<ApiItinerary>>, ApiError> {
    let itineraries = service.list().await?;
    Ok(Json(itineraries.iter().map(ApiItinerary::from).collect()))
}

async fn get_itinerary(
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiItinerary>, ApiError> {
    let itinerary = service.get(&id).await?;
    Ok(Json(ApiItinerary::from(&itinerary)))
}

async fn save_itinerary(
    State(service): State<Arc<ItineraryService>>,
    Json(input): Json<ApiItinerary>,
) -> Result<(StatusCode, Json<ApiItinerary>), ApiError> {
    let saved = service.save(input.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiItinerary::from(&saved))))
}

async fn adjust_itinerary(
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<String>,
    Json(input): Json<ApiAdjustment>,
) -> Result<Json<ApiItinerary>, ApiError> {
    let adjustment = ItineraryAdjustment {
        instruction: input.instruction,
    };
    let adjusted = service.adjust(&id, adjustment).await?;
    Ok(Json(ApiItinerary::from(&adjusted)))
}

async fn delete_itinerary(
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, ApiError> {
    if service.delete(&id).await? {
        Ok(Json(ApiMessage {
            message: "Itinerary deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError(ItineraError::not_found(id)))
    }
}
