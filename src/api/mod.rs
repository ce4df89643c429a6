//! HTTP surface: router, handlers and request/response DTOs.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attractions::AttractionClient;
use crate::flights::{project_offers, FlightApiClient};
use crate::itinerary::{ItineraryStore, DEFAULT_USER_ID};
use crate::models::{Attraction, FlightQueryParams, FlightResult, LocationRef};
use crate::{TripdeskError, VERSION};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub flights: FlightApiClient,
    pub attractions: AttractionClient,
    pub store: Arc<ItineraryStore>,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub adults: u32,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
pub struct ItineraryQuery {
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct AddItineraryRequest {
    pub user_id: Option<String>,
    pub attraction: Option<Attraction>,
}

#[derive(Deserialize)]
pub struct RemoveItineraryRequest {
    pub user_id: Option<String>,
    pub attraction_name: Option<String>,
}

#[derive(Serialize)]
pub struct AttractionsResponse {
    pub success: bool,
    pub attractions: Vec<Attraction>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ItineraryResponse {
    pub success: bool,
    pub itinerary: Vec<Attraction>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ItineraryChangeResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/chat/attractions", post(chat_attractions))
        .route(
            "/itinerary",
            get(get_itinerary)
                .post(add_to_itinerary)
                .delete(remove_from_itinerary),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

/// Resolve both endpoints, query flights and project the offers.
///
/// A location that fails to resolve (unknown, or the lookup itself failed)
/// yields an empty array, never an error; a failing flight query surfaces
/// as 500.
async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<FlightResult>>, TripdeskError> {
    let Some(origin) = resolve_or_none(&state.flights, &request.origin).await else {
        return Ok(Json(Vec::new()));
    };
    let Some(destination) = resolve_or_none(&state.flights, &request.destination).await else {
        return Ok(Json(Vec::new()));
    };

    debug!(
        "searching flights {} -> {}",
        origin.localized_name, destination.localized_name
    );

    let params = FlightQueryParams::new(
        &origin,
        &destination,
        request.date,
        request.return_date,
        request.adults,
    );
    let offers = state.flights.search_flights(&params).await?;

    Ok(Json(project_offers(
        &offers,
        &request.origin,
        &request.destination,
    )))
}

/// Resolution failures are swallowed here: both "not found" and "lookup
/// failed" degrade the search to an empty result, logged differently.
async fn resolve_or_none(flights: &FlightApiClient, location: &str) -> Option<LocationRef> {
    match flights.resolve_location(location).await {
        Ok(Some(resolved)) => Some(resolved),
        Ok(None) => {
            debug!("location not found: {location:?}");
            None
        }
        Err(e) => {
            warn!("location lookup failed for {location:?}: {e}");
            None
        }
    }
}

async fn chat_attractions(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AttractionsResponse>, TripdeskError> {
    let attractions = state.attractions.generate(&request.message).await?;
    let count = attractions.len();
    Ok(Json(AttractionsResponse {
        success: true,
        attractions,
        count,
    }))
}

async fn get_itinerary(
    State(state): State<AppState>,
    Query(query): Query<ItineraryQuery>,
) -> Json<ItineraryResponse> {
    let user_id = user_or_default(query.user_id);
    let itinerary = state.store.list(&user_id);
    let count = itinerary.len();
    Json(ItineraryResponse {
        success: true,
        itinerary,
        count,
    })
}

async fn add_to_itinerary(
    State(state): State<AppState>,
    Json(request): Json<AddItineraryRequest>,
) -> Result<Json<ItineraryChangeResponse>, TripdeskError> {
    let user_id = user_or_default(request.user_id);
    let attraction = request
        .attraction
        .ok_or_else(|| TripdeskError::validation("attraction is required"))?;

    let name = attraction.name.clone();
    let count = state.store.add(&user_id, attraction)?;
    Ok(Json(ItineraryChangeResponse {
        success: true,
        message: format!("'{name}' added to itinerary"),
        count,
    }))
}

async fn remove_from_itinerary(
    State(state): State<AppState>,
    Json(request): Json<RemoveItineraryRequest>,
) -> Result<Json<ItineraryChangeResponse>, TripdeskError> {
    let user_id = user_or_default(request.user_id);
    let name = request
        .attraction_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TripdeskError::validation("attraction_name is required"))?;

    let count = state.store.remove(&user_id, &name)?;
    Ok(Json(ItineraryChangeResponse {
        success: true,
        message: format!("'{name}' removed from itinerary"),
        count,
    }))
}

fn user_or_default(user_id: Option<String>) -> String {
    user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_or_default() {
        assert_eq!(user_or_default(None), DEFAULT_USER_ID);
        assert_eq!(user_or_default(Some(String::new())), DEFAULT_USER_ID);
        assert_eq!(user_or_default(Some("alice".into())), "alice");
    }

    #[test]
    fn test_search_request_accepts_camel_case_return_date() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"origin": "Berlin", "destination": "Lisbon",
                "date": "2026-09-15", "returnDate": "2026-09-22", "adults": 2}"#,
        )
        .unwrap();
        assert_eq!(request.return_date.as_deref(), Some("2026-09-22"));
    }

    #[test]
    fn test_search_request_return_date_optional() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"origin": "Berlin", "destination": "Lisbon", "date": "2026-09-15", "adults": 1}"#,
        )
        .unwrap();
        assert!(request.return_date.is_none());
    }
}
