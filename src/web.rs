use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};
use crate::attractions::AttractionClient;
use crate::config::TripdeskConfig;
use crate::flights::FlightApiClient;
use crate::itinerary::ItineraryStore;

pub async fn run(config: TripdeskConfig) -> anyhow::Result<()> {
    let http = reqwest::Client::new();
    let state = AppState {
        flights: FlightApiClient::new(http.clone(), config.flight_api.clone()),
        attractions: AttractionClient::new(http, config.llm.clone()),
        store: Arc::new(ItineraryStore::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Tripdesk running at http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
