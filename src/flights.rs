//! Sky-scrapper flight API client: location resolution, flight search and
//! projection of raw offers into the `/search` display schema.

use crate::config::FlightApiConfig;
use crate::models::{FlightQueryParams, FlightResult, LocationRef};
use crate::Result;
use crate::TripdeskError;
use tracing::{debug, warn};

/// Client for the sky-scrapper flight-search API (RapidAPI).
#[derive(Debug, Clone)]
pub struct FlightApiClient {
    http: reqwest::Client,
    config: FlightApiConfig,
}

impl FlightApiClient {
    pub fn new(http: reqwest::Client, config: FlightApiConfig) -> Self {
        Self { http, config }
    }

    /// Resolve a free-text place name into flight routing identifiers.
    ///
    /// Only the first search result is used, relying on upstream's default
    /// ranking. `Ok(None)` means the upstream answered but had no usable
    /// result ("not found"); a transport or HTTP failure is an `Err`, so
    /// callers can tell the two apart.
    pub async fn resolve_location(&self, location: &str) -> Result<Option<LocationRef>> {
        let url = format!("{}/api/v1/flights/searchAirport", self.config.base_url);
        let response = self
            .http
            .get(url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.host)
            .query(&[("query", location), ("locale", "en-US")])
            .send()
            .await?
            .error_for_status()?;

        let body: skyscrapper::AirportSearchResponse = response
            .json()
            .await
            .map_err(|e| TripdeskError::upstream(format!("airport search response: {e}")))?;

        let params = body
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|entry| entry.navigation)
            .and_then(|nav| nav.relevant_flight_params);

        let Some(params) = params else {
            debug!("no airport match for {location:?}");
            return Ok(None);
        };

        match (params.sky_id, params.entity_id, params.localized_name) {
            (Some(sky_id), Some(entity_id), Some(localized_name)) => Ok(Some(LocationRef {
                sky_id,
                entity_id,
                localized_name,
            })),
            _ => {
                debug!("incomplete flight params for {location:?}");
                Ok(None)
            }
        }
    }

    /// Run one flight search and return the raw offer list.
    ///
    /// A response without the top-level `data` key degrades to an empty
    /// list (logged), matching the contract that `/search` never errors on
    /// thin upstream payloads.
    pub async fn search_flights(
        &self,
        params: &FlightQueryParams,
    ) -> Result<Vec<skyscrapper::RawOffer>> {
        let url = format!("{}/api/v1/flights/searchFlights", self.config.base_url);
        let response = self
            .http
            .get(url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.host)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body: skyscrapper::FlightSearchResponse = response
            .json()
            .await
            .map_err(|e| TripdeskError::upstream(format!("flight search response: {e}")))?;

        match body.data {
            Some(data) => Ok(data.results),
            None => {
                warn!("flight search response missing 'data'");
                Ok(Vec::new())
            }
        }
    }
}

/// Project raw offers into the display schema.
///
/// Every nested field is optional upstream; a missing key degrades to the
/// documented default instead of failing the request. `origin` and
/// `destination` echo the client's free-text inputs.
pub fn project_offers(
    offers: &[skyscrapper::RawOffer],
    origin: &str,
    destination: &str,
) -> Vec<FlightResult> {
    offers
        .iter()
        .map(|offer| {
            let first_leg = offer.legs.as_deref().and_then(|legs| legs.first());
            let airline = first_leg
                .and_then(|leg| leg.carriers.as_ref())
                .and_then(skyscrapper::RawCarriers::first_name)
                .unwrap_or_else(|| "Unknown".to_string());

            FlightResult {
                airline,
                origin: origin.to_string(),
                destination: destination.to_string(),
                departure_time: first_leg
                    .and_then(|leg| leg.departure.clone())
                    .unwrap_or_default(),
                arrival_time: first_leg
                    .and_then(|leg| leg.arrival.clone())
                    .unwrap_or_default(),
                price: offer
                    .price
                    .as_ref()
                    .and_then(|p| p.formatted.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
            }
        })
        .collect()
}

/// Sky-scrapper API response structures.
///
/// Upstream deployments disagree on parts of this schema, so the structs are
/// deliberately loose: every field is optional and known aliases are
/// accepted rather than picking one variant as authoritative.
pub mod skyscrapper {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct AirportSearchResponse {
        pub data: Option<Vec<AirportEntry>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirportEntry {
        pub navigation: Option<Navigation>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Navigation {
        pub relevant_flight_params: Option<RelevantFlightParams>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RelevantFlightParams {
        pub sky_id: Option<String>,
        pub entity_id: Option<String>,
        pub localized_name: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct FlightSearchResponse {
        pub data: Option<FlightData>,
    }

    /// Offer container; some deployments call the list `results`, others
    /// `itineraries`. Both are accepted as the same field.
    #[derive(Debug, Deserialize)]
    pub struct FlightData {
        #[serde(default, alias = "itineraries")]
        pub results: Vec<RawOffer>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RawOffer {
        pub legs: Option<Vec<RawLeg>>,
        pub price: Option<RawPrice>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RawLeg {
        pub carriers: Option<RawCarriers>,
        pub departure: Option<String>,
        pub arrival: Option<String>,
    }

    /// Carrier list, either bare (`[{name}]`) or nested under `marketing`.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum RawCarriers {
        List(Vec<RawCarrier>),
        Marketing { marketing: Vec<RawCarrier> },
    }

    impl RawCarriers {
        /// Name of the first carrier, if any.
        pub fn first_name(&self) -> Option<String> {
            let carriers = match self {
                RawCarriers::List(list) => list,
                RawCarriers::Marketing { marketing } => marketing,
            };
            carriers.first().and_then(|c| c.name.clone())
        }
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RawCarrier {
        pub name: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RawPrice {
        pub formatted: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::skyscrapper::*;
    use super::*;

    fn offer_from_json(json: &str) -> RawOffer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_project_full_offer() {
        let offer = offer_from_json(
            r#"{
                "legs": [{
                    "carriers": [{"name": "Lufthansa"}],
                    "departure": "2026-09-15T08:30:00",
                    "arrival": "2026-09-15T11:45:00"
                }],
                "price": {"formatted": "$412"}
            }"#,
        );

        let results = project_offers(&[offer], "Berlin", "Lisbon");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].airline, "Lufthansa");
        assert_eq!(results[0].origin, "Berlin");
        assert_eq!(results[0].destination, "Lisbon");
        assert_eq!(results[0].departure_time, "2026-09-15T08:30:00");
        assert_eq!(results[0].arrival_time, "2026-09-15T11:45:00");
        assert_eq!(results[0].price, "$412");
    }

    #[test]
    fn test_project_empty_offer_uses_defaults() {
        let offer = offer_from_json("{}");

        let results = project_offers(&[offer], "A", "B");
        assert_eq!(results[0].airline, "Unknown");
        assert_eq!(results[0].departure_time, "");
        assert_eq!(results[0].arrival_time, "");
        assert_eq!(results[0].price, "N/A");
    }

    #[test]
    fn test_project_missing_price_formatted() {
        let offer = offer_from_json(r#"{"legs": [], "price": {}}"#);
        let results = project_offers(&[offer], "A", "B");
        assert_eq!(results[0].price, "N/A");
    }

    #[test]
    fn test_project_nested_marketing_carriers() {
        let offer = offer_from_json(
            r#"{"legs": [{"carriers": {"marketing": [{"name": "KLM"}, {"name": "Delta"}]}}]}"#,
        );
        let results = project_offers(&[offer], "A", "B");
        assert_eq!(results[0].airline, "KLM");
    }

    #[test]
    fn test_project_carrier_without_name() {
        let offer = offer_from_json(r#"{"legs": [{"carriers": [{}]}]}"#);
        let results = project_offers(&[offer], "A", "B");
        assert_eq!(results[0].airline, "Unknown");
    }

    #[test]
    fn test_project_preserves_offer_count() {
        let offers: Vec<RawOffer> = (0..5).map(|_| offer_from_json("{}")).collect();
        assert_eq!(project_offers(&offers, "A", "B").len(), 5);
    }

    #[test]
    fn test_flight_data_accepts_itineraries_alias() {
        let with_results: FlightSearchResponse =
            serde_json::from_str(r#"{"data": {"results": [{}, {}]}}"#).unwrap();
        assert_eq!(with_results.data.unwrap().results.len(), 2);

        let with_itineraries: FlightSearchResponse =
            serde_json::from_str(r#"{"data": {"itineraries": [{}]}}"#).unwrap();
        assert_eq!(with_itineraries.data.unwrap().results.len(), 1);
    }

    #[test]
    fn test_flight_data_missing_list_defaults_empty() {
        let response: FlightSearchResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(response.data.unwrap().results.is_empty());
    }

    #[test]
    fn test_airport_response_deserializes_relevant_params() {
        let json = r#"{
            "data": [{
                "navigation": {
                    "relevantFlightParams": {
                        "skyId": "NYCA",
                        "entityId": "27537542",
                        "localizedName": "New York"
                    }
                }
            }]
        }"#;
        let response: AirportSearchResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        let params = data[0]
            .navigation
            .as_ref()
            .unwrap()
            .relevant_flight_params
            .as_ref()
            .unwrap();
        assert_eq!(params.sky_id.as_deref(), Some("NYCA"));
        assert_eq!(params.entity_id.as_deref(), Some("27537542"));
    }
}
