//! Core data model for the `Tripdesk` service

use serde::{Deserialize, Serialize};

/// Flight routing identifiers for a resolved location.
///
/// Derived from the airport-search upstream; ephemeral, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub sky_id: String,
    pub entity_id: String,
    pub localized_name: String,
}

/// Query parameters for one flight search, built per request.
///
/// Field names match the upstream querystring exactly, so the struct can be
/// handed to `reqwest`'s `.query()` as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQueryParams {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub origin_entity_id: String,
    pub destination_entity_id: String,
    pub date: String,
    pub return_date: String,
    pub cabin_class: String,
    pub adults: u32,
    pub sort_by: String,
    pub currency: String,
    pub market: String,
    pub country_code: String,
}

impl FlightQueryParams {
    /// Build query parameters from two resolved locations and the client's
    /// trip inputs. Cabin class, sorting and market settings are fixed.
    pub fn new(
        origin: &LocationRef,
        destination: &LocationRef,
        date: String,
        return_date: Option<String>,
        adults: u32,
    ) -> Self {
        Self {
            origin_sky_id: origin.sky_id.clone(),
            destination_sky_id: destination.sky_id.clone(),
            origin_entity_id: origin.entity_id.clone(),
            destination_entity_id: destination.entity_id.clone(),
            date,
            return_date: return_date.unwrap_or_default(),
            cabin_class: "economy".to_string(),
            adults,
            sort_by: "best".to_string(),
            currency: "USD".to_string(),
            market: "en-US".to_string(),
            country_code: "US".to_string(),
        }
    }
}

/// One flight offer, projected into the display schema returned by `/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResult {
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: String,
}

/// An attraction as produced by the LLM and stored in itineraries.
///
/// The `opening-hours` key (hyphenated) comes from the LLM output contract
/// and is kept as the wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, rename = "opening-hours")]
    pub opening_hours: String,
    #[serde(default)]
    pub ticket_price: String,
    #[serde(default)]
    pub website_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_fixed_fields() {
        let origin = LocationRef {
            sky_id: "NYCA".into(),
            entity_id: "27537542".into(),
            localized_name: "New York".into(),
        };
        let destination = LocationRef {
            sky_id: "LOND".into(),
            entity_id: "27544008".into(),
            localized_name: "London".into(),
        };

        let params =
            FlightQueryParams::new(&origin, &destination, "2026-09-15".into(), None, 2);
        assert_eq!(params.cabin_class, "economy");
        assert_eq!(params.sort_by, "best");
        assert_eq!(params.currency, "USD");
        assert_eq!(params.market, "en-US");
        assert_eq!(params.country_code, "US");
        assert_eq!(params.return_date, "");
        assert_eq!(params.adults, 2);
    }

    #[test]
    fn test_query_params_serialize_camel_case() {
        let origin = LocationRef {
            sky_id: "NYCA".into(),
            entity_id: "1".into(),
            localized_name: "New York".into(),
        };
        let destination = LocationRef {
            sky_id: "LOND".into(),
            entity_id: "2".into(),
            localized_name: "London".into(),
        };
        let params = FlightQueryParams::new(
            &origin,
            &destination,
            "2026-09-15".into(),
            Some("2026-09-22".into()),
            1,
        );

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["originSkyId"], "NYCA");
        assert_eq!(value["destinationEntityId"], "2");
        assert_eq!(value["returnDate"], "2026-09-22");
        assert_eq!(value["countryCode"], "US");
    }

    #[test]
    fn test_attraction_wire_names() {
        let json = r#"{
            "name": "Louvre Museum",
            "description": "World's largest art museum",
            "address": "Rue de Rivoli, 75001 Paris",
            "opening-hours": "9:00-18:00, closed Tuesdays",
            "ticket_price": "22 EUR",
            "website_url": "https://www.louvre.fr"
        }"#;

        let attraction: Attraction = serde_json::from_str(json).unwrap();
        assert_eq!(attraction.opening_hours, "9:00-18:00, closed Tuesdays");

        let back = serde_json::to_value(&attraction).unwrap();
        assert!(back.get("opening-hours").is_some());
        assert!(back.get("opening_hours").is_none());
    }

    #[test]
    fn test_attraction_missing_fields_default_empty() {
        let attraction: Attraction = serde_json::from_str(r#"{"name": "Eiffel Tower"}"#).unwrap();
        assert_eq!(attraction.name, "Eiffel Tower");
        assert_eq!(attraction.description, "");
        assert_eq!(attraction.website_url, "");
    }
}
