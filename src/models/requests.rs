use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Coordinate, Provider, SearchQuery, ServiceRequest};

/// Request to search providers around an origin
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchProvidersRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl SearchProvidersRequest {
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            origin: Coordinate::new(self.lat, self.lng),
            radius: self.radius,
            categories: self.categories.clone(),
        }
    }
}

/// Request to list the open requests a provider can take
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindOpportunitiesRequest {
    #[validate(custom(function = "validate_provider"))]
    pub provider: Provider,
    #[validate(custom(function = "validate_request_locations"))]
    #[serde(default)]
    pub requests: Vec<ServiceRequest>,
}

fn validate_provider(provider: &Provider) -> Result<(), ValidationError> {
    if !is_valid_coordinate(&provider.location) {
        return Err(ValidationError::new("provider_location_out_of_range"));
    }
    if provider.service_radius_km.is_some_and(|radius| radius <= 0.0) {
        return Err(ValidationError::new("service_radius_must_be_positive"));
    }
    Ok(())
}

fn validate_request_locations(requests: &[ServiceRequest]) -> Result<(), ValidationError> {
    if let Some(request) = requests.iter().find(|r| !is_valid_coordinate(&r.location)) {
        let mut error = ValidationError::new("request_location_out_of_range");
        error.add_param("id".into(), &request.id);
        return Err(error);
    }
    Ok(())
}

fn is_valid_coordinate(coordinate: &Coordinate) -> bool {
    (-90.0..=90.0).contains(&coordinate.lat) && (-180.0..=180.0).contains(&coordinate.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_validation() {
        let ok = SearchProvidersRequest {
            lat: 41.9028,
            lng: 12.4964,
            radius: Some(20.0),
            categories: None,
        };
        assert!(ok.validate().is_ok());

        let bad_lat = SearchProvidersRequest { lat: 91.0, ..ok.clone() };
        assert!(bad_lat.validate().is_err());

        let bad_radius = SearchProvidersRequest { radius: Some(0.0), ..ok };
        assert!(bad_radius.validate().is_err());
    }

    fn opportunities(provider: serde_json::Value, request_location: serde_json::Value) -> FindOpportunitiesRequest {
        serde_json::from_value(serde_json::json!({
            "provider": provider,
            "requests": [{
                "id": "r-1",
                "clientId": "client-1",
                "category": "Plumbing",
                "location": request_location,
                "status": "pending",
                "createdAt": "2026-10-01T09:00:00Z",
            }],
        }))
        .unwrap()
    }

    fn provider_json(radius: f64) -> serde_json::Value {
        serde_json::json!({
            "id": "cg-1",
            "name": "Marco Rossi",
            "location": { "lat": 41.9109, "lng": 12.4818 },
            "serviceRadius": radius,
            "services": ["Plumbing"],
        })
    }

    #[test]
    fn test_opportunities_validation() {
        let ok = opportunities(provider_json(10.0), serde_json::json!({ "lat": 41.912, "lng": 12.4818 }));
        assert!(ok.validate().is_ok());

        let zero_radius = opportunities(provider_json(0.0), serde_json::json!({ "lat": 41.912, "lng": 12.4818 }));
        assert!(zero_radius.validate().is_err());

        let bad_request = opportunities(provider_json(10.0), serde_json::json!({ "lat": 123.0, "lng": 500.0 }));
        let errors = bad_request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("requests"));
    }

    #[test]
    fn test_search_request_uses_camel_case_wire_format() {
        let req: SearchProvidersRequest = serde_json::from_value(serde_json::json!({
            "lat": 41.9,
            "lng": 12.5,
            "categories": ["Plumbing"],
        }))
        .unwrap();

        let query = req.to_query();
        assert_eq!(query.radius, None);
        assert_eq!(query.category_filter(), Some(&["Plumbing".to_string()][..]));
    }
}
