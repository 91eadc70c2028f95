use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A point on the globe in decimal degrees
///
/// Callers guarantee `lat` in [-90, 90] and `lng` in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another coordinate in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        crate::core::distance::haversine_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Lifecycle of a service request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Completed,
}

impl RequestStatus {
    /// Whether `next` is the single legal successor of this status
    pub fn can_advance_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Accepted, RequestStatus::Completed)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
}

/// A client's posted need for a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientName", default)]
    pub client_name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: RequestStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub matches: Vec<String>,
}

impl ServiceRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Accept a pending request on behalf of a provider
    pub fn assign(&mut self, provider_id: &str) -> Result<(), StatusError> {
        self.advance(RequestStatus::Accepted)?;
        if !self.matches.iter().any(|id| id == provider_id) {
            self.matches.push(provider_id.to_string());
        }
        Ok(())
    }

    /// Mark an accepted request as completed
    pub fn complete(&mut self) -> Result<(), StatusError> {
        self.advance(RequestStatus::Completed)
    }

    fn advance(&mut self, next: RequestStatus) -> Result<(), StatusError> {
        if !self.status.can_advance_to(next) {
            return Err(StatusError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// A registered provider ("Casco Giallo")
///
/// `rating`, `review_count` and `price_range` are only present when the
/// registry supplies them. Any other field the registry sends lands in
/// `extra` and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProviderRecord")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: Coordinate,
    #[serde(rename = "serviceRadius", skip_serializing_if = "Option::is_none")]
    pub service_radius_km: Option<f64>,
    pub services: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(rename = "priceRange", skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider as registries put it on the wire
///
/// Only identity, location, radius and categories are strict. Display
/// fields of the wrong type are dropped so the record still matches.
#[derive(Deserialize)]
struct ProviderRecord {
    id: String,
    name: String,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
    location: Coordinate,
    #[serde(rename = "serviceRadius", default)]
    service_radius: Option<f64>,
    #[serde(default)]
    radius: Option<f64>,
    #[serde(default)]
    services: Option<Vec<String>>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(rename = "reviewCount", default)]
    review_count: Option<Value>,
    #[serde(rename = "priceRange", default)]
    price_range: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<ProviderRecord> for Provider {
    fn from(record: ProviderRecord) -> Self {
        // Registries may send either list, or both
        let mut services = record.services.unwrap_or_default();
        for category in record.categories.into_iter().flatten() {
            if !services.contains(&category) {
                services.push(category);
            }
        }

        Self {
            id: record.id,
            name: record.name,
            email: text(record.email).unwrap_or_default(),
            phone: text(record.phone),
            location: record.location,
            service_radius_km: record.service_radius.or(record.radius),
            services,
            description: text(record.description).unwrap_or_default(),
            rating: record.rating.and_then(|v| v.as_f64()).filter(|r| r.is_finite()),
            review_count: record.review_count.and_then(count),
            price_range: text(record.price_range),
            extra: record.extra,
        }
    }
}

fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Whole, non-negative numbers that fit a `u32`, including `312.0`
fn count(value: Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
        .map(|n| n as u32)
}

impl Provider {
    /// Service radius in km, falling back to `default_km` when unset
    pub fn radius_or(&self, default_km: f64) -> f64 {
        self.service_radius_km.unwrap_or(default_km)
    }

    pub fn offers(&self, category: &str) -> bool {
        self.services.iter().any(|s| s == category)
    }
}

/// A provider paired with its distance from the search origin
///
/// The provider's own display fields are moved into the candidate, so the
/// flattened `provider` never repeats them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    #[serde(flatten)]
    pub provider: Provider,
    /// Kilometers, rounded to one decimal
    pub distance: f64,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    #[serde(rename = "priceRange")]
    pub price_range: String,
}

/// Input of a client-seeks-providers search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin: Coordinate,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            radius: None,
            categories: None,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius = Some(radius_km);
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// The category filter, or `None` when it is absent or empty
    pub fn category_filter(&self) -> Option<&[String]> {
        self.categories
            .as_deref()
            .filter(|categories| !categories.is_empty())
    }
}

/// Radii applied when a provider or a search leaves them unset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDefaults {
    pub service_radius_km: f64,
    pub search_radius_km: f64,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        Self {
            service_radius_km: 10.0,
            search_radius_km: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending_request() -> ServiceRequest {
        ServiceRequest {
            id: "req-1".to_string(),
            client_id: "client-1".to_string(),
            client_name: "Giulia".to_string(),
            category: "Plumbing".to_string(),
            description: "Leaking sink".to_string(),
            location: Coordinate::new(41.9028, 12.4964),
            address: None,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            matches: vec![],
        }
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut request = pending_request();

        assert_eq!(
            request.complete(),
            Err(StatusError::InvalidTransition {
                from: RequestStatus::Pending,
                to: RequestStatus::Completed,
            })
        );
        assert_eq!(request.status, RequestStatus::Pending);

        request.assign("cg-1").unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);
        assert_eq!(request.matches, vec!["cg-1"]);

        assert!(request.assign("cg-2").is_err());
        assert_eq!(request.matches, vec!["cg-1"]);

        request.complete().unwrap();
        assert_eq!(request.status, RequestStatus::Completed);
        assert!(request.complete().is_err());
    }

    #[test]
    fn test_provider_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": "cg-9",
            "name": "Mario Rossi",
            "location": { "lat": 41.9, "lng": 12.5 },
            "radius": 15.0,
            "categories": ["Plumbing"],
            "vatNumber": "IT123",
        });

        let provider: Provider = serde_json::from_value(raw).unwrap();

        assert_eq!(provider.service_radius_km, Some(15.0));
        assert_eq!(provider.services, vec!["Plumbing"]);
        assert_eq!(provider.extra.get("vatNumber"), Some(&Value::from("IT123")));
        assert_eq!(provider.rating, None);
    }

    #[test]
    fn test_provider_tolerates_mistyped_display_fields() {
        let raw = serde_json::json!({
            "id": "cg-9",
            "name": "Mario Rossi",
            "description": null,
            "location": { "lat": 41.9, "lng": 12.5 },
            "serviceRadius": 12.0,
            "services": ["Plumbing"],
            "rating": "excellent",
            "reviewCount": 312.0,
            "priceRange": 25,
        });

        let provider: Provider = serde_json::from_value(raw).unwrap();

        assert_eq!(provider.rating, None);
        assert_eq!(provider.review_count, Some(312));
        assert_eq!(provider.price_range, None);
        assert_eq!(provider.description, "");
        assert!(provider.extra.is_empty());
    }

    #[test]
    fn test_fractional_review_count_is_dropped() {
        assert_eq!(count(Value::from(12.5)), None);
        assert_eq!(count(Value::from(-3)), None);
        assert_eq!(count(Value::from(40)), Some(40));
    }

    #[test]
    fn test_provider_merges_services_and_categories() {
        let raw = serde_json::json!({
            "id": "cg-9",
            "name": "Mario Rossi",
            "location": { "lat": 41.9, "lng": 12.5 },
            "serviceRadius": 12.0,
            "radius": 3.0,
            "services": ["Plumbing", "Heating"],
            "categories": ["Heating", "Locksmith"],
        });

        let provider: Provider = serde_json::from_value(raw).unwrap();

        assert_eq!(provider.services, vec!["Plumbing", "Heating", "Locksmith"]);
        assert_eq!(provider.service_radius_km, Some(12.0));
    }

    #[test]
    fn test_empty_category_filter_is_no_filter() {
        let query = SearchQuery::new(Coordinate::new(0.0, 0.0)).with_categories(Vec::<String>::new());
        assert!(query.category_filter().is_none());

        let query = query.with_categories(["Electrical"]);
        assert_eq!(query.category_filter(), Some(&["Electrical".to_string()][..]));
    }

    #[test]
    fn test_default_radii() {
        let defaults = MatchDefaults::default();
        assert_eq!(defaults.service_radius_km, 10.0);
        assert_eq!(defaults.search_radius_km, 50.0);
    }
}
