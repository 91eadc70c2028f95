use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchCandidate, ServiceRequest};

/// Response for the provider search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProvidersResponse {
    pub providers: Vec<MatchCandidate>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the opportunities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOpportunitiesResponse {
    pub requests: Vec<ServiceRequest>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub source: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
