// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, MatchCandidate, MatchDefaults, Provider, RequestStatus, SearchQuery, ServiceRequest, StatusError};
pub use requests::{FindOpportunitiesRequest, SearchProvidersRequest};
pub use responses::{ErrorResponse, FindOpportunitiesResponse, HealthResponse, SearchProvidersResponse};
