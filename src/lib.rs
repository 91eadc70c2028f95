//! cg-match - geo-proximity matching for the Caschi Gialli marketplace
//!
//! Matches clients' service requests with nearby registered providers.
//! The matching pipeline (distance, predicate, ranking, result assembly)
//! is shared by a live registry source and a synthetic fixture source.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, ResultAssembler, distance::haversine_distance};
pub use crate::models::{Coordinate, MatchCandidate, MatchDefaults, Provider, RequestStatus, SearchQuery, ServiceRequest};
pub use crate::services::{ProviderSource, RegistrySource, SourceError, SyntheticSource};
