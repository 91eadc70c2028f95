use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, FindOpportunitiesRequest, FindOpportunitiesResponse, HealthResponse,
    SearchProvidersRequest, SearchProvidersResponse,
};
use crate::services::ProviderSource;
use crate::core::Matcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ProviderSource>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/providers/search", web::post().to(search_providers))
        .route("/requests/opportunities", web::post().to(find_opportunities));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Search providers endpoint
///
/// POST /api/v1/providers/search
///
/// Request body:
/// ```json
/// {
///   "lat": 41.9028,
///   "lng": 12.4964,
///   "radius": 50,
///   "categories": ["Plumbing"]
/// }
/// ```
async fn search_providers(
    state: web::Data<AppState>,
    req: web::Json<SearchProvidersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for provider search: {}", errors);
        return validation_failed(errors);
    }

    let query = req.to_query();

    tracing::info!(
        "Searching providers near ({}, {}) radius={:?} categories={:?} via {} source",
        query.origin.lat,
        query.origin.lng,
        query.radius,
        query.categories,
        state.source.name()
    );

    match state.source.search(&query).await {
        Ok(providers) => {
            let total_results = providers.len();
            tracing::info!("Returning {} providers", total_results);
            HttpResponse::Ok().json(SearchProvidersResponse {
                providers,
                total_results,
            })
        }
        Err(e) => {
            tracing::error!("Provider search failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "search_failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Find opportunities endpoint
///
/// POST /api/v1/requests/opportunities
///
/// Request body:
/// ```json
/// {
///   "provider": { "id": "cg-001", "name": "...", "location": { "lat": 41.9, "lng": 12.5 }, "serviceRadius": 10, "services": ["Plumbing"] },
///   "requests": [ ... ]
/// }
/// ```
async fn find_opportunities(
    state: web::Data<AppState>,
    req: web::Json<FindOpportunitiesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for opportunities request: {}", errors);
        return validation_failed(errors);
    }

    let FindOpportunitiesRequest { provider, requests } = req.into_inner();
    let submitted = requests.len();

    let requests = state.matcher.find_opportunities(&provider, requests);

    tracing::info!(
        "Provider {} qualifies for {} of {} requests",
        provider.id,
        requests.len(),
        submitted
    );

    HttpResponse::Ok().json(FindOpportunitiesResponse {
        total_results: requests.len(),
        requests,
    })
}
