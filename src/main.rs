use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use cg_match::config::Settings;
use cg_match::core::Matcher;
use cg_match::routes::{self, matches::AppState};
use cg_match::services::build_source;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting Caschi Gialli matching service...");

    let source = build_source(&settings).map_err(|e| {
        error!("Failed to initialise provider source: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Provider source initialized: {}", source.name());

    let defaults = settings.matching.defaults();
    let matcher = Matcher::new(defaults);

    info!(
        "Matcher initialized (service radius: {} km, search radius: {} km)",
        defaults.service_radius_km, defaults.search_radius_km
    );

    let app_state = AppState { source, matcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
