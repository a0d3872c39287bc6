use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::predict::Sgp4Propagator;
use crate::registry::{load_tle_folder, InMemoryRegistry};
use crate::service::GroundTrackService;

use super::api::health as health_handlers;
use super::api::satellites as satellite_handlers;
use super::api::tracks as track_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::ui::handlers as ui_handlers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<InMemoryRegistry>,
    pub service: Arc<GroundTrackService<Sgp4Propagator>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let registry = InMemoryRegistry::new();
        if let Some(ref registry_config) = config.registry {
            if let Err(e) = load_tle_folder(&registry, &registry_config.tle_folder) {
                log::warn!("Failed to seed satellite registry: {}", e);
            }
        }

        let service = GroundTrackService::new(Sgp4Propagator, config.plot.clone());

        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::index))
        .route("/api/health", get(health_handlers::health))
        // Registry
        .route(
            "/api/satellites",
            get(satellite_handlers::list_satellites).post(satellite_handlers::add_satellite),
        )
        .route(
            "/api/satellites/{id}",
            get(satellite_handlers::get_satellite).delete(satellite_handlers::delete_satellite),
        )
        // Propagation
        .route(
            "/api/satellites/{id}/groundtrack",
            get(track_handlers::satellite_ground_track),
        )
        .route("/api/track", post(track_handlers::track))
        .route("/api/groundtrack", post(track_handlers::ground_track))
        .route("/api/tracks", get(track_handlers::all_tracks))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = AppState::new(config);
    let bind_addr = state.config.web.bind.clone();

    log::info!(
        "Starting server on {} with {} registered satellites",
        bind_addr,
        state.registry.len()
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}
