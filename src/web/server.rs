use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::catalog as catalog_handlers;
use super::api::position as position_handlers;
use super::api::proximity as proximity_handlers;
use super::api::status as status_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status_handlers::root))
        .route("/status", get(status_handlers::status))
        // Catalog
        .route("/api/orbits", get(catalog_handlers::list_orbits))
        .route("/api/orbits/{id}", get(catalog_handlers::get_orbit))
        .route("/api/satellites", get(catalog_handlers::list_satellites))
        .route("/api/satellites/{id}", get(catalog_handlers::get_satellite))
        // Position and proximity
        .route(
            "/api/satellites/{id}/position",
            get(position_handlers::get_position),
        )
        .route(
            "/api/proximities",
            get(proximity_handlers::list_proximities),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = AppState::from_config(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let bind_addr = state.config.web.bind.clone();
    log::info!(
        "Proximity threshold {} km, step limit {:?}",
        state.detector.settings().threshold_km,
        state.detector.settings().max_steps
    );

    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
