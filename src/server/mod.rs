pub mod handlers;
pub mod types;

use crate::{Result, config::Config};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

/// Builds the application router: the frontend, its static assets and the
/// chemistry API.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/predict_bonds", post(handlers::predict_bonds))
        .route("/api/get_fun_fact", post(handlers::get_fun_fact))
        .route("/api/get_molecule_info", post(handlers::get_molecule_info))
        .route("/api/analyze_structure", post(handlers::analyze_structure))
        .nest_service("/static", static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = AppState::from_config(&config);
    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
