pub mod artist;
pub mod post;
pub mod tag;

use axum::{response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{payload::HealthResponse, state::AppState};

pub fn app_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(post::post_router())
        .merge(tag::tag_router())
        .merge(artist::artist_router());

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "exposer",
    })
}
