use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use exposer_core::ArtistCriteria;

use crate::{
    error::Result,
    payload::ArtistsResponse,
    state::AppState,
    util::{QueryParams, DEFAULT_ARTIST_LIMIT},
};

pub fn artist_router() -> Router<AppState> {
    Router::new().route("/artists", get(get_artists))
}

async fn get_artists(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ArtistsResponse>> {
    let criteria = ArtistCriteria {
        name: params.get_or("name", "").to_string(),
        limit: params.parse_or("limit", DEFAULT_ARTIST_LIMIT)?,
        page: params.parse_or("page", 1)?,
    };

    let artists = app_state.repository.fetch_artists(&criteria).await?;
    Ok(Json(ArtistsResponse { artists }))
}
