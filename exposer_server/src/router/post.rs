use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use exposer_core::{Error as ExposerError, PostCriteria};

use crate::{
    error::Result,
    payload::{PostResponse, PostsResponse},
    state::AppState,
    util::{QueryParams, DEFAULT_POST_LIMIT},
};

pub fn post_router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/random", get(random_post))
        .route("/posts/:id", get(get_post))
}

async fn list_posts(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PostsResponse>> {
    let criteria = PostCriteria {
        tags: params.all("tags"),
        page: params.parse_or("page", 1)?,
        limit: params.parse_or("limit", DEFAULT_POST_LIMIT)?,
        random: false,
    };

    let posts = app_state.repository.fetch_posts(&criteria).await?;
    Ok(Json(PostsResponse { posts }))
}

async fn random_post(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PostResponse>> {
    let criteria = PostCriteria {
        tags: params.all("tags"),
        page: 1,
        limit: 1,
        random: true,
    };

    let post = app_state
        .repository
        .fetch_posts(&criteria)
        .await?
        .into_iter()
        .next()
        .ok_or(ExposerError::ObjectNotFound(format!("Random post for {:?}", criteria.tags)))?;
    Ok(Json(PostResponse { post }))
}

async fn get_post(State(app_state): State<AppState>, Path(id): Path<String>) -> Result<Json<PostResponse>> {
    let id = id
        .parse::<i64>()
        .map_err(|_| ExposerError::InvalidParameter("post id".to_string()))?;

    let post = app_state.repository.fetch_post_by_id(id).await?;
    Ok(Json(PostResponse { post }))
}
