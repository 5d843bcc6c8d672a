use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use exposer_core::{Error as ExposerError, TagCategory, TagCriteria};

use crate::{
    error::Result,
    payload::TagsResponse,
    state::AppState,
    util::{QueryParams, DEFAULT_AUTOCOMPLETE_LIMIT, DEFAULT_TAG_LIMIT},
};

pub fn tag_router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(get_tags))
        .route("/tags/matches", get(get_tag_matches))
        .route("/tags/autocomplete", get(autocomplete_tags))
}

async fn get_tags(State(app_state): State<AppState>, Query(params): Query<QueryParams>) -> Result<Json<TagsResponse>> {
    let criteria = TagCriteria {
        names: params.all("names"),
        category: params.parse::<i32>("category")?.map(TagCategory::from),
        limit: params.parse_or("limit", DEFAULT_TAG_LIMIT)?,
        page: params.parse_or("page", 1)?,
        order: params.get_or("order", "post_count").to_string(),
        ..Default::default()
    };

    let tags = app_state.repository.fetch_tags_by_name(&criteria).await?;
    Ok(Json(TagsResponse { tags }))
}

async fn get_tag_matches(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<TagsResponse>> {
    let criteria = TagCriteria {
        name_prefix: params.get_or("keyword", "").to_string(),
        category: params.parse::<i32>("category")?.map(TagCategory::from),
        limit: params.parse_or("limit", DEFAULT_TAG_LIMIT)?,
        page: params.parse_or("page", 1)?,
        order: params.get_or("order", "count").to_string(),
        ..Default::default()
    };
    if criteria.name_prefix.is_empty() {
        return Err(ExposerError::InvalidParameter("keyword is required".to_string()).into());
    }

    let tags = app_state.repository.fetch_tags_by_name_matches(&criteria).await?;
    Ok(Json(TagsResponse { tags }))
}

/// Short prefix lookup for search boxes: first page, most used tags first.
async fn autocomplete_tags(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<TagsResponse>> {
    let name = params.get_or("name", "");
    if name.is_empty() {
        return Err(ExposerError::InvalidParameter("name is required".to_string()).into());
    }
    let criteria = TagCriteria {
        name_prefix: name.to_string(),
        limit: DEFAULT_AUTOCOMPLETE_LIMIT,
        page: 1,
        order: "count".to_string(),
        ..Default::default()
    };

    let tags = app_state.repository.fetch_tags_by_name_matches(&criteria).await?;
    Ok(Json(TagsResponse { tags }))
}
