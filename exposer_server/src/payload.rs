use serde::Serialize;

use exposer_core::{Artist, Post, Tag};

#[derive(Debug, Clone, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
