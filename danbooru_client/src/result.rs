use serde::{Deserialize, Serialize};

/// A post as returned by `/posts.json` and `/posts/{id}.json`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PostResult {
    pub id: i64,
    /// ISO 8601 timestamp, e.g. `2024-01-05T10:21:44.553-05:00`.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Missing for posts the account is not allowed to see in full.
    #[serde(default)]
    pub file_url: String,
    /// Space-delimited tag list.
    pub tag_string: String,
    pub rating: String,
    pub score: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TagResult {
    pub id: i64,
    pub name: String,
    pub post_count: i64,
    pub category: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ArtistResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub other_names: Vec<String>,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub post_count: i64,
}
