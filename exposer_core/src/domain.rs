// Upstream-agnostic entities handed to callers of `PostRepository`.
// They are serialized as-is by the server, so their field names are the public response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// In upstream order. Never null, may be empty.
    pub tags: Vec<String>,
    pub rating: String,
    pub score: i32,
    /// `None` when the upstream gave no parsable upload time.
    pub uploaded_at: Option<DateTime<Utc>>,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Echo of a prefix search. Input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_matches: Option<String>,
    pub post_count: i64,
    pub category: TagCategory,
    /// Sort order hint. Input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Tag category as the upstream numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum TagCategory {
    General,
    Artist,
    Copyright,
    Character,
    Meta,
    Unknown(i32),
}

impl From<i32> for TagCategory {
    fn from(value: i32) -> Self {
        match value {
            0 => TagCategory::General,
            1 => TagCategory::Artist,
            3 => TagCategory::Copyright,
            4 => TagCategory::Character,
            5 => TagCategory::Meta,
            other => TagCategory::Unknown(other),
        }
    }
}

impl From<TagCategory> for i32 {
    fn from(category: TagCategory) -> Self {
        match category {
            TagCategory::General => 0,
            TagCategory::Artist => 1,
            TagCategory::Copyright => 3,
            TagCategory::Character => 4,
            TagCategory::Meta => 5,
            TagCategory::Unknown(other) => other,
        }
    }
}

impl Display for TagCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TagCategory::General => write!(f, "general"),
            TagCategory::Artist => write!(f, "artist"),
            TagCategory::Copyright => write!(f, "copyright"),
            TagCategory::Character => write!(f, "character"),
            TagCategory::Meta => write!(f, "meta"),
            TagCategory::Unknown(n) => write!(f, "unknown({})", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    /// Insertion order as provided; duplicates are kept.
    pub other_names: Vec<String>,
    pub group_name: String,
    pub url: String,
    pub post_count: i64,
}
