use chrono::{DateTime, Utc};

use danbooru_client::{ArtistResult, PostResult, TagResult};
use exposer_core::{Artist, Post, Tag, TagCategory};

pub fn map_post(post: PostResult) -> Post {
    Post {
        id: post.id,
        tags: post.tag_string.split_whitespace().map(|tag| tag.to_string()).collect(),
        rating: post.rating,
        score: post.score,
        uploaded_at: post.created_at.as_deref().and_then(parse_timestamp),
        file_url: post.file_url,
    }
}

pub fn map_tag(tag: TagResult) -> Tag {
    Tag {
        id: tag.id,
        name: tag.name,
        name_matches: None,
        post_count: tag.post_count,
        category: TagCategory::from(tag.category),
        order: None,
    }
}

pub fn map_artist(artist: ArtistResult) -> Artist {
    Artist {
        id: artist.id,
        name: artist.name,
        other_names: artist.other_names,
        group_name: artist.group_name,
        url: artist.url,
        post_count: artist.post_count,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc))
}
