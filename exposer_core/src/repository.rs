use async_trait::async_trait;

use crate::criteria::{ArtistCriteria, PostCriteria, TagCriteria, DEFAULT_POST_LIMIT};
use crate::domain::{Artist, Post, Tag};
use crate::error::Result;

/// Everything callers may ask of an image board.
/// Callers hold a `dyn PostRepository` and never see the concrete upstream adapter.
/// Every call is one independent upstream round trip: no caching, no retries.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// First page of posts carrying all of `tags`, with the default limit and no randomization.
    async fn fetch_by_tags(&self, tags: &[String]) -> Result<Vec<Post>> {
        let criteria = PostCriteria {
            tags: tags.to_vec(),
            page: 1,
            limit: DEFAULT_POST_LIMIT,
            random: false,
        };
        self.fetch_posts(&criteria).await
    }

    async fn fetch_posts(&self, criteria: &PostCriteria) -> Result<Vec<Post>>;

    /// Fails with `Error::ObjectNotFound` when the post does not exist.
    async fn fetch_post_by_id(&self, id: i64) -> Result<Post>;

    async fn fetch_tags_by_name(&self, criteria: &TagCriteria) -> Result<Vec<Tag>>;

    /// Prefix search on tag names, for autocompletion.
    async fn fetch_tags_by_name_matches(&self, criteria: &TagCriteria) -> Result<Vec<Tag>>;

    async fn fetch_artists(&self, criteria: &ArtistCriteria) -> Result<Vec<Artist>>;
}
