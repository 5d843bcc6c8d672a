use async_trait::async_trait;

use std::net::SocketAddr;
use std::time::Duration;

use danbooru_client::{build_client, Credential, DanbooruClient};
use exposer_core::{Artist, ArtistCriteria, Post, PostCriteria, PostRepository, Result, Tag, TagCriteria};

use crate::error::core_error;
use crate::mapper::{map_artist, map_post, map_tag};

/// The upstream refuses deep pagination, so the page sent for post searches wraps every 100 pages.
pub const PAGE_WRAP: u32 = 100;

/// Everything needed to reach one Danbooru instance.
#[derive(Debug, Clone)]
pub struct DanbooruSettings {
    pub base_url: String,
    pub credential: Credential,
    pub timeout: Duration,
    pub dns_server: SocketAddr,
}

/// `PostRepository` backed by the Danbooru JSON API.
#[derive(Debug, Clone)]
pub struct DanbooruRepository {
    client: DanbooruClient,
}

impl DanbooruRepository {
    pub fn new(client: DanbooruClient) -> Self {
        DanbooruRepository { client }
    }

    /// Build the transport and client. No network traffic happens here.
    pub fn connect(settings: &DanbooruSettings) -> Result<Self> {
        let http = build_client(settings.timeout, settings.dns_server).map_err(core_error)?;
        let client = DanbooruClient::new(http, &settings.base_url, settings.credential.clone()).map_err(core_error)?;
        Ok(DanbooruRepository::new(client))
    }
}

/// The values a post search puts on the wire, plus the bounded limit it tracks alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostsRequest {
    /// Sent verbatim, even when out of bounds. Only `effective_limit` is bounded.
    pub limit: u32,
    pub page: u32,
    pub effective_limit: u32,
}

impl From<&PostCriteria> for PostsRequest {
    fn from(criteria: &PostCriteria) -> Self {
        PostsRequest {
            limit: criteria.limit,
            page: criteria.effective_page() % PAGE_WRAP,
            effective_limit: criteria.effective_limit(),
        }
    }
}

#[async_trait]
impl PostRepository for DanbooruRepository {
    async fn fetch_posts(&self, criteria: &PostCriteria) -> Result<Vec<Post>> {
        let request = PostsRequest::from(criteria);
        tracing::debug!(
            "Fetching posts for {:?}: limit {} (effective {}), page {}",
            criteria.tags,
            request.limit,
            request.effective_limit,
            request.page
        );

        let results = self
            .client
            .posts(&criteria.tags, request.limit, request.page, criteria.random)
            .await
            .map_err(core_error)?;
        tracing::debug!("Fetched {} posts", results.len());
        Ok(results.into_iter().map(map_post).collect())
    }

    async fn fetch_post_by_id(&self, id: i64) -> Result<Post> {
        let result = self.client.post(id).await.map_err(core_error)?;
        Ok(map_post(result))
    }

    async fn fetch_tags_by_name(&self, criteria: &TagCriteria) -> Result<Vec<Tag>> {
        let results = self
            .client
            .tags(
                &criteria.names,
                criteria.category.map(i32::from),
                criteria.limit,
                criteria.page,
                &criteria.order,
            )
            .await
            .map_err(core_error)?;
        tracing::debug!("Fetched {} tags by name", results.len());
        Ok(results.into_iter().map(map_tag).collect())
    }

    async fn fetch_tags_by_name_matches(&self, criteria: &TagCriteria) -> Result<Vec<Tag>> {
        let results = self
            .client
            .tag_matches(
                &criteria.name_prefix,
                criteria.category.map(i32::from),
                criteria.limit,
                criteria.page,
                &criteria.order,
            )
            .await
            .map_err(core_error)?;
        tracing::debug!("Fetched {} tags matching {}*", results.len(), criteria.name_prefix);
        Ok(results.into_iter().map(map_tag).collect())
    }

    async fn fetch_artists(&self, criteria: &ArtistCriteria) -> Result<Vec<Artist>> {
        let results = self
            .client
            .artists(&criteria.name, criteria.limit, criteria.page)
            .await
            .map_err(core_error)?;
        tracing::debug!("Fetched {} artists", results.len());
        Ok(results.into_iter().map(map_artist).collect())
    }
}
