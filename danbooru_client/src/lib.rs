mod error;
pub mod network;
mod result;
#[cfg(test)]
mod test;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use exposer_util::build_params;

pub use crate::error::Error;
use crate::error::Result;
pub use crate::network::build_client;
pub use crate::result::*;

/// Upstream credentials. The upstream only accepts them as plain query parameters.
#[derive(Clone)]
pub struct Credential {
    pub login: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("api_key", &"***")
            .finish()
    }
}

/// Thin client over the Danbooru JSON API. Each method is exactly one GET.
#[derive(Debug, Clone)]
pub struct DanbooruClient {
    base_url: String,
    credential: Credential,
    client: reqwest::Client,
}

impl DanbooruClient {
    pub fn new(client: reqwest::Client, base_url: &str, credential: Credential) -> Result<DanbooruClient> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(DanbooruClient {
            base_url,
            credential,
            client,
        })
    }

    /// `tags` is sent as a single space-joined parameter. `limit` and `page` go on the wire verbatim.
    pub async fn posts(&self, tags: &[String], limit: u32, page: u32, random: bool) -> Result<Vec<PostResult>> {
        let params = build_params! {
            required tags => tags.join(" "),
            required limit,
            required page,
            flag random,
        };
        let url = self.endpoint("/posts.json", params)?;
        let (status, content) = self.fetch(&url).await?;
        self.parse("posts", status, &content).await
    }

    pub async fn post(&self, id: i64) -> Result<PostResult> {
        let url = self.endpoint(&format!("/posts/{}.json", id), Vec::new())?;
        let (status, content) = self.fetch(&url).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Post {}", id)));
        }
        self.parse("post", status, &content).await
    }

    /// Tags whose name is one of `names`. Empty tags are always hidden.
    /// `search[category]` is an addition to the upstream's usual tag query and is only sent
    /// when a category is given.
    pub async fn tags(
        &self,
        names: &[String],
        category: Option<i32>,
        limit: u32,
        page: u32,
        order: &str,
    ) -> Result<Vec<TagResult>> {
        let params = build_params! {
            required "search[name]" => names.join(","),
            optional "search[category]" => category,
            required limit,
            required page,
            required hide_empty => "yes",
            nonempty order,
        };
        let url = self.endpoint("/tags.json", params)?;
        let (status, content) = self.fetch(&url).await?;
        self.parse("tags", status, &content).await
    }

    /// Tags whose name starts with `prefix`. `search[category]` is handled as in `tags`.
    pub async fn tag_matches(
        &self,
        prefix: &str,
        category: Option<i32>,
        limit: u32,
        page: u32,
        order: &str,
    ) -> Result<Vec<TagResult>> {
        let params = build_params! {
            required "search[name_matches]" => format!("{}*", prefix),
            optional "search[category]" => category,
            required limit,
            required page,
            required hide_empty => "yes",
            nonempty order,
        };
        let url = self.endpoint("/tags.json", params)?;
        let (status, content) = self.fetch(&url).await?;
        self.parse("tag_matches", status, &content).await
    }

    /// Artists matching `query`, ordered by name.
    /// The upstream query has always carried `search[is_banned]=true`; it is kept as a fixed parameter.
    pub async fn artists(&self, query: &str, limit: u32, page: u32) -> Result<Vec<ArtistResult>> {
        let params = build_params! {
            required "search[is_banned]" => true,
            required "search[order]" => "name",
            required "search[query]" => query,
            required limit,
            required page,
        };
        let url = self.endpoint("/artists.json", params)?;
        let (status, content) = self.fetch(&url).await?;
        self.parse("artists", status, &content).await
    }
}

impl DanbooruClient {
    fn endpoint(&self, path: &str, mut params: Vec<(String, String)>) -> Result<Url> {
        params.extend(build_params! {
            required login => self.credential.login,
            required api_key => self.credential.api_key,
        });
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, path), &params)?;
        Ok(url)
    }

    /// Send the request and drain the whole body, whatever the status, so the connection can be reused.
    async fn fetch(&self, url: &Url) -> Result<(StatusCode, String)> {
        tracing::debug!("GET {}", redact(url));
        // reqwest errors print their URL, which carries the API key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let content = response.text().await.map_err(reqwest::Error::without_url)?;
        Ok((status, content))
    }

    async fn parse<T: DeserializeOwned>(&self, endpoint: &str, status: StatusCode, content: &str) -> Result<T> {
        if status != StatusCode::OK {
            return Err(Error::UpstreamError {
                status: status.as_u16(),
                body: content.to_string(),
            });
        }
        log(endpoint, content).await?;
        decode(content)
    }
}

fn decode<T: DeserializeOwned>(content: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(content);
    let result = serde_path_to_error::deserialize(&mut *de)?;
    de.end()?;
    Ok(result)
}

/// The URL with the API key masked, for logging.
fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "api_key" { "***".into() } else { value };
            (key.into_owned(), value.into_owned())
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

async fn log(endpoint: &str, content: &str) -> Result<()> {
    use std::path::PathBuf;
    use tokio::{fs::File, io::AsyncWriteExt};

    if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filepath = PathBuf::from(dir).join(format!("danbooru_{}_{}.json", endpoint, time));
        let mut file = File::create(filepath).await?;
        file.write_all(content.as_bytes()).await?;
    }
    Ok(())
}
