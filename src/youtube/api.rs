use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::Result;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Service maximum page size for search.list
const PAGE_SIZE: &str = "50";

/// One page of a channel's video listing
#[derive(Debug, Clone, Default)]
pub struct VideoPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Metadata-lookup operations backed by the YouTube Data API.
///
/// Kept behind a trait so the resolver chain and the pagination walk can be
/// exercised against mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelLookup: Send + Sync {
    /// Keyword search scoped to channel-type results; returns the first
    /// result's channel ID, if any.
    async fn search_channel_id(&self, query: &str) -> Result<Option<String>>;

    /// Legacy username-to-channel lookup.
    async fn channel_id_for_username(&self, username: &str) -> Result<Option<String>>;

    /// One page of video IDs belonging to a channel.
    async fn video_page(&self, channel_id: &str, page_token: Option<String>)
        -> Result<VideoPage>;
}

/// Thin client over the YouTube Data API v3.
#[derive(Clone)]
pub struct DataApiClient {
    http: reqwest::Client,
    api_key: String,
}

impl DataApiClient {
    /// A missing key is not an error here; the service rejects unauthorized
    /// calls at request time.
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::debug!("YOUTUBE_API_KEY not set; channel lookups will fail at call time");
        }
        Self {
            http,
            api_key: api_key.unwrap_or_default(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", API_BASE, path);
        tracing::debug!("GET {} {:?}", url, query.iter().map(|(k, _)| *k).collect::<Vec<_>>());

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("YouTube Data API request failed: HTTP {}", response.status());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChannelLookup for DataApiClient {
    async fn search_channel_id(&self, query: &str) -> Result<Option<String>> {
        let response: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("maxResults", "1"),
                    ("q", query),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.channel_id))
            .next())
    }

    async fn channel_id_for_username(&self, username: &str) -> Result<Option<String>> {
        let response: ChannelListResponse = self
            .get_json("channels", &[("part", "id"), ("forUsername", username)])
            .await?;

        Ok(response.items.into_iter().filter_map(|item| item.id).next())
    }

    async fn video_page(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> Result<VideoPage> {
        let mut query = vec![
            ("part", "id"),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", PAGE_SIZE),
            ("channelId", channel_id),
        ];
        if let Some(token) = page_token.as_deref() {
            query.push(("pageToken", token));
        }

        let response: SearchResponse = self.get_json("search", &query).await?;
        Ok(page_from_response(response))
    }
}

/// Flatten a search.list response into a page of video IDs.
///
/// Items missing the nested `id.videoId` field are skipped, not fatal.
fn page_from_response(response: SearchResponse) -> VideoPage {
    VideoPage {
        video_ids: response
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect(),
        next_page_token: response.next_page_token,
    }
}

/// Enumerate every video ID on a channel by walking search.list pages until
/// no continuation token is returned.
///
/// A call failure mid-pagination stops the walk and returns whatever has been
/// accumulated so far; callers treat an empty result as "no videos / channel
/// inaccessible", never as an error.
pub async fn collect_video_ids<L: ChannelLookup + ?Sized>(
    lookup: &L,
    channel_id: &str,
) -> Vec<String> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        match lookup.video_page(channel_id, page_token.take()).await {
            Ok(page) => {
                video_ids.extend(page.video_ids);
                match page.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            Err(err) => {
                tracing::warn!(
                    "video listing for {} stopped early, keeping {} collected so far: {}",
                    channel_id,
                    video_ids.len(),
                    err
                );
                break;
            }
        }
    }

    video_ids
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
    #[serde(rename = "channelId")]
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: Option<String>,
}
