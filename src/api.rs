//! Read-only access to the YouTube Data API v3.
//!
//! Components talk to the [`YouTubeApi`] trait; [`HttpApi`] is the blocking
//! `reqwest` implementation authenticated with a static API key.

use crate::config::ScrapeOptions;
use crate::error::ApiError;
use crate::models::{
    ChannelListResponse, CommentThreadListResponse, ErrorEnvelope, PlaylistItemListResponse, SearchListResponse,
};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Which resource parts `channels.list` should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelPart {
    Id,
    Snippet,
    ContentDetails,
}

impl ChannelPart {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelPart::Id => "id",
            ChannelPart::Snippet => "snippet",
            ChannelPart::ContentDetails => "contentDetails",
        }
    }
}

/// The API calls the scraper needs. Every call is a single blocking round trip.
pub trait YouTubeApi {
    /// `search.list` restricted to channel results.
    fn search_channels(&self, query: &str, max_results: u32) -> Result<SearchListResponse, ApiError>;
    /// `channels.list` by legacy username.
    fn channels_by_username(&self, username: &str) -> Result<ChannelListResponse, ApiError>;
    /// `channels.list` by channel id.
    fn channels_by_id(&self, channel_id: &str, part: ChannelPart) -> Result<ChannelListResponse, ApiError>;
    /// One page of `playlistItems.list`.
    fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse, ApiError>;
    /// One page of `commentThreads.list` with replies inlined, plain-text bodies.
    fn comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, ApiError>;
}

impl<T: YouTubeApi + ?Sized> YouTubeApi for &T {
    fn search_channels(&self, query: &str, max_results: u32) -> Result<SearchListResponse, ApiError> {
        (**self).search_channels(query, max_results)
    }
    fn channels_by_username(&self, username: &str) -> Result<ChannelListResponse, ApiError> {
        (**self).channels_by_username(username)
    }
    fn channels_by_id(&self, channel_id: &str, part: ChannelPart) -> Result<ChannelListResponse, ApiError> {
        (**self).channels_by_id(channel_id, part)
    }
    fn playlist_items(&self, playlist_id: &str, max_results: u32, page_token: Option<&str>) -> Result<PlaylistItemListResponse, ApiError> {
        (**self).playlist_items(playlist_id, max_results, page_token)
    }
    fn comment_threads(&self, video_id: &str, max_results: u32, page_token: Option<&str>) -> Result<CommentThreadListResponse, ApiError> {
        (**self).comment_threads(video_id, max_results, page_token)
    }
}

/// Blocking HTTP client for the public Data API.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HttpApi {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(anyhow!("an API key is required"));
        }
        let client = Client::builder()
            .user_agent(concat!("yt-comments/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, api_key, base_url: DEFAULT_API_BASE_URL.to_string() })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn from_options(opts: &ScrapeOptions) -> Result<Self> {
        let key = opts.api_key.clone().ok_or_else(|| anyhow!("YOUTUBE_API_KEY is not set"))?;
        Ok(Self::new(key)?.with_base_url(opts.api_base_url.clone()))
    }

    fn get<T: DeserializeOwned>(&self, resource: &str, params: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!(resource, ?params, "GET");
        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(ApiError::http(status.as_u16(), message));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn with_page_token<'a>(mut params: Vec<(&'a str, &'a str)>, token: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    if let Some(t) = token {
        params.push(("pageToken", t));
    }
    params
}

impl YouTubeApi for HttpApi {
    fn search_channels(&self, query: &str, max_results: u32) -> Result<SearchListResponse, ApiError> {
        let max = max_results.to_string();
        self.get("search", &[("part", "snippet"), ("q", query), ("type", "channel"), ("maxResults", max.as_str())])
    }

    fn channels_by_username(&self, username: &str) -> Result<ChannelListResponse, ApiError> {
        self.get("channels", &[("part", ChannelPart::Id.as_str()), ("forUsername", username)])
    }

    fn channels_by_id(&self, channel_id: &str, part: ChannelPart) -> Result<ChannelListResponse, ApiError> {
        self.get("channels", &[("part", part.as_str()), ("id", channel_id)])
    }

    fn playlist_items(&self, playlist_id: &str, max_results: u32, page_token: Option<&str>) -> Result<PlaylistItemListResponse, ApiError> {
        let max = max_results.to_string();
        let params = with_page_token(
            vec![("part", "snippet"), ("playlistId", playlist_id), ("maxResults", max.as_str())],
            page_token,
        );
        self.get("playlistItems", &params)
    }

    fn comment_threads(&self, video_id: &str, max_results: u32, page_token: Option<&str>) -> Result<CommentThreadListResponse, ApiError> {
        let max = max_results.to_string();
        let params = with_page_token(
            vec![
                ("part", "snippet,replies"),
                ("videoId", video_id),
                ("maxResults", max.as_str()),
                ("textFormat", "plainText"),
            ],
            page_token,
        );
        self.get("commentThreads", &params)
    }
}
