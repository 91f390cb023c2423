//! Channel resolution: handle, legacy username or URL to a canonical channel id.
//!
//! Every lookup strategy is a fallible `Result<Option<String>, ApiError>`;
//! `Ok(None)` means "no match", and fallbacks are chained explicitly.

use crate::api::YouTubeApi;
use crate::error::ApiError;

/// How the user identified the channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelQuery {
    Handle(String),
    Username(String),
    Url(String),
    Id(String),
}

/// What a channel URL points at, decided by substring only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlTarget {
    Handle(String),
    ChannelId(String),
    Custom(String),
}

fn first_segment(rest: &str) -> Option<String> {
    let seg = rest.split(['/', '?', '#']).next().unwrap_or("").trim();
    if seg.is_empty() { None } else { Some(seg.to_string()) }
}

/// `@handle` wins over `/channel/<id>`, which wins over `/c/<name>`.
/// Unrecognized shapes yield `None`.
pub fn parse_channel_url(url: &str) -> Option<UrlTarget> {
    let url = url.trim();
    if let Some((_, rest)) = url.split_once('@') {
        return first_segment(rest).map(UrlTarget::Handle);
    }
    if let Some((_, rest)) = url.split_once("/channel/") {
        return first_segment(rest).map(UrlTarget::ChannelId);
    }
    if let Some((_, rest)) = url.split_once("/c/") {
        return first_segment(rest).map(UrlTarget::Custom);
    }
    None
}

pub struct ChannelResolver<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: YouTubeApi + ?Sized> ChannelResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Resolve to a channel id. API errors are logged and degrade to `None`.
    pub fn resolve(&self, query: &ChannelQuery) -> Option<String> {
        let res = match query {
            ChannelQuery::Handle(h) => self.from_handle(h),
            ChannelQuery::Username(u) => self.from_username(u),
            ChannelQuery::Url(u) => self.from_url(u),
            ChannelQuery::Id(id) => Ok(first_segment(id)),
        };
        match res {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Error getting channel id: {e}");
                None
            }
        }
    }

    pub fn from_handle(&self, handle: &str) -> Result<Option<String>, ApiError> {
        let handle = handle.trim().trim_start_matches('@');
        if handle.is_empty() {
            return Ok(None);
        }
        match self.search_first(handle) {
            Ok(Some(id)) => return Ok(Some(id)),
            Ok(None) => tracing::debug!(handle, "no channel search hit, trying as username"),
            Err(e) => tracing::debug!(handle, error = %e, "channel search failed, trying as username"),
        }
        self.from_username(handle)
    }

    pub fn from_username(&self, username: &str) -> Result<Option<String>, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(None);
        }
        match self.lookup_username(username) {
            Ok(Some(id)) => return Ok(Some(id)),
            Ok(None) => tracing::debug!(username, "no channel for legacy username, searching"),
            Err(e) => tracing::debug!(username, error = %e, "username lookup failed, searching"),
        }
        self.search_first(username)
    }

    pub fn from_url(&self, url: &str) -> Result<Option<String>, ApiError> {
        match parse_channel_url(url) {
            Some(UrlTarget::Handle(h)) => self.from_handle(&h),
            Some(UrlTarget::ChannelId(id)) => Ok(Some(id)),
            Some(UrlTarget::Custom(name)) => self.from_username(&name),
            None => Ok(None),
        }
    }

    fn search_first(&self, query: &str) -> Result<Option<String>, ApiError> {
        let resp = self.api.search_channels(query, 1)?;
        Ok(resp.items.into_iter().next().map(|hit| hit.snippet.channel_id))
    }

    fn lookup_username(&self, username: &str) -> Result<Option<String>, ApiError> {
        let resp = self.api.channels_by_username(username)?;
        Ok(resp.items.into_iter().next().map(|c| c.id))
    }
}
