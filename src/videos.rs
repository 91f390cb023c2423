//! Enumerate a channel's uploads by paging its uploads playlist.

use crate::api::{ChannelPart, YouTubeApi};
use crate::error::ApiError;
use crate::models::Video;
use crate::progress::ProgressScope;

pub struct VideoEnumerator<'a, A: ?Sized> {
    api: &'a A,
    page_size: u32,
    progress: bool,
}

impl<'a, A: YouTubeApi + ?Sized> VideoEnumerator<'a, A> {
    pub fn new(api: &'a A, page_size: u32) -> Self {
        Self { api, page_size, progress: false }
    }

    pub fn progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    /// Id of the channel's uploads playlist, `None` if the channel does not exist.
    pub fn uploads_playlist(&self, channel_id: &str) -> Result<Option<String>, ApiError> {
        let resp = self.api.channels_by_id(channel_id, ChannelPart::ContentDetails)?;
        Ok(resp
            .items
            .into_iter()
            .next()
            .and_then(|c| c.content_details)
            .map(|d| d.related_playlists.uploads))
    }

    /// All uploads in playlist order. A failing page ends the listing early and
    /// whatever was gathered so far is returned.
    pub fn list(&self, channel_id: &str) -> Vec<Video> {
        let playlist_id = match self.uploads_playlist(channel_id) {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::warn!("Channel not found: {channel_id}");
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Error getting videos: {e}");
                return Vec::new();
            }
        };

        let mut videos = Vec::new();
        let scope = ProgressScope::spinner("Listing videos", self.progress);
        let mut page_token: Option<String> = None;

        loop {
            let page = match self.api.playlist_items(&playlist_id, self.page_size, page_token.as_deref()) {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Error getting videos: {e}");
                    break;
                }
            };

            for item in page.items {
                let video = Video::from(item);
                tracing::info!("Found video: {}", video.title);
                scope.inc(1);
                videos.push(video);
            }

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        scope.finish(format!("{} videos", videos.len()));
        tracing::info!("Total videos found: {}", videos.len());
        videos
    }
}
