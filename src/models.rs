//! Wire types for the YouTube Data API v3 responses we consume, and the flat
//! records the scraper produces from them.

use serde::{Deserialize, Deserializer, Serialize};

// ----------------- API responses -----------------

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult {
    pub snippet: SearchSnippet,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResource {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: String,
    pub published_at: String,
    pub resource_id: ResourceId,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
    pub replies: Option<CommentThreadReplies>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommentThreadReplies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Comment {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: String,
    pub author_channel_id: Option<AuthorChannelId>,
    pub text_display: String,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthorChannelId {
    pub value: String,
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

// ----------------- Scraper output -----------------

/// One uploaded video, as listed by the channel's uploads playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
}

impl From<PlaylistItem> for Video {
    fn from(item: PlaylistItem) -> Self {
        let s = item.snippet;
        Self { video_id: s.resource_id.video_id, title: s.title, published_at: s.published_at }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub title: String,
    pub description: String,
    pub custom_url: String,
}

impl ChannelInfo {
    pub fn unknown() -> Self {
        Self { title: "Unknown_Channel".into(), description: String::new(), custom_url: String::new() }
    }
}

/// A top-level comment or an inlined reply, flattened with its video and channel context.
/// Field order is the on-disk column order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentRecord {
    pub video_id: String,
    pub comment_id: String,
    pub author: String,
    pub author_channel_id: String,
    pub text: String,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
    pub is_reply: bool,
    pub parent_id: Option<String>,
    pub video_title: String,
    pub video_published_at: String,
    pub channel_name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// Like counts in a saved snapshot: `null`, negative or non-finite values read as 0.
/// Non-numeric values are still rejected.
fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    Ok(match Option::<Count>::deserialize(de)? {
        Some(Count::Unsigned(n)) => n,
        Some(Count::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        Some(Count::Signed(_)) | Some(Count::Float(_)) | None => 0,
    })
}

impl CommentRecord {
    pub fn top_level(video: &Video, channel_name: &str, comment: &Comment) -> Self {
        Self::build(video, channel_name, comment, None)
    }

    pub fn reply(video: &Video, channel_name: &str, parent_id: &str, comment: &Comment) -> Self {
        Self::build(video, channel_name, comment, Some(parent_id.to_string()))
    }

    fn build(video: &Video, channel_name: &str, comment: &Comment, parent_id: Option<String>) -> Self {
        let s = &comment.snippet;
        Self {
            video_id: video.video_id.clone(),
            comment_id: comment.id.clone(),
            author: s.author_display_name.clone(),
            author_channel_id: s.author_channel_id.as_ref().map(|a| a.value.clone()).unwrap_or_default(),
            text: s.text_display.clone(),
            like_count: s.like_count,
            published_at: s.published_at.clone(),
            updated_at: s.updated_at.clone(),
            is_reply: parent_id.is_some(),
            parent_id,
            video_title: video.title.clone(),
            video_published_at: video.published_at.clone(),
            channel_name: channel_name.to_string(),
        }
    }
}
