#![allow(dead_code)]

use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use yt_comments::{
    ApiError, ChannelListResponse, ChannelPart, CommentRecord, CommentThreadListResponse, PlaylistItemListResponse,
    SearchListResponse, YouTubeApi,
};

/// One scripted page: either items or an HTTP error status.
#[derive(Clone, Debug)]
pub enum FakePage {
    Items(Vec<Value>),
    Status(u16),
}

#[derive(Clone, Debug)]
pub struct FakeChannel {
    pub title: String,
    pub uploads: String,
}

/// In-memory `YouTubeApi` that records every call it receives.
/// Page tokens are `p<index>`; the first page is requested without a token.
#[derive(Default)]
pub struct FakeApi {
    pub search: HashMap<String, Vec<String>>,
    pub usernames: HashMap<String, String>,
    pub channels: HashMap<String, FakeChannel>,
    pub playlist_pages: HashMap<String, Vec<FakePage>>,
    pub comment_pages: HashMap<String, Vec<FakePage>>,
    pub fail_search: bool,
    pub fail_channels: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, ids: &[&str]) -> Self {
        self.search.insert(query.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }
    pub fn with_username(mut self, username: &str, id: &str) -> Self {
        self.usernames.insert(username.to_string(), id.to_string());
        self
    }
    pub fn with_channel(mut self, id: &str, title: &str, uploads: &str) -> Self {
        self.channels.insert(id.to_string(), FakeChannel { title: title.to_string(), uploads: uploads.to_string() });
        self
    }
    pub fn with_playlist(mut self, playlist_id: &str, pages: Vec<FakePage>) -> Self {
        self.playlist_pages.insert(playlist_id.to_string(), pages);
        self
    }
    pub fn with_comments(mut self, video_id: &str, pages: Vec<FakePage>) -> Self {
        self.comment_pages.insert(video_id.to_string(), pages);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn page<T: serde::de::DeserializeOwned>(
        pages: Option<&Vec<FakePage>>,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let pages = pages.ok_or_else(|| ApiError::http(404, "not found"))?;
        let idx = match token {
            None => 0,
            Some(t) => t.trim_start_matches('p').parse::<usize>().map_err(|_| ApiError::http(400, "bad token"))?,
        };
        match pages.get(idx) {
            Some(FakePage::Items(items)) => {
                let next = if idx + 1 < pages.len() { Some(format!("p{}", idx + 1)) } else { None };
                Ok(serde_json::from_value(json!({ "items": items, "nextPageToken": next }))?)
            }
            Some(FakePage::Status(code)) => Err(ApiError::http(*code, "scripted failure")),
            None => Err(ApiError::http(400, "page out of range")),
        }
    }
}

impl YouTubeApi for FakeApi {
    fn search_channels(&self, query: &str, _max_results: u32) -> Result<SearchListResponse, ApiError> {
        self.record(format!("search:{query}"));
        if self.fail_search {
            return Err(ApiError::http(500, "search unavailable"));
        }
        let items: Vec<Value> = self
            .search
            .get(query)
            .map(|ids| ids.iter().map(|id| json!({ "snippet": { "channelId": id } })).collect())
            .unwrap_or_default();
        Ok(serde_json::from_value(json!({ "items": items }))?)
    }

    fn channels_by_username(&self, username: &str) -> Result<ChannelListResponse, ApiError> {
        self.record(format!("username:{username}"));
        let items: Vec<Value> = self.usernames.get(username).map(|id| vec![json!({ "id": id })]).unwrap_or_default();
        Ok(serde_json::from_value(json!({ "items": items }))?)
    }

    fn channels_by_id(&self, channel_id: &str, part: ChannelPart) -> Result<ChannelListResponse, ApiError> {
        self.record(format!("channels:{}:{channel_id}", part.as_str()));
        if self.fail_channels {
            return Err(ApiError::http(500, "channels unavailable"));
        }
        let items: Vec<Value> = self
            .channels
            .get(channel_id)
            .map(|c| {
                vec![json!({
                    "id": channel_id,
                    "snippet": { "title": c.title, "description": "about", "customUrl": "@custom" },
                    "contentDetails": { "relatedPlaylists": { "uploads": c.uploads } }
                })]
            })
            .unwrap_or_default();
        Ok(serde_json::from_value(json!({ "items": items }))?)
    }

    fn playlist_items(&self, playlist_id: &str, _max_results: u32, page_token: Option<&str>) -> Result<PlaylistItemListResponse, ApiError> {
        self.record(format!("playlist:{playlist_id}:{}", page_token.unwrap_or("-")));
        Self::page(self.playlist_pages.get(playlist_id), page_token)
    }

    fn comment_threads(&self, video_id: &str, _max_results: u32, page_token: Option<&str>) -> Result<CommentThreadListResponse, ApiError> {
        self.record(format!("threads:{video_id}:{}", page_token.unwrap_or("-")));
        Self::page(self.comment_pages.get(video_id), page_token)
    }
}

// ----------------- JSON fixtures -----------------

pub fn playlist_item(video_id: &str, title: &str, published_at: &str) -> Value {
    json!({
        "snippet": {
            "title": title,
            "publishedAt": published_at,
            "resourceId": { "kind": "youtube#video", "videoId": video_id }
        }
    })
}

pub fn comment(id: &str, author: &str, text: &str, likes: u64, published_at: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "authorDisplayName": author,
            "authorChannelId": { "value": format!("UC_{author}") },
            "textDisplay": text,
            "likeCount": likes,
            "publishedAt": published_at,
            "updatedAt": published_at
        }
    })
}

pub fn thread(top: Value, replies: Vec<Value>) -> Value {
    if replies.is_empty() {
        json!({ "snippet": { "topLevelComment": top } })
    } else {
        json!({ "snippet": { "topLevelComment": top }, "replies": { "comments": replies } })
    }
}

/// Channel `UCdemo` ("Demo Channel") with two videos:
/// - v1: thread c1 (alice, 2 replies from bob and carol), thread c2 (bob, no replies)
/// - v2: comments disabled (403)
pub fn demo_api() -> FakeApi {
    FakeApi::new()
        .with_channel("UCdemo", "Demo Channel", "UUdemo")
        .with_playlist(
            "UUdemo",
            vec![
                FakePage::Items(vec![playlist_item("v1", "First Video", "2024-01-01T00:00:00Z")]),
                FakePage::Items(vec![playlist_item("v2", "Second Video", "2024-02-01T00:00:00Z")]),
            ],
        )
        .with_comments(
            "v1",
            vec![
                FakePage::Items(vec![thread(
                    comment("c1", "alice", "Great video, \"really\"", 10, "2024-01-02T10:00:00Z"),
                    vec![
                        comment("r1", "bob", "agreed", 2, "2024-01-03T10:00:00Z"),
                        comment("r2", "carol", "same, here", 0, "2024-01-04T10:00:00Z"),
                    ],
                )]),
                FakePage::Items(vec![thread(comment("c2", "bob", "Ünïcödé ✓", 5, "2024-01-05T10:00:00Z"), vec![])]),
            ],
        )
        .with_comments("v2", vec![FakePage::Status(403)])
}

pub fn record(id: &str, author: &str, text: &str, likes: u64, published_at: &str, video: &str, parent: Option<&str>) -> CommentRecord {
    CommentRecord {
        video_id: video.to_string(),
        comment_id: id.to_string(),
        author: author.to_string(),
        author_channel_id: format!("UC_{author}"),
        text: text.to_string(),
        like_count: likes,
        published_at: published_at.to_string(),
        updated_at: published_at.to_string(),
        is_reply: parent.is_some(),
        parent_id: parent.map(str::to_string),
        video_title: format!("Video {video}"),
        video_published_at: "2024-01-01T00:00:00Z".to_string(),
        channel_name: "Demo Channel".to_string(),
    }
}

/// Small mixed snapshot for view tests.
pub fn sample_records() -> Vec<CommentRecord> {
    vec![
        record("c1", "alice", "Rust is great", 10, "2024-01-02T10:00:00Z", "v1", None),
        record("r1", "Bob", "I agree, rust rocks", 3, "2024-01-03T23:30:00Z", "v1", Some("c1")),
        record("c2", "carol", "Nice editing", 0, "2024-02-10T08:00:00Z", "v2", None),
        record("r2", "alice", "thanks \"carol\"", 7, "2024-02-11T00:00:00Z", "v2", Some("c2")),
        record("c3", "dave", "first!", 1, "2023-12-31T23:59:59Z", "v1", None),
    ]
}

/// Collects formatted tracing output so tests can assert on log lines.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that writes into the returned buffer.
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.contents())
}
