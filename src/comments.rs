//! Page a video's comment threads and flatten each thread into sibling records.

use crate::api::YouTubeApi;
use crate::models::{CommentRecord, CommentThread, Video};

/// One record for the top-level comment, then one per reply inlined in the
/// thread payload. Replies beyond what the API inlines are not fetched.
pub fn flatten_thread(video: &Video, channel_name: &str, thread: &CommentThread, out: &mut Vec<CommentRecord>) {
    let top = &thread.snippet.top_level_comment;
    out.push(CommentRecord::top_level(video, channel_name, top));
    if let Some(replies) = &thread.replies {
        for reply in &replies.comments {
            out.push(CommentRecord::reply(video, channel_name, &top.id, reply));
        }
    }
}

pub struct CommentFetcher<'a, A: ?Sized> {
    api: &'a A,
    page_size: u32,
}

impl<'a, A: YouTubeApi + ?Sized> CommentFetcher<'a, A> {
    pub fn new(api: &'a A, page_size: u32) -> Self {
        Self { api, page_size }
    }

    /// Flattened comments and replies for one video. A 403 means comments are
    /// disabled; any error ends paging and keeps what was already collected.
    pub fn fetch(&self, video: &Video, channel_name: &str) -> Vec<CommentRecord> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = match self.api.comment_threads(&video.video_id, self.page_size, page_token.as_deref()) {
                Ok(page) => page,
                Err(e) if e.is_comments_disabled() => {
                    tracing::info!("Comments disabled for video {}", video.video_id);
                    break;
                }
                Err(e) => {
                    tracing::error!("Error getting comments for {}: {e}", video.video_id);
                    break;
                }
            };

            for thread in &page.items {
                flatten_thread(video, channel_name, thread, &mut records);
            }

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        records
    }
}
