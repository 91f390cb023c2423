use crate::api::{ChannelPart, HttpApi, YouTubeApi};
use crate::comments::CommentFetcher;
use crate::config::ScrapeOptions;
use crate::models::{ChannelInfo, CommentRecord, Video};
use crate::progress::ProgressScope;
use crate::resolver::{ChannelQuery, ChannelResolver};
use crate::videos::VideoEnumerator;
use crate::writer::{ReportWriter, SavedReport};
use anyhow::Result;
use std::path::Path;

/// Everything gathered for one channel in one run.
#[derive(Clone, Debug)]
pub struct ScrapeOutcome {
    pub channel_id: String,
    pub channel: ChannelInfo,
    pub videos: Vec<Video>,
    pub comments: Vec<CommentRecord>,
}

impl ScrapeOutcome {
    pub fn channel_name(&self) -> &str {
        &self.channel.title
    }
}

/// Sequential scrape of one channel: resolve, describe, enumerate uploads,
/// fetch comments video by video, then save.
pub struct CommentScraper<A> {
    api: A,
    pub(crate) opts: ScrapeOptions,
}

impl CommentScraper<HttpApi> {
    /// Options from the environment (`YOUTUBE_API_KEY`, `YOUTUBE_API_BASE_URL`) and an HTTP client built from them.
    pub fn from_env() -> Result<Self> {
        let opts = ScrapeOptions::from_env();
        let api = HttpApi::from_options(&opts)?;
        Ok(Self { api, opts })
    }
}

impl<A: YouTubeApi> CommentScraper<A> {
    pub fn new(api: A) -> Self {
        Self { api, opts: ScrapeOptions::default() }
    }

    // -------- Builder methods --------
    pub fn options(mut self, opts: ScrapeOptions) -> Self { self.opts = opts; self }
    pub fn reports_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_reports_dir(dir); self }
    pub fn videos_page_size(mut self, n: u32) -> Self { self.opts = self.opts.with_videos_page_size(n); self }
    pub fn comments_page_size(mut self, n: u32) -> Self { self.opts = self.opts.with_comments_page_size(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn render_html(mut self, yes: bool) -> Self { self.opts = self.opts.with_render_html(yes); self }

    pub fn api(&self) -> &A {
        &self.api
    }

    // -------- Steps --------

    pub fn resolve_channel(&self, query: &ChannelQuery) -> Option<String> {
        ChannelResolver::new(&self.api).resolve(query)
    }

    /// Title, description and custom URL; `Unknown_Channel` when the lookup fails.
    pub fn channel_info(&self, channel_id: &str) -> ChannelInfo {
        match self.api.channels_by_id(channel_id, ChannelPart::Snippet) {
            Ok(resp) => resp
                .items
                .into_iter()
                .find_map(|c| c.snippet)
                .map(|s| ChannelInfo {
                    title: s.title,
                    description: s.description,
                    custom_url: s.custom_url.unwrap_or_default(),
                })
                .unwrap_or_else(ChannelInfo::unknown),
            Err(e) => {
                tracing::error!("Error getting channel info: {e}");
                ChannelInfo::unknown()
            }
        }
    }

    pub fn list_videos(&self, channel_id: &str) -> Vec<Video> {
        VideoEnumerator::new(&self.api, self.opts.videos_page_size)
            .progress(self.opts.progress)
            .list(channel_id)
    }

    pub fn fetch_comments(&self, video: &Video, channel_name: &str) -> Vec<CommentRecord> {
        CommentFetcher::new(&self.api, self.opts.comments_page_size).fetch(video, channel_name)
    }

    pub fn scrape_channel(&self, channel_id: &str) -> ScrapeOutcome {
        let channel = self.channel_info(channel_id);
        tracing::info!("Channel name: {}", channel.title);

        let videos = self.list_videos(channel_id);
        let mut comments = Vec::new();
        if videos.is_empty() {
            tracing::info!("No videos found");
            return ScrapeOutcome { channel_id: channel_id.to_string(), channel, videos, comments };
        }

        let total = videos.len();
        let bar = ProgressScope::count("Downloading comments", total as u64, self.opts.progress);
        for (idx, video) in videos.iter().enumerate() {
            tracing::info!("[{}/{}] Downloading comments for: {}", idx + 1, total, video.title);
            bar.set_message(video.title.clone());
            let batch = self.fetch_comments(video, &channel.title);
            tracing::info!("  -> {} comments found", batch.len());
            comments.extend(batch);
            bar.inc(1);
        }
        bar.finish(format!("{} comments", comments.len()));
        tracing::info!("Total comments downloaded: {}", comments.len());

        ScrapeOutcome { channel_id: channel_id.to_string(), channel, videos, comments }
    }

    pub fn save_reports(&self, outcome: &ScrapeOutcome) -> Result<Option<SavedReport>> {
        ReportWriter::new(&self.opts.reports_dir)
            .render_html(self.opts.render_html)
            .save(&outcome.comments, outcome.channel_name())
    }
}
