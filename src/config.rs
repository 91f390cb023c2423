use crate::api::DEFAULT_API_BASE_URL;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const API_BASE_URL_ENV: &str = "YOUTUBE_API_BASE_URL";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ScrapeOptions {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub reports_dir: PathBuf,       // per-channel directories are created below this
    pub videos_page_size: u32,      // playlistItems maxResults (API cap: 50)
    pub comments_page_size: u32,    // commentThreads maxResults (API cap: 100)
    pub progress: bool,             // show progress bars
    pub render_html: bool,          // render the HTML report after saving JSON/CSV
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            reports_dir: PathBuf::from("reports"),
            videos_page_size: 50,
            comments_page_size: 100,
            progress: true,
            render_html: true,
        }
    }
}

impl ScrapeOptions {
    /// Defaults, with the API key and base URL taken from the environment when set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            opts = opts.with_api_key(key);
        }
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                opts = opts.with_api_base_url(url);
            }
        }
        opts
    }

    pub fn with_api_key(mut self, key: impl AsRef<str>) -> Self {
        let key = key.as_ref().trim();
        self.api_key = if key.is_empty() { None } else { Some(key.to_string()) };
        self
    }
    pub fn with_api_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.api_base_url = url.as_ref().trim().trim_end_matches('/').to_string();
        self
    }
    pub fn with_reports_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.reports_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_videos_page_size(mut self, n: u32) -> Self {
        self.videos_page_size = n.clamp(1, 50);
        self
    }
    pub fn with_comments_page_size(mut self, n: u32) -> Self {
        self.comments_page_size = n.clamp(1, 100);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_render_html(mut self, yes: bool) -> Self {
        self.render_html = yes;
        self
    }
}
