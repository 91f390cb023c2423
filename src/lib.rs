mod config;
mod date;
mod error;
mod util;

mod api;
mod models;
mod progress;

mod resolver;
mod videos;
mod comments;
mod pipeline;

mod query;
mod filters;
mod render;
mod writer;

mod prompt;

pub use crate::config::{ScrapeOptions, API_BASE_URL_ENV, API_KEY_ENV};
pub use crate::error::{ApiError, RenderError};
pub use crate::pipeline::{CommentScraper, ScrapeOutcome};

// Transport seam: implement `YouTubeApi` to drive the scraper from another source.
pub use crate::api::{ChannelPart, HttpApi, YouTubeApi, DEFAULT_API_BASE_URL};
pub use crate::models::{
    AuthorChannelId, ChannelContentDetails, ChannelInfo, ChannelListResponse, ChannelResource, ChannelSnippet, Comment,
    CommentRecord, CommentSnippet, CommentThread, CommentThreadListResponse, CommentThreadReplies, CommentThreadSnippet,
    PlaylistItem, PlaylistItemListResponse, PlaylistItemSnippet, RelatedPlaylists, ResourceId, SearchListResponse,
    SearchResult, SearchSnippet, Video,
};

// Individual components, usable without the pipeline.
pub use crate::resolver::{parse_channel_url, ChannelQuery, ChannelResolver, UrlTarget};
pub use crate::videos::VideoEnumerator;
pub use crate::comments::{flatten_thread, CommentFetcher};
pub use crate::writer::{csv_string, write_csv, ReportWriter, SavedReport};
pub use crate::render::{load_snapshot, render_html, render_html_report, sorted_authors, RenderedReport, ReportStats};

// Report view semantics.
pub use crate::query::{CommentType, FilterCriteria, SortKey};
pub use crate::filters::{apply as apply_filters, export_csv, matches as matches_filter, sort_comments, EXPORT_HEADER};

pub use crate::date::{format_run_timestamp, parse_date, run_timestamp, utc_date};
pub use crate::progress::ProgressScope;
pub use crate::prompt::Prompter;
pub use crate::util::{ensure_html_extension, init_tracing_once, sanitize_channel_name};
