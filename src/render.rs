//! Self-contained HTML report: summary statistics plus the full comment
//! snapshot, filtered and sorted client-side by the embedded script.

use crate::date::run_timestamp;
use crate::error::RenderError;
use crate::filters::EXPORT_HEADER;
use crate::models::CommentRecord;
use crate::query::{CommentType, SortKey};
use crate::util::write_atomic;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const TEMPLATE: &str = include_str!("report_template.html");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub unique_authors: usize,
    pub unique_videos: usize,
    pub total_likes: u64,
    pub top_level: usize,
    pub replies: usize,
}

impl ReportStats {
    pub fn from_comments(comments: &[CommentRecord]) -> Self {
        let authors: HashSet<&str> = comments.iter().map(|c| c.author.as_str()).collect();
        let videos: HashSet<&str> = comments.iter().map(|c| c.video_id.as_str()).collect();
        let replies = comments.iter().filter(|c| c.is_reply).count();
        Self {
            total: comments.len(),
            unique_authors: authors.len(),
            unique_videos: videos.len(),
            total_likes: comments.iter().map(|c| c.like_count).sum(),
            top_level: comments.len() - replies,
            replies,
        }
    }
}

/// Distinct authors in byte order, for the author dropdown.
pub fn sorted_authors(comments: &[CommentRecord]) -> Vec<String> {
    comments.iter().map(|c| c.author.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

#[derive(Clone, Debug)]
pub struct RenderedReport {
    pub path: PathBuf,
    pub stats: ReportStats,
}

/// The raw JSON records (kept verbatim for embedding) and their typed view.
pub fn load_snapshot(json_path: &Path) -> Result<(Vec<Value>, Vec<CommentRecord>), RenderError> {
    if !json_path.is_file() {
        return Err(RenderError::NotFound(json_path.to_path_buf()));
    }
    let malformed = |reason: String| RenderError::Malformed { path: json_path.to_path_buf(), reason };

    let raw = fs::read_to_string(json_path).map_err(|e| malformed(e.to_string()))?;
    let parsed: Value = serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
    let Value::Array(values) = parsed else {
        return Err(malformed("expected a JSON array of comments".into()));
    };
    if values.is_empty() {
        return Err(RenderError::Empty(json_path.to_path_buf()));
    }

    let records = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value::<CommentRecord>(v.clone()).map_err(|e| malformed(format!("record {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((values, records))
}

/// JSON for an inline `<script>`. `<`, `>` and `&` only occur inside string
/// literals there, so they are written as `\u` escapes; no value can then close
/// the element or open a `<!--` comment that swallows its end tag.
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    let raw = serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string());
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}

fn options_html<I: IntoIterator<Item = (&'static str, &'static str)>>(items: I) -> String {
    items
        .into_iter()
        .map(|(value, label)| format!("<option value=\"{value}\">{label}</option>"))
        .collect()
}

/// Single-pass `{{KEY}}` substitution; inserted values are never rescanned.
fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn render_html(values: &[Value], records: &[CommentRecord]) -> (String, ReportStats) {
    let stats = ReportStats::from_comments(records);
    let authors = sorted_authors(records);

    let vars = [
        ("TOTAL_COMMENTS", stats.total.to_string()),
        ("UNIQUE_AUTHORS", stats.unique_authors.to_string()),
        ("UNIQUE_VIDEOS", stats.unique_videos.to_string()),
        ("TOTAL_LIKES", stats.total_likes.to_string()),
        ("TOP_LEVEL", stats.top_level.to_string()),
        ("REPLIES", stats.replies.to_string()),
        ("COMMENT_TYPE_OPTIONS", options_html(CommentType::ALL.iter().map(|t| (t.value(), t.label())))),
        ("SORT_OPTIONS", options_html(SortKey::ALL.iter().map(|k| (k.value(), k.label())))),
        ("DEFAULT_SORT", SortKey::default().value().to_string()),
        ("EXPORT_HEADER", script_json(&EXPORT_HEADER)),
        ("COMMENTS_JSON", script_json(values)),
        ("AUTHORS_JSON", script_json(&authors)),
    ];
    (fill_template(TEMPLATE, &vars), stats)
}

fn try_render(json_path: &Path, out: &Path) -> Result<ReportStats, RenderError> {
    let (values, records) = load_snapshot(json_path)?;
    let (html, stats) = render_html(&values, &records);
    write_atomic(out, html.as_bytes()).map_err(|source| RenderError::Write { path: out.to_path_buf(), source })?;
    Ok(stats)
}

/// Render `json_path` to `output` (default: `youtube_comments_report_<ts>.html`
/// in the working directory). Every failure is logged before it is returned.
pub fn render_html_report(json_path: &Path, output: Option<&Path>) -> Result<RenderedReport, RenderError> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("youtube_comments_report_{}.html", run_timestamp())));

    match try_render(json_path, &path) {
        Ok(stats) => {
            tracing::info!("HTML saved: {}", path.display());
            tracing::info!("Comments included: {}", stats.total);
            Ok(RenderedReport { path, stats })
        }
        Err(e) => {
            tracing::error!("{e}");
            Err(e)
        }
    }
}
