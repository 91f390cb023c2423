//! Filtering, sorting and CSV export over a frozen comment snapshot,
//! with the same semantics as the script embedded in the HTML report.

use crate::date::{parse_timestamp, utc_date};
use crate::models::CommentRecord;
use crate::query::{FilterCriteria, SortKey};
use std::cmp::Ordering;

pub const EXPORT_HEADER: [&str; 6] = ["Author", "Text", "Likes", "Date", "Video", "Type"];

pub fn matches(c: &CommentRecord, q: &FilterCriteria) -> bool {
    if let Some(text) = &q.text {
        if !c.text.to_lowercase().contains(text.as_str()) { return false; }
    }
    if let Some(author) = &q.author {
        if &c.author != author { return false; }
    }
    if let Some(video) = &q.video {
        if !c.video_title.to_lowercase().contains(video.as_str()) { return false; }
    }
    if q.date_from.is_some() || q.date_to.is_some() {
        // unparseable dates never satisfy a bound
        let Some(day) = utc_date(&c.published_at) else { return false };
        if q.date_from.is_some_and(|lo| day < lo) { return false; }
        if q.date_to.is_some_and(|hi| day > hi) { return false; }
    }
    if c.like_count < q.min_likes {
        return false;
    }
    q.comment_type.accepts(c.is_reply)
}

/// Case-insensitive order with a byte-order tie-break, standing in for `localeCompare`.
fn author_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Stable sort, like `Array.prototype.sort`.
pub fn sort_comments(view: &mut [&CommentRecord], key: SortKey) {
    match key {
        SortKey::DateDesc => view.sort_by(|a, b| parse_timestamp(&b.published_at).cmp(&parse_timestamp(&a.published_at))),
        SortKey::DateAsc => view.sort_by(|a, b| parse_timestamp(&a.published_at).cmp(&parse_timestamp(&b.published_at))),
        SortKey::LikesDesc => view.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
        SortKey::LikesAsc => view.sort_by(|a, b| a.like_count.cmp(&b.like_count)),
        SortKey::AuthorAsc => view.sort_by(|a, b| author_cmp(&a.author, &b.author)),
        SortKey::AuthorDesc => view.sort_by(|a, b| author_cmp(&b.author, &a.author)),
    }
}

pub fn apply<'a>(comments: &'a [CommentRecord], q: &FilterCriteria, sort: SortKey) -> Vec<&'a CommentRecord> {
    let mut view: Vec<&CommentRecord> = comments.iter().filter(|c| matches(c, q)).collect();
    sort_comments(&mut view, sort);
    view
}

fn quoted(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// CSV of the current view: every field quoted, embedded quotes doubled, `\n` row separator.
pub fn export_csv(view: &[&CommentRecord]) -> String {
    let mut lines = Vec::with_capacity(view.len() + 1);
    lines.push(EXPORT_HEADER.iter().map(|h| quoted(h)).collect::<Vec<_>>().join(","));
    for c in view {
        let kind = if c.is_reply { "Reply" } else { "Comment" };
        let row = [
            quoted(&c.author),
            quoted(&c.text),
            quoted(&c.like_count.to_string()),
            quoted(&c.published_at),
            quoted(&c.video_title),
            quoted(kind),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}
