//! Filter criteria and sort keys of the report view.
//!
//! The rendered report applies these client-side; the enums also drive the
//! select options written into the page so both sides share one vocabulary.

use crate::date::parse_date;
use time::Date;

/// Comment-type selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommentType {
    #[default]
    All,
    TopLevel,
    Replies,
}

impl CommentType {
    pub const ALL: [CommentType; 3] = [CommentType::All, CommentType::TopLevel, CommentType::Replies];

    /// Value used by the `<select>` in the page.
    pub fn value(self) -> &'static str {
        match self {
            CommentType::All => "all",
            CommentType::TopLevel => "top",
            CommentType::Replies => "replies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommentType::All => "All",
            CommentType::TopLevel => "Main Comments Only",
            CommentType::Replies => "Replies Only",
        }
    }

    pub fn accepts(self, is_reply: bool) -> bool {
        match self {
            CommentType::All => true,
            CommentType::TopLevel => !is_reply,
            CommentType::Replies => is_reply,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    LikesDesc,
    LikesAsc,
    AuthorAsc,
    AuthorDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::LikesDesc,
        SortKey::LikesAsc,
        SortKey::AuthorAsc,
        SortKey::AuthorDesc,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::LikesDesc => "likes_desc",
            SortKey::LikesAsc => "likes_asc",
            SortKey::AuthorAsc => "author_asc",
            SortKey::AuthorDesc => "author_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Date (Newest)",
            SortKey::DateAsc => "Date (Oldest)",
            SortKey::LikesDesc => "Likes (Most Popular)",
            SortKey::LikesAsc => "Likes (Least Popular)",
            SortKey::AuthorAsc => "Author (A-Z)",
            SortKey::AuthorDesc => "Author (Z-A)",
        }
    }
}

/// Conjunctive filter over the snapshot. Empty strings mean "no constraint";
/// text and video needles are stored lower-cased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: Option<String>,
    pub author: Option<String>,
    pub video: Option<String>,
    pub date_from: Option<Date>, // inclusive
    pub date_to: Option<Date>,   // inclusive
    pub min_likes: u64,
    pub comment_type: CommentType,
}

fn needle(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_lowercase()) }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn text(mut self, s: impl AsRef<str>) -> Self { self.text = needle(s.as_ref()); self }
    pub fn author(mut self, s: impl AsRef<str>) -> Self {
        let s = s.as_ref();
        self.author = if s.is_empty() { None } else { Some(s.to_string()) };
        self
    }
    pub fn video(mut self, s: impl AsRef<str>) -> Self { self.video = needle(s.as_ref()); self }
    pub fn date_from(mut self, d: Date) -> Self { self.date_from = Some(d); self }
    pub fn date_to(mut self, d: Date) -> Self { self.date_to = Some(d); self }
    /// Accepts `YYYY-MM-DD`, as an `<input type="date">` yields; anything else clears the bound.
    pub fn date_range_str(mut self, from: &str, to: &str) -> Self {
        self.date_from = parse_date(from);
        self.date_to = parse_date(to);
        self
    }
    pub fn min_likes(mut self, n: u64) -> Self { self.min_likes = n; self }
    pub fn comment_type(mut self, t: CommentType) -> Self { self.comment_type = t; self }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
