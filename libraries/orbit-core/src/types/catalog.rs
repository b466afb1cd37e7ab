//! Catalog row and query types exchanged with the data collaborator

use crate::types::{Track, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// One row of the backend's audio stories table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStoryRow {
    /// Track identifier
    pub id: TrackId,

    /// Title
    pub title: String,

    /// Public media URL
    pub audio_url: String,

    /// Public cover image URL
    #[serde(default)]
    pub cover_image_url: Option<String>,

    /// Category ("music", "podcast", "stories", ...)
    #[serde(default)]
    pub category: Option<String>,

    /// Creation timestamp as stored by the backend
    #[serde(default)]
    pub created_at: Option<String>,

    /// Uploader's user id
    pub uploaded_by: UserId,

    /// Like counter
    #[serde(default)]
    pub likes: i64,
}

impl AudioStoryRow {
    /// Convert into a playable track credited to `artist`
    ///
    /// Empty cover URLs are treated as missing.
    pub fn into_track(self, artist: impl Into<String>) -> Track {
        let cover_url = self.cover_image_url.filter(|url| !url.is_empty());
        Track {
            id: self.id,
            audio_url: self.audio_url,
            cover_url,
            title: self.title,
            artist: artist.into(),
        }
    }
}

/// Feed ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackSort {
    /// Newest first
    #[default]
    Latest,

    /// Oldest first
    Oldest,

    /// Highest like count first
    MostLiked,
}

/// Filter for fetching tracks from the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackQuery {
    /// Category to restrict to (`None` or `"all"` for every category)
    pub category: Option<String>,

    /// Case-insensitive title substring
    pub search: Option<String>,

    /// Ordering
    pub sort: TrackSort,
}

impl TrackQuery {
    /// Query for every track with the given ordering
    pub fn new(sort: TrackSort) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Restrict to a category
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to titles containing `search`
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Effective category filter (`"all"` and blank mean none)
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    /// Effective search term (blank means none)
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether `row` passes this query's filters
    ///
    /// Used by in-memory catalogs; remote catalogs translate the filters into
    /// backend queries instead.
    pub fn matches(&self, row: &AudioStoryRow) -> bool {
        if let Some(category) = self.category_filter() {
            if row.category.as_deref() != Some(category) {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            if !row.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, title: &str, category: Option<&str>) -> AudioStoryRow {
        AudioStoryRow {
            id: TrackId::new(id),
            title: title.to_string(),
            audio_url: format!("https://cdn/{id}.mp3"),
            cover_image_url: None,
            category: category.map(str::to_string),
            created_at: None,
            uploaded_by: UserId::new("u1"),
            likes: 0,
        }
    }

    #[test]
    fn all_category_means_no_filter() {
        let query = TrackQuery::new(TrackSort::Latest).category("all");
        assert_eq!(query.category_filter(), None);
        assert!(query.matches(&row("1", "x", Some("podcast"))));
    }

    #[test]
    fn category_and_search_filters_combine() {
        let query = TrackQuery::default().category("music").search("  night ");
        assert!(query.matches(&row("1", "Late Night Drive", Some("music"))));
        assert!(!query.matches(&row("2", "Late Night Drive", Some("podcast"))));
        assert!(!query.matches(&row("3", "Morning", Some("music"))));
    }

    #[test]
    fn sort_uses_kebab_case() {
        let sort: TrackSort = serde_json::from_str("\"most-liked\"").unwrap();
        assert_eq!(sort, TrackSort::MostLiked);
    }

    #[test]
    fn empty_cover_becomes_none() {
        let mut r = row("1", "t", None);
        r.cover_image_url = Some(String::new());
        let track = r.into_track("Ada");
        assert_eq!(track.cover_url, None);
        assert_eq!(track.artist, "Ada");
    }
}
