//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;

/// A content post, owned by one author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier
    pub id: String,
    /// Post title
    pub title: String,
    /// Body content (markdown text or a media URL, depending on kind)
    pub content: String,
    /// Content kind
    #[serde(rename = "contentType")]
    pub kind: PostKind,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// When the post was last updated
    pub updated_at: DateTime<Utc>,
    /// The owning author, embedded by the API
    pub author: Author,
}

/// Content kind of a post
///
/// Articles travel as `"markdown"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Markdown article
    #[serde(rename = "markdown")]
    Article,
    /// Audio clip
    Audio,
    /// Video clip
    Video,
    /// Animated GIF
    Gif,
}

impl PostKind {
    /// Get all content kinds
    pub const fn all() -> &'static [Self] {
        &[Self::Article, Self::Audio, Self::Video, Self::Gif]
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Gif => "GIF",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Article => "📝",
            Self::Audio => "🎵",
            Self::Video => "🎬",
            Self::Gif => "🎭",
        }
    }

    /// Value used for the API `type` query parameter
    pub const fn api_value(&self) -> &'static str {
        match self {
            Self::Article => "markdown",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Gif => "gif",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "article" | "articles" | "markdown" => Some(Self::Article),
            "audio" => Some(Self::Audio),
            "video" | "videos" => Some(Self::Video),
            "gif" | "gifs" => Some(Self::Gif),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Post {
    /// Get a short preview of the content (for list display)
    pub fn preview(&self, max_len: usize) -> String {
        let content = self.content.replace('\n', " ");
        if content.len() <= max_len {
            content
        } else {
            format!("{}...", &content[..max_len.saturating_sub(3)])
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds())
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&PostKind::Article).unwrap(),
            "\"markdown\""
        );
        assert_eq!(serde_json::to_string(&PostKind::Gif).unwrap(), "\"gif\"");

        let kind: PostKind = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(kind, PostKind::Article);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(PostKind::from_str("article"), Some(PostKind::Article));
        assert_eq!(PostKind::from_str("markdown"), Some(PostKind::Article));
        assert_eq!(PostKind::from_str("GIFs"), Some(PostKind::Gif));
        assert_eq!(PostKind::from_str("podcast"), None);
    }
}
