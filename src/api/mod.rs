//! API client for the posts service

pub mod http;

#[cfg(test)]
pub(crate) mod stub;

pub use http::HttpApi;

use crate::models::{Author, Post, PostKind};

/// API failure, surfaced to the end user as an advisory message
///
/// The `Display` strings are shown directly in the UI next to a
/// retry/refresh affordance; they are not diagnostic codes. The underlying
/// transport error is logged where the failure is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The general feed could not be fetched
    #[error("Failed to load posts. Please check your connection.")]
    LoadPosts,
    /// An author's posts could not be fetched
    #[error("Failed to load author posts. Please check your connection.")]
    LoadAuthorPosts,
    /// A search request failed
    #[error("Failed to search posts. Please check your connection.")]
    SearchPosts,
    /// An author profile could not be fetched
    #[error("Failed to load user profile. Please check your connection.")]
    LoadProfile,
}

/// Unified API trait for the posts service
#[allow(async_fn_in_trait)]
pub trait PostsApi {
    /// Get the general feed (optionally capped and filtered by kind)
    async fn posts(
        &self,
        limit: Option<usize>,
        kind: Option<PostKind>,
    ) -> Result<Vec<Post>, ApiError>;

    /// Get posts owned by a single author
    async fn posts_by_author(
        &self,
        author_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError>;

    /// Search posts by free text (optionally filtered by kind)
    async fn search_posts(
        &self,
        query: &str,
        kind: Option<PostKind>,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError>;

    /// Get an author profile by id
    async fn user(&self, id: &str) -> Result<Author, ApiError>;

    /// Get an author profile by username
    async fn user_by_username(&self, username: &str) -> Result<Author, ApiError>;
}
