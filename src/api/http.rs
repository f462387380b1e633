//! HTTP implementation of the posts API

use std::time::Duration;

use reqwest::Client;

use crate::models::{Author, Post, PostKind};

use super::{ApiError, PostsApi};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the posts service
pub struct HttpApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpApi {
    /// Create a new client with the default request timeout
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn get_posts(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Post>, reqwest::Error> {
        tracing::debug!("GET {endpoint}");
        let response = self
            .client
            .get(self.api_url(endpoint))
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        response.json().await
    }

    async fn get_author(&self, endpoint: &str) -> Result<Author, reqwest::Error> {
        tracing::debug!("GET {endpoint}");
        let response = self
            .client
            .get(self.api_url(endpoint))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        response.json().await
    }
}

impl PostsApi for HttpApi {
    async fn posts(
        &self,
        limit: Option<usize>,
        kind: Option<PostKind>,
    ) -> Result<Vec<Post>, ApiError> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(kind) = kind {
            query.push(("type", kind.api_value().to_string()));
        }

        self.get_posts("/api/posts", &query).await.map_err(|e| {
            tracing::error!("Failed to fetch posts: {e}");
            ApiError::LoadPosts
        })
    }

    async fn posts_by_author(
        &self,
        author_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError> {
        let endpoint = format!("/api/posts/author/{}", urlencoding::encode(author_id));
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        self.get_posts(&endpoint, &query).await.map_err(|e| {
            tracing::error!("Failed to fetch author posts: {e}");
            ApiError::LoadAuthorPosts
        })
    }

    async fn search_posts(
        &self,
        query: &str,
        kind: Option<PostKind>,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError> {
        let mut params = vec![("search", query.to_string())];
        if let Some(kind) = kind {
            params.push(("type", kind.api_value().to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        self.get_posts("/api/posts", &params).await.map_err(|e| {
            tracing::error!("Failed to search posts: {e}");
            ApiError::SearchPosts
        })
    }

    async fn user(&self, id: &str) -> Result<Author, ApiError> {
        let endpoint = format!("/api/users/{}", urlencoding::encode(id));

        self.get_author(&endpoint).await.map_err(|e| {
            tracing::error!("Failed to fetch user: {e}");
            ApiError::LoadProfile
        })
    }

    async fn user_by_username(&self, username: &str) -> Result<Author, ApiError> {
        let endpoint = format!("/api/users/username/{}", urlencoding::encode(username));

        self.get_author(&endpoint).await.map_err(|e| {
            tracing::error!("Failed to fetch user by username: {e}");
            ApiError::LoadProfile
        })
    }
}
