//! Scriptable in-memory API for engine tests
//!
//! Responses are queued per operation and consumed in call order. Gates make
//! interleavings deterministic: each call pops one gate (if any) and waits on
//! it before returning, so a test can hold one resolution in flight while
//! another completes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

use crate::models::{Author, Post, PostKind};

use super::{ApiError, PostsApi};

type PostsResult = Result<Vec<Post>, ApiError>;
type AuthorResult = Result<Author, ApiError>;

/// In-memory [`PostsApi`] with queued responses
#[derive(Default)]
pub struct StubApi {
    feed: Mutex<VecDeque<PostsResult>>,
    by_author: Mutex<VecDeque<PostsResult>>,
    search: Mutex<VecDeque<PostsResult>>,
    users: Mutex<VecDeque<AuthorResult>>,
    gates: Mutex<VecDeque<Arc<Notify>>>,
    feed_count: AtomicUsize,
    by_author_count: AtomicUsize,
    search_count: AtomicUsize,
    user_count: AtomicUsize,
}

impl StubApi {
    pub fn push_feed(&self, result: PostsResult) {
        self.lock(&self.feed).push_back(result);
    }

    pub fn push_by_author(&self, result: PostsResult) {
        self.lock(&self.by_author).push_back(result);
    }

    pub fn push_search(&self, result: PostsResult) {
        self.lock(&self.search).push_back(result);
    }

    pub fn push_user(&self, result: AuthorResult) {
        self.lock(&self.users).push_back(result);
    }

    /// Queue a gate; the next API call waits on it before returning
    pub fn push_gate(&self, gate: Arc<Notify>) {
        self.lock(&self.gates).push_back(gate);
    }

    pub fn feed_calls(&self) -> usize {
        self.feed_count.load(Ordering::SeqCst)
    }

    pub fn author_calls(&self) -> usize {
        self.by_author_count.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_count.load(Ordering::SeqCst)
    }

    fn lock<'a, T>(&self, queue: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn wait_gate(&self) {
        let gate = self.lock(&self.gates).pop_front();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn pop(&self, queue: &Mutex<VecDeque<PostsResult>>, empty: ApiError) -> PostsResult {
        self.lock(queue).pop_front().unwrap_or(Err(empty))
    }
}

impl PostsApi for StubApi {
    async fn posts(
        &self,
        _limit: Option<usize>,
        _kind: Option<PostKind>,
    ) -> Result<Vec<Post>, ApiError> {
        self.feed_count.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.pop(&self.feed, ApiError::LoadPosts)
    }

    async fn posts_by_author(
        &self,
        _author_id: &str,
        _limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError> {
        self.by_author_count.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.pop(&self.by_author, ApiError::LoadAuthorPosts)
    }

    async fn search_posts(
        &self,
        _query: &str,
        _kind: Option<PostKind>,
        _limit: Option<usize>,
    ) -> Result<Vec<Post>, ApiError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.pop(&self.search, ApiError::SearchPosts)
    }

    async fn user(&self, _id: &str) -> Result<Author, ApiError> {
        self.user_count.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.lock(&self.users)
            .pop_front()
            .unwrap_or(Err(ApiError::LoadProfile))
    }

    async fn user_by_username(&self, _username: &str) -> Result<Author, ApiError> {
        self.user_count.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.lock(&self.users)
            .pop_front()
            .unwrap_or(Err(ApiError::LoadProfile))
    }
}
