//! Fetch policy engine for post queries
//!
//! Resolves a [`Query`] against the remote API and maintains an observable
//! [`FeedState`] for consumers. Successful general-feed fetches are written
//! through to the local store; failed ones fall back to the cached set with
//! an advisory message and a raised offline flag. Author-scoped and
//! search-scoped results are never cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::PostsApi;
use crate::db::Store;
use crate::models::{Post, PostKind};

/// Advisory message shown while the feed is served from cache
pub const OFFLINE_NOTICE: &str = "Showing cached posts. Pull to refresh when online.";

/// Parameters of a post fetch
///
/// At most one of `author_id` and `search` is honored per resolution:
/// an author filter wins over a search term, and a blank search term is
/// treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Result-count cap
    pub limit: Option<usize>,
    /// Free-text search term
    pub search: Option<String>,
    /// Content-kind filter (general and search modes only)
    pub kind: Option<PostKind>,
    /// Restrict to a single author's posts
    pub author_id: Option<String>,
}

impl Query {
    /// The single fetch mode this query resolves to
    pub fn mode(&self) -> FetchMode {
        if let Some(author_id) = self.author_id.as_deref().filter(|s| !s.is_empty()) {
            return FetchMode::Author(author_id.to_string());
        }
        if let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return FetchMode::Search(term.to_string());
        }
        FetchMode::General
    }
}

/// The fetch shape a [`Query`] resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// Posts owned by a single author
    Author(String),
    /// Free-text search across posts
    Search(String),
    /// The unfiltered-by-author, unfiltered-by-search feed
    General,
}

/// Observable state of an active query
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Currently displayed posts
    pub posts: Vec<Post>,
    /// A full resolution is in flight
    pub loading: bool,
    /// Advisory message for the last failure, if any
    pub error: Option<String>,
    /// A pull-to-refresh resolution is in flight
    pub refreshing: bool,
    /// Displayed posts came from the cache rather than the network
    pub is_offline: bool,
}

/// Fetch policy engine for one active query
///
/// Each engine owns its state; independent engines with different queries do
/// not interfere (the store is the only shared resource). Methods take
/// `&self`, so a later resolution may begin while an earlier one is still in
/// flight; the earlier one then settles as a no-op instead of downgrading
/// fresher state.
pub struct FeedEngine<A> {
    api: A,
    store: Arc<Store>,
    query: Mutex<Query>,
    state: Mutex<FeedState>,
    generation: AtomicU64,
}

impl<A: PostsApi> FeedEngine<A> {
    /// Create an engine for the given query
    ///
    /// The engine starts in the loading state; call [`Self::load`] to run the
    /// initial resolution.
    pub fn new(api: A, store: Arc<Store>, query: Query) -> Self {
        Self {
            api,
            store,
            query: Mutex::new(query),
            state: Mutex::new(FeedState {
                loading: true,
                ..FeedState::default()
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot the current state
    pub fn state(&self) -> FeedState {
        self.lock_state().clone()
    }

    /// Access the underlying API client
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot the current query
    pub fn query(&self) -> Query {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the query, re-resolving only if it actually changed
    pub async fn set_query(&self, query: Query) {
        {
            let mut current = self.query.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == query {
                return;
            }
            *current = query;
        }
        self.resolve(true).await;
    }

    /// Run the initial resolution with the full loading state
    pub async fn load(&self) {
        self.resolve(true).await;
    }

    /// Re-fetch after a hard error, showing the full loading state
    pub async fn retry(&self) {
        self.resolve(true).await;
    }

    /// Re-fetch without the full loading state (pull-to-refresh)
    ///
    /// Existing posts stay visible while `refreshing` is raised.
    pub async fn refresh(&self) {
        self.lock_state().refreshing = true;
        self.resolve(false).await;
    }

    async fn resolve(&self, show_loading: bool) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock_state();
            if show_loading {
                state.loading = true;
            }
            state.error = None;
        }

        let query = self.query();
        let mode = query.mode();

        let result = match &mode {
            FetchMode::Author(id) => self.api.posts_by_author(id, query.limit).await,
            FetchMode::Search(term) => {
                self.api.search_posts(term, query.kind, query.limit).await
            }
            FetchMode::General => self.api.posts(query.limit, query.kind).await,
        };

        // A newer resolution began while this one was in flight; applying
        // this result would clobber fresher state.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding superseded resolution");
            return;
        }

        match result {
            Ok(posts) => {
                // Cache for offline use (only for the general feed)
                if mode == FetchMode::General {
                    self.store.cache_posts(&posts);
                }
                self.store.set_offline_status(false);

                let mut state = self.lock_state();
                state.posts = posts;
                state.error = None;
                state.is_offline = false;
            }
            Err(e) => {
                let cached = if mode == FetchMode::General {
                    self.store.cached_posts()
                } else {
                    Vec::new()
                };

                if cached.is_empty() {
                    self.lock_state().error = Some(e.to_string());
                } else {
                    self.store.set_offline_status(true);

                    let mut state = self.lock_state();
                    state.posts = cached;
                    state.is_offline = true;
                    state.error = Some(OFFLINE_NOTICE.to_string());
                }
            }
        }

        let mut state = self.lock_state();
        state.loading = false;
        state.refreshing = false;
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
