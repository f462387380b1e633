//! Local persistent store (`SQLite`) for cached posts, search history, and the offline flag
//!
//! Values are JSON-serialized into a single key-value table. Reads and writes
//! never fail past this module's boundary: internal failures are logged and
//! degrade to safe defaults (empty list, `None`, `false`, no-op). Only opening
//! the store itself is fallible.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::Post;
use crate::paths;

/// Maximum number of retained search history entries
pub const SEARCH_HISTORY_LIMIT: usize = 10;

const KEY_CACHED_POSTS: &str = "cached_posts";
const KEY_SEARCH_HISTORY: &str = "search_history";
const KEY_LAST_SYNC: &str = "last_sync";
const KEY_IS_OFFLINE: &str = "is_offline";

/// Store connection wrapper
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open or create the store at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_path(&path)
    }

    /// Open or create the store at a specific path
    pub fn open_path(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let conn = Connection::open(path).context("Failed to open store")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init()?;

        Ok(store)
    }

    /// Get the default store path
    pub fn default_path() -> Result<PathBuf> {
        paths::store_path()
    }

    /// Initialize the schema
    fn init(&self) -> Result<()> {
        self.lock_conn().execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Key-value plumbing ====================

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn();
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.lock_conn().execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock_conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw).context("corrupt value")?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    // ==================== Post cache ====================

    /// Persist the general-feed result set and stamp the sync time
    ///
    /// Best effort: a write failure is logged and swallowed.
    pub fn cache_posts(&self, posts: &[Post]) {
        if let Err(e) = self.try_cache_posts(posts) {
            tracing::warn!("Failed to cache posts: {e}");
        }
    }

    fn try_cache_posts(&self, posts: &[Post]) -> Result<()> {
        self.set_json(KEY_CACHED_POSTS, &posts)?;
        self.set_raw(KEY_LAST_SYNC, &Utc::now().to_rfc3339())
    }

    /// Get the cached general-feed posts (empty if absent or unreadable)
    pub fn cached_posts(&self) -> Vec<Post> {
        match self.get_json(KEY_CACHED_POSTS) {
            Ok(posts) => posts.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read cached posts: {e}");
                Vec::new()
            }
        }
    }

    /// Get the timestamp of the last successful general-feed fetch
    pub fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        match self.get_raw(KEY_LAST_SYNC) {
            Ok(raw) => raw
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            Err(e) => {
                tracing::warn!("Failed to read last sync time: {e}");
                None
            }
        }
    }

    // ==================== Search history ====================

    /// Insert a term at the front of the search history
    ///
    /// An existing entry moves to the front instead of duplicating; the
    /// history is capped at [`SEARCH_HISTORY_LIMIT`] entries.
    pub fn add_search_term(&self, term: &str) {
        if let Err(e) = self.try_add_search_term(term) {
            tracing::warn!("Failed to add search term: {e}");
        }
    }

    fn try_add_search_term(&self, term: &str) -> Result<()> {
        let mut history = self.search_history();
        history.retain(|t| t != term);
        history.insert(0, term.to_string());
        history.truncate(SEARCH_HISTORY_LIMIT);
        self.set_json(KEY_SEARCH_HISTORY, &history)
    }

    /// Get the search history, most recent first
    pub fn search_history(&self) -> Vec<String> {
        match self.get_json(KEY_SEARCH_HISTORY) {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read search history: {e}");
                Vec::new()
            }
        }
    }

    /// Remove all search history entries
    pub fn clear_search_history(&self) {
        if let Err(e) = self.remove(KEY_SEARCH_HISTORY) {
            tracing::warn!("Failed to clear search history: {e}");
        }
    }

    // ==================== Offline flag ====================

    /// Persist whether displayed data came from cache rather than network
    pub fn set_offline_status(&self, offline: bool) {
        if let Err(e) = self.set_json(KEY_IS_OFFLINE, &offline) {
            tracing::warn!("Failed to set offline status: {e}");
        }
    }

    /// Get the persisted offline flag (`false` if unset or unreadable)
    pub fn offline_status(&self) -> bool {
        match self.get_json(KEY_IS_OFFLINE) {
            Ok(offline) => offline.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Failed to read offline status: {e}");
                false
            }
        }
    }

    // ==================== Maintenance ====================

    /// Remove all persisted data (cache, history, sync time, offline flag)
    pub fn clear_all(&self) {
        for key in [
            KEY_CACHED_POSTS,
            KEY_SEARCH_HISTORY,
            KEY_LAST_SYNC,
            KEY_IS_OFFLINE,
        ] {
            if let Err(e) = self.remove(key) {
                tracing::warn!("Failed to clear {key}: {e}");
            }
        }
    }
}
