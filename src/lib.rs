//! # Magpie 🐦
//!
//! A terminal content-browsing client with an offline cache.
//!
//! ## Overview
//!
//! Magpie lists, filters, and searches posts (articles, audio, video, GIFs)
//! and author profiles from a remote posts API. The most recent general feed
//! is written through to a local store, so the feed stays readable when the
//! network is not.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                │
//! │     Parses commands and prints feed/author/search output    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │     Engine      │ │     Authors     │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Query modes   │ │ • Dedup + sort  │
//! │ • API base URL  │ │ • Cache policy  │ │ • Profile       │
//! │ • Post limit    │ │ • Feed state    │ │   fallback      │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Store      │ │       API       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Post cache    │ │ • HTTP client   │ │ • Post          │
//! │ • Search history│ │ • Error taxonomy│ │ • PostKind      │
//! │ • Offline flag  │ │ • Unified trait │ │ • Author        │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Posts API trait and HTTP client
//! - [`authors`] — Author derivation and profile lookup
//! - [`config`] — Configuration management
//! - [`db`] — `SQLite` key-value store for cache, history, offline flag
//! - [`engine`] — Fetch policy engine (cache write-through and fallback)
//! - [`models`] — Data models (Post, `PostKind`, Author)
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use magpie::{FeedEngine, HttpApi, Query, Store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(Store::open()?);
//!     let api = HttpApi::new("http://localhost:3000");
//!     let engine = FeedEngine::new(api, store, Query::default());
//!
//!     engine.load().await;
//!     println!("{} posts", engine.state().posts.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Three query shapes** — general feed, free-text search, by author
//! - **Offline Cache** — read the feed without internet
//! - **Search History** — recent terms, deduplicated, capped
//! - **Fast** — async networking with Tokio

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod authors;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod paths;

// Re-export main types for convenience
pub use api::{ApiError, HttpApi, PostsApi};
pub use config::Config;
pub use db::Store;
pub use engine::{FeedEngine, FeedState, FetchMode, OFFLINE_NOTICE, Query};
pub use models::{Author, Post, PostKind};

/// ASCII logo for the application
pub const LOGO: &str = r"
                            _
  __ _  ___ ____ ____  (_)__
 /  ' \/ _ `/ _ `/ _ \/ / -_)
/_/_/_/\_,_/\_, / .__/_/\__/
           /___/_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
