//! Magpie - a terminal content-browsing client with an offline cache
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use magpie::authors::{derive_authors, lookup_author};
use magpie::{
    Author, Config, FeedEngine, FeedState, HttpApi, Post, PostKind, PostsApi, Query, Store,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args()? {
        Command::Feed { limit, kind } => feed_cli(limit, kind).await,
        Command::Search { query, limit, kind } => search_cli(&query, limit, kind).await,
        Command::Author { id, limit } => author_cli(&id, limit).await,
        Command::Authors { limit } => authors_cli(limit).await,
        Command::History { clear } => history_cli(clear),
        Command::Status => status_cli(),
        Command::Reset => reset_cli(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Feed {
        limit: Option<usize>,
        kind: Option<PostKind>,
    },
    Search {
        query: String,
        limit: Option<usize>,
        kind: Option<PostKind>,
    },
    Author {
        id: String,
        limit: Option<usize>,
    },
    Authors {
        limit: Option<usize>,
    },
    History {
        clear: bool,
    },
    Status,
    Reset,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Feed {
            limit: None,
            kind: None,
        });
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "feed" => Ok(Command::Feed {
            limit: parse_limit(&args),
            kind: parse_kind(&args)?,
        }),

        "search" => {
            let query = args
                .get(2)
                .filter(|a| !a.starts_with('-'))
                .ok_or_else(|| anyhow::anyhow!("Missing search query"))?
                .clone();
            Ok(Command::Search {
                query,
                limit: parse_limit(&args),
                kind: parse_kind(&args)?,
            })
        }

        "author" => {
            let id = args
                .get(2)
                .filter(|a| !a.starts_with('-'))
                .ok_or_else(|| anyhow::anyhow!("Missing author id"))?
                .clone();
            Ok(Command::Author {
                id,
                limit: parse_limit(&args),
            })
        }

        "authors" => Ok(Command::Authors {
            limit: parse_limit(&args),
        }),

        "history" => Ok(Command::History {
            clear: args.iter().any(|a| a == "--clear" || a == "-c"),
        }),

        "status" => Ok(Command::Status),
        "reset" => Ok(Command::Reset),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'magpie --help' for usage"
        )),
    }
}

fn parse_flag_value(args: &[String], long: &str, short: &str) -> Option<String> {
    args.iter()
        .position(|a| a == long || a == short)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_limit(args: &[String]) -> Option<usize> {
    parse_flag_value(args, "--limit", "-l").and_then(|s| s.parse().ok())
}

fn parse_kind(args: &[String]) -> Result<Option<PostKind>> {
    match parse_flag_value(args, "--type", "-t") {
        Some(s) => PostKind::from_str(&s).map(Some).ok_or_else(|| {
            anyhow::anyhow!("Unknown content type: {s}\nSupported: article, audio, video, gif")
        }),
        None => Ok(None),
    }
}

fn print_help() {
    let config_path = magpie::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🐦 Magpie - a terminal content-browsing client

USAGE:
    magpie                             Show the feed
    magpie [COMMAND]

COMMANDS:
    feed [OPTIONS]                     Show the general feed
      Options:
        -l, --limit <n>                Number of posts
        -t, --type <kind>              article | audio | video | gif
      Examples:
        magpie feed
        magpie feed --type video --limit 10

    search <query> [OPTIONS]           Search posts
      Options:
        -l, --limit <n>                Number of posts (default: 30)
        -t, --type <kind>              article | audio | video | gif
      Examples:
        magpie search "rust"
        magpie search "birds" --type gif

    author <id|@username> [OPTIONS]    Show an author profile and their posts
      Options:
        -l, --limit <n>                Number of posts (default: 50)
      Examples:
        magpie author 42
        magpie author @ada

    authors [OPTIONS]                  List authors seen in the feed
      Options:
        -l, --limit <n>                Posts to derive from (default: 100)

    history [--clear]                  Show (or clear) recent searches

    status                             Show offline state and last sync time

    reset                              Clear all locally stored data

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        magpie::LOGO,
        config_path
    );
}

fn print_version() {
    println!("magpie {}", magpie::VERSION);
}

fn build_api(config: &Config) -> HttpApi {
    HttpApi::with_timeout(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )
}

async fn feed_cli(limit: Option<usize>, kind: Option<PostKind>) -> Result<()> {
    let config = Config::load()?;
    let store = Arc::new(Store::open()?);

    let query = Query {
        limit: limit.or(Some(config.post_limit)),
        kind,
        ..Query::default()
    };
    let engine = FeedEngine::new(build_api(&config), Arc::clone(&store), query);
    engine.load().await;

    let state = engine.state();
    if state.is_offline {
        match store.last_sync_time() {
            Some(t) => println!("📡 Offline Mode (last sync {})", t.format("%Y-%m-%d %H:%M UTC")),
            None => println!("📡 Offline Mode"),
        }
    }

    print_outcome(&state, "No posts yet.");
    Ok(())
}

async fn search_cli(query: &str, limit: Option<usize>, kind: Option<PostKind>) -> Result<()> {
    let term = query.trim();
    if term.is_empty() {
        return Err(anyhow::anyhow!("Search query cannot be empty"));
    }

    let config = Config::load()?;
    let store = Arc::new(Store::open()?);
    store.add_search_term(term);

    let engine_query = Query {
        limit: limit.or(Some(30)),
        search: Some(term.to_string()),
        kind,
        ..Query::default()
    };
    let engine = FeedEngine::new(build_api(&config), store, engine_query);
    engine.load().await;

    println!("🔍 Results for \"{term}\"");
    print_outcome(&engine.state(), "No posts found");
    Ok(())
}

async fn author_cli(id: &str, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let store = Arc::new(Store::open()?);

    // An @handle has to resolve to a profile before any posts can be
    // fetched; a raw id can fall back to an author embedded in the posts.
    let (author_id, profile) = if let Some(username) = id.strip_prefix('@') {
        match build_api(&config).user_by_username(username).await {
            Ok(author) => (author.id.clone(), Some(author)),
            Err(e) => {
                eprintln!("✗ {e}");
                return Ok(());
            }
        }
    } else {
        (id.to_string(), None)
    };

    let query = Query {
        limit: limit.or(Some(50)),
        author_id: Some(author_id.clone()),
        ..Query::default()
    };
    let engine = FeedEngine::new(build_api(&config), store, query);
    engine.load().await;

    let state = engine.state();
    match profile {
        Some(author) => print_author_header(&author, state.posts.len()),
        None => match lookup_author(engine.api(), &author_id, &state.posts).await {
            Ok(author) => print_author_header(&author, state.posts.len()),
            Err(e) => eprintln!("✗ {e}"),
        },
    }

    print_outcome(&state, "No posts found");
    Ok(())
}

async fn authors_cli(limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let store = Arc::new(Store::open()?);

    let query = Query {
        limit: limit.or(Some(100)),
        ..Query::default()
    };
    let engine = FeedEngine::new(build_api(&config), store, query);
    engine.load().await;

    let state = engine.state();
    if state.posts.is_empty() {
        if let Some(error) = &state.error {
            eprintln!("✗ {error}");
        } else {
            println!("No authors yet.");
        }
        return Ok(());
    }

    let authors = derive_authors(&state.posts);
    println!(
        "{} author{}\n",
        authors.len(),
        if authors.len() == 1 { "" } else { "s" }
    );

    for author in &authors {
        println!(
            "  {} ({}) · Joined {}",
            author.display_name,
            author.handle(),
            author.joined()
        );
    }

    Ok(())
}

fn history_cli(clear: bool) -> Result<()> {
    let store = Store::open()?;

    if clear {
        store.clear_search_history();
        println!("✓ Search history cleared");
        return Ok(());
    }

    let history = store.search_history();
    if history.is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    println!("Recent searches:\n");
    for (i, term) in history.iter().enumerate() {
        println!("  {}. {term}", i + 1);
    }

    Ok(())
}

fn status_cli() -> Result<()> {
    let store = Store::open()?;

    if store.offline_status() {
        println!("📡 Offline Mode");
    } else {
        println!("✓ Online");
    }

    match store.last_sync_time() {
        Some(t) => println!("Last sync: {}", t.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Last sync: never"),
    }

    Ok(())
}

fn reset_cli() -> Result<()> {
    let store = Store::open()?;
    store.clear_all();
    println!("✓ Local data cleared");
    Ok(())
}

fn print_outcome(state: &FeedState, empty_message: &str) {
    if let Some(error) = &state.error {
        if state.posts.is_empty() {
            eprintln!("✗ {error}");
            return;
        }
        println!("⚠ {error}");
    }

    if state.posts.is_empty() {
        println!("{empty_message}");
        return;
    }

    print_posts(&state.posts);
}

fn print_posts(posts: &[Post]) {
    for post in posts {
        println!(
            "\n{} {} · {}",
            post.kind.emoji(),
            post.title,
            post.relative_time()
        );
        println!("@{}", post.author.username);
        println!("{}", post.preview(100));
    }
}

fn print_author_header(author: &Author, post_count: usize) {
    println!("\n{}", author.display_name);
    println!("{} · Joined {}", author.handle(), author.joined());
    println!(
        "{post_count} post{}",
        if post_count == 1 { "" } else { "s" }
    );
    println!("{}", "─".repeat(60));
}
