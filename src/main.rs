use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use feedsync::config::Config;
use feedsync::logging;
use feedsync::model::{Entity, LikeResponse, Notification, Post, User};
use feedsync::pagination::{PaginationController, PaginationOptions};
use feedsync::source::{Endpoint, MemorySource};
use feedsync::store::Store;

const DEMO_RECORDS: u64 = 35;

/// Replays a short session against in-memory endpoints: two notification
/// screens and a newsfeed share one store, load pages, and pick up edits
/// dispatched by each other.
#[derive(Parser, Debug)]
#[command(name = "feedsync", version, about = "Paged feed synchronization demo")]
struct Args {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Pages each screen loads before edits are dispatched.
    #[arg(long, default_value_t = 2)]
    pages: u32,

    /// Overrides `pagination.page_size` from the config file.
    #[arg(long = "page-size")]
    page_size: Option<usize>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };

    if let Some(page_size) = args.page_size {
        config.pagination.page_size = page_size;
        config.validate()?;
    }
    Ok(config)
}

fn author(id: u64) -> User {
    User {
        id,
        username: format!("user{}", id),
        profile_image: None,
    }
}

fn sample_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            author: author(id % 5 + 1),
            content: format!("post #{}", id),
            likes: id % 7,
            is_liked: false,
            comment_count: 0,
            posted_at: String::new(),
        })
        .collect()
}

fn sample_notifications(posts: &[Post]) -> Vec<Notification> {
    posts
        .iter()
        .map(|post| Notification {
            id: post.id,
            content: format!("{} liked your post", post.author.username),
            is_checked: false,
            post: Some(post.clone()),
            created_at: String::new(),
        })
        .collect()
}

fn checked_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| n.is_checked).count()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init_tracing(&config.logging)?;

    let options = PaginationOptions::from(&config.pagination);
    let store = Store::new();

    let posts = sample_posts(DEMO_RECORDS);
    let notification_source = Arc::new(MemorySource::new(sample_notifications(&posts)));
    let post_source = Arc::new(MemorySource::new(posts));

    let mut tab = PaginationController::new(
        notification_source.clone(),
        Endpoint::Notifications,
        options,
    );
    let mut popup =
        PaginationController::new(notification_source, Endpoint::Notifications, options);
    let mut feed = PaginationController::new(
        post_source.clone(),
        Endpoint::Newsfeed { user_id: None },
        options,
    );

    tab.bind_store(&store);
    popup.bind_store(&store);
    feed.bind_store(&store);

    for _ in 0..args.pages {
        tab.load_more();
        popup.load_more();
        feed.load_more();
        tab.settle().await;
        popup.settle().await;
        feed.settle().await;
    }

    tracing::info!(
        tab = tab.items().len(),
        popup = popup.items().len(),
        feed = feed.items().len(),
        "Pages loaded"
    );

    if let Some(first) = tab.items().first().cloned() {
        store.notifications().dispatch_checked(&first, true);
    }
    if let Some(post) = feed.items().first().cloned() {
        let response = LikeResponse {
            likes: post.likes + 1,
            is_liked: true,
        };
        store.posts().dispatch_like(&post, response);
    }

    let created = Post {
        id: DEMO_RECORDS + 1,
        author: author(1),
        content: "just posted".to_string(),
        likes: 0,
        is_liked: false,
        comment_count: 0,
        posted_at: String::new(),
    };
    post_source.push_front(created.clone());
    store.posts().dispatch_created(created.clone());

    tab.process_pending();
    popup.process_pending();
    feed.process_pending();

    tracing::info!(
        tab_checked = checked_count(tab.items()),
        popup_checked = checked_count(popup.items()),
        feed_head = ?feed.items().first().map(Entity::id),
        "Edits applied"
    );

    feed.refresh();
    feed.settle().await;

    tracing::info!(
        feed = feed.items().len(),
        state = %feed.loading_state(),
        contains_created = feed.state().contains(&created.id),
        "Newsfeed refreshed"
    );

    drop(popup);
    tracing::info!(
        subscribers = store.notifications().subscriber_count(),
        "Popup closed"
    );

    Ok(())
}
