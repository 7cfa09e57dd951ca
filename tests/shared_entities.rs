mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{comment, ids, notification, notifications, options, post, posts};
use feedsync::model::{Comment, LikeResponse, Notification};
use feedsync::pagination::PaginationController;
use feedsync::source::{Endpoint, MemorySource};
use feedsync::store::{Operation, Store};

async fn notification_screen(
    store: &Store,
    source: Arc<MemorySource<Notification>>,
    page_size: usize,
) -> PaginationController<Notification> {
    let mut screen = PaginationController::new(source, Endpoint::Notifications, options(page_size));
    screen.bind(store.notifications());
    screen.load_more();
    screen.settle().await;
    screen
}

#[tokio::test]
async fn checked_notification_updates_every_screen() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(notifications(1..=5)));
    let mut tab = notification_screen(&store, source.clone(), 10).await;
    let mut popup = notification_screen(&store, source, 10).await;

    let opened = popup.items()[2].clone();
    store.notifications().dispatch_checked(&opened, true);

    assert_eq!(tab.process_pending(), 1);
    assert_eq!(popup.process_pending(), 1);

    for screen in [&tab, &popup] {
        assert_eq!(ids(screen.items()), vec![1, 2, 3, 4, 5]);
        let checked: Vec<u64> = screen
            .items()
            .iter()
            .filter(|n| n.is_checked)
            .map(|n| n.id)
            .collect();
        assert_eq!(checked, vec![3]);
    }
}

#[tokio::test]
async fn delete_only_touches_screens_holding_the_id() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(notifications(1..=10)));
    let mut tab = notification_screen(&store, source.clone(), 10).await;
    let mut popup = notification_screen(&store, source, 3).await;

    store.notifications().dispatch(Operation::Delete(7));
    tab.process_pending();
    popup.process_pending();

    assert_eq!(ids(tab.items()), vec![1, 2, 3, 4, 5, 6, 8, 9, 10]);
    assert_eq!(ids(popup.items()), vec![1, 2, 3]);
}

#[tokio::test]
async fn edit_for_unknown_id_is_ignored() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(notifications(1..=3)));
    let mut tab = notification_screen(&store, source, 10).await;
    let before = tab.items().to_vec();

    store
        .notifications()
        .dispatch_checked(&notification(99), true);
    tab.process_pending();

    assert_eq!(tab.items(), before.as_slice());
}

#[tokio::test]
async fn operations_before_binding_are_not_replayed() {
    let store = Store::new();
    store.notifications().dispatch(Operation::Delete(1));

    let source = Arc::new(MemorySource::new(notifications(1..=3)));
    let mut tab = notification_screen(&store, source, 10).await;

    assert_eq!(tab.process_pending(), 0);
    assert_eq!(ids(tab.items()), vec![1, 2, 3]);
}

#[tokio::test]
async fn liked_post_reaches_feed_and_profile_feed() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(posts(1..=6)));

    let mut feed =
        PaginationController::new(source.clone(), Endpoint::Newsfeed { user_id: None }, options(10));
    let mut profile_feed =
        PaginationController::new(source, Endpoint::Newsfeed { user_id: Some(2) }, options(10));
    for screen in [&mut feed, &mut profile_feed] {
        screen.bind(store.posts());
        screen.load_more();
        screen.settle().await;
    }

    let liked = feed.items()[4].clone();
    store.posts().dispatch_like(
        &liked,
        LikeResponse {
            likes: 12,
            is_liked: true,
        },
    );
    feed.process_pending();
    profile_feed.process_pending();

    for screen in [&feed, &profile_feed] {
        let post = &screen.items()[4];
        assert_eq!(post.id, 5);
        assert_eq!(post.likes, 12);
        assert!(post.is_liked);
    }
}

#[tokio::test]
async fn ids_stay_unique_across_mixed_operations() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(posts(1..=5)));
    let mut feed =
        PaginationController::new(source, Endpoint::Newsfeed { user_id: None }, options(10));
    feed.bind(store.posts());
    feed.load_more();
    feed.settle().await;

    let posts_dispatcher = store.posts();
    posts_dispatcher.dispatch_created(post(6));
    posts_dispatcher.dispatch_created(post(3));
    posts_dispatcher.dispatch(Operation::Edit(post(6)));
    posts_dispatcher.dispatch_deleted(1);
    posts_dispatcher.dispatch_created(post(1));
    feed.process_pending();
    feed.insert(post(2), 0);
    feed.insert(post(7), 100);

    let unique: HashSet<u64> = ids(feed.items()).into_iter().collect();
    assert_eq!(unique.len(), feed.items().len());
    assert_eq!(ids(feed.items()), vec![1, 6, 2, 3, 4, 5, 7]);
}

#[tokio::test]
async fn posted_comments_land_in_their_thread() {
    let store = Store::new();
    let thread = vec![
        comment(1, None),
        comment(2, Some(1)),
        comment(3, None),
        comment(4, Some(3)),
        comment(5, Some(3)),
    ];
    let source = Arc::new(MemorySource::new(thread));
    let mut screen: PaginationController<Comment> =
        PaginationController::new(source, Endpoint::Comments { post_id: 1 }, options(10));
    screen.bind_store(&store);
    screen.load_more();
    screen.settle().await;

    assert_eq!(screen.insert_comment(comment(10, Some(1))), 2);
    assert_eq!(screen.insert_comment(comment(11, Some(3))), 6);
    assert_eq!(screen.insert_comment(comment(12, None)), 7);
    assert_eq!(screen.insert_comment(comment(13, Some(99))), 8);

    assert_eq!(
        ids(screen.items()),
        vec![1, 2, 10, 3, 4, 5, 11, 12, 13]
    );

    store.comments().dispatch(Operation::Delete(10));
    screen.process_pending();
    assert_eq!(ids(screen.items()), vec![1, 2, 3, 4, 5, 11, 12, 13]);
}
