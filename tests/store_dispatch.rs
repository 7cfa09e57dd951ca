mod common;

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use common::{ids, notification, options, post, posts, user, STEP_TIMEOUT};
use feedsync::model::{Notification, Post, UserProfile};
use feedsync::pagination::PaginationController;
use feedsync::source::{Endpoint, MemorySource};
use feedsync::store::{Dispatcher, Operation, OperationKind, Store};

fn profile(intro: &str) -> UserProfile {
    UserProfile {
        id: 1,
        username: "user1".to_string(),
        self_intro: intro.to_string(),
        profile_image: None,
        cover_image: None,
        company: vec!["acme".to_string()],
        university: Vec::new(),
    }
}

#[test]
fn every_listener_sees_every_operation_in_order() {
    let dispatcher = Dispatcher::<Post>::new("post");
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let sink = first.clone();
    let _a = dispatcher.subscribe_with(move |op: &Operation<Post>| sink.lock().push(op.kind()));
    let sink = second.clone();
    let _b = dispatcher.subscribe_with(move |op: &Operation<Post>| sink.lock().push(op.kind()));

    dispatcher.dispatch(Operation::Insert(post(1)));
    dispatcher.dispatch(Operation::Edit(post(1)));
    dispatcher.dispatch(Operation::Delete(1));

    let expected = vec![
        OperationKind::Insert,
        OperationKind::Edit,
        OperationKind::Delete,
    ];
    assert_eq!(*first.lock(), expected);
    assert_eq!(*second.lock(), expected);
}

#[test]
fn dropping_a_guard_stops_only_that_listener() {
    let dispatcher = Dispatcher::<Post>::new("post");
    let count = Arc::new(Mutex::new(0usize));

    let sink = count.clone();
    let kept = dispatcher.subscribe_with(move |_: &Operation<Post>| *sink.lock() += 1);
    let dropped = dispatcher.subscribe_with(|_: &Operation<Post>| {});
    assert_eq!(dispatcher.subscriber_count(), 2);

    drop(dropped);
    assert_eq!(dispatcher.subscriber_count(), 1);

    dispatcher.dispatch(Operation::Delete(3));
    assert_eq!(*count.lock(), 1);
    assert!(kept.is_attached());
}

#[test]
fn late_subscriber_gets_no_backlog() {
    let dispatcher = Dispatcher::<Notification>::new("notification");
    dispatcher.dispatch(Operation::Insert(notification(1)));

    let mut late = dispatcher.subscribe();
    assert_eq!(late.try_recv(), None);

    dispatcher.dispatch(Operation::Delete(1));
    assert_eq!(late.try_recv(), Some(Operation::Delete(1)));
    assert_eq!(
        dispatcher.last_operation(),
        Some(Operation::Delete(1))
    );
}

#[tokio::test]
async fn subscription_delivers_across_tasks() {
    let store = Store::new();
    let mut subscription = store.posts().subscribe();

    let dispatcher = store.posts().clone();
    tokio::spawn(async move {
        dispatcher.dispatch_created(post(9));
    });

    let received = tokio::time::timeout(STEP_TIMEOUT, subscription.recv())
        .await
        .unwrap();
    assert_eq!(received, Some(Operation::Insert(post(9))));
}

#[test]
fn store_lookup_by_type_shares_dispatchers() {
    let store = Store::new();
    let mut subscription = store.notifications().subscribe();

    store
        .of::<Notification>()
        .dispatch(Operation::Edit(notification(4)));

    assert_eq!(subscription.try_recv(), Some(Operation::Edit(notification(4))));

    let clone = store.clone();
    assert_eq!(clone.notifications().subscriber_count(), 1);
    assert_eq!(store.of::<Post>().subscriber_count(), 0);
    assert_eq!(store.users().name(), store.of::<feedsync::model::User>().name());
    store.users().dispatch(Operation::Edit(user(1)));
}

#[test]
fn current_profile_tracks_last_profile_dispatch() {
    let store = Store::new();
    assert_eq!(store.profiles().current_profile(), None);

    store.profiles().dispatch_profile(profile("hello"));
    store.profiles().dispatch_profile(profile("updated"));
    assert_eq!(
        store.profiles().current_profile().map(|p| p.self_intro),
        Some("updated".to_string())
    );

    store.profiles().dispatch(Operation::Delete(1));
    assert_eq!(store.profiles().current_profile(), None);
}

#[tokio::test]
async fn follow_up_dispatch_reaches_later_screens_in_order() {
    let store = Store::new();
    let source = Arc::new(MemorySource::new(posts(1..=2)));

    let editor = store.posts().clone();
    let _autocorrect = store.posts().subscribe_with(move |op: &Operation<Post>| {
        if let Operation::Insert(created) = op {
            let mut edited = created.clone();
            edited.content = "edited".to_string();
            editor.dispatch(Operation::Edit(edited));
        }
    });

    let mut feed =
        PaginationController::new(source, Endpoint::Newsfeed { user_id: None }, options(10));
    feed.bind_store(&store);
    feed.load_more();
    feed.settle().await;

    let mut observer = store.posts().subscribe();
    store.posts().dispatch_created(post(9));

    let kinds: Vec<OperationKind> = std::iter::from_fn(|| observer.try_recv())
        .map(|op| op.kind())
        .collect();
    assert_eq!(kinds, vec![OperationKind::Insert, OperationKind::Edit]);

    assert_eq!(feed.process_pending(), 2);
    assert_eq!(ids(feed.items()), vec![9, 1, 2]);
    assert_eq!(feed.items()[0].content, "edited");
    assert_eq!(
        store.posts().last_operation().map(|op| op.kind()),
        Some(OperationKind::Edit)
    );
}

#[test]
fn concurrent_producers_and_subscribers_keep_per_producer_order() {
    const PRODUCERS: u64 = 4;
    const PER_PRODUCER: u64 = 250;
    const CHURN_ROUNDS: usize = 200;

    let dispatcher = Dispatcher::<Post>::new("post");
    let mut survivors = vec![dispatcher.subscribe(), dispatcher.subscribe()];

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    dispatcher.dispatch(Operation::Delete(producer * 1_000 + seq));
                }
            })
        })
        .collect();

    let churners: Vec<_> = (0..2)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || {
                for round in 0..CHURN_ROUNDS {
                    let guard = dispatcher.subscribe_with(|_: &Operation<Post>| {});
                    let queued = dispatcher.subscribe();
                    if round % 2 == 0 {
                        drop(queued);
                        drop(guard);
                    } else {
                        guard.release();
                        queued.release();
                    }
                }
            })
        })
        .collect();

    for handle in producers.into_iter().chain(churners) {
        handle.join().unwrap();
    }

    assert_eq!(dispatcher.subscriber_count(), survivors.len());

    for subscription in &mut survivors {
        let mut next_seq = vec![0u64; PRODUCERS as usize];
        while let Some(op) = subscription.try_recv() {
            let id = match op {
                Operation::Delete(id) => id,
                other => panic!("unexpected operation {:?}", other),
            };
            let producer = (id / 1_000) as usize;
            assert_eq!(id % 1_000, next_seq[producer], "producer {} out of order", producer);
            next_seq[producer] += 1;
        }
        assert!(next_seq.iter().all(|&count| count == PER_PRODUCER));
    }
}
