//! Runtime owner of one screen's paginated list.

use std::sync::Arc;

use scopeguard::ScopeGuard;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::PaginationConfig;
use crate::error::FetchError;
use crate::model::Entity;
use crate::pagination::binding::{self, Binding, Mailbox};
use crate::pagination::intent::PaginationIntent;
use crate::pagination::mvi::Reducer;
use crate::pagination::reducer::PaginationReducer;
use crate::pagination::state::{
    LoadingState, PageState, PageView, RefreshOutcome, DEFAULT_PAGE_SIZE,
};
use crate::source::{Cursor, Endpoint, EndpointSource, Page};
use crate::store::{Dispatcher, Store, StoreEntity};

const REFRESH_SIGNAL_CAPACITY: usize = 16;

/// Construction options for a [`PaginationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    pub page_size: usize,
    /// Log a warning when one drain handles more messages than this.
    pub mailbox_warn_depth: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            mailbox_warn_depth: 256,
        }
    }
}

impl From<&PaginationConfig> for PaginationOptions {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            page_size: config.page_size,
            mailbox_warn_depth: config.mailbox_warn_depth,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FetchKind {
    NextPage,
    FirstPage,
}

impl FetchKind {
    fn completion<T: Entity>(
        self,
        generation: u64,
        result: Result<Page<T>, FetchError>,
    ) -> PaginationIntent<T> {
        match (self, result) {
            (FetchKind::NextPage, Ok(page)) => PaginationIntent::PageLoaded { generation, page },
            (FetchKind::NextPage, Err(error)) => PaginationIntent::PageFailed { generation, error },
            (FetchKind::FirstPage, Ok(page)) => {
                PaginationIntent::RefreshLoaded { generation, page }
            }
            (FetchKind::FirstPage, Err(error)) => {
                PaginationIntent::RefreshFailed { generation, error }
            }
        }
    }
}

/// Owns one screen's list of `T`, its fetch lifecycle and its binding to
/// the store.
///
/// All state changes happen on the owner's thread through `&mut self`.
/// Fetches run as tokio tasks and post their completion back into the
/// controller's mailbox, as do bound dispatchers; the owner applies
/// queued messages with [`process_pending`](Self::process_pending),
/// [`process_next`](Self::process_next) or [`settle`](Self::settle).
///
/// `load_more` and `refresh` spawn tasks and must be called from within
/// a tokio runtime.
///
/// Dropping the controller releases its binding and aborts in-flight
/// fetches.
pub struct PaginationController<T: Entity> {
    id: Uuid,
    endpoint: Endpoint,
    source: Arc<dyn EndpointSource<T>>,
    state: PageState<T>,
    mailbox: Mailbox<T>,
    inbox: mpsc::UnboundedReceiver<PaginationIntent<T>>,
    view: watch::Sender<PageView<T>>,
    refresh_signal: broadcast::Sender<RefreshOutcome>,
    fetches: Vec<JoinHandle<()>>,
    pending_fetches: usize,
    binding: Option<Binding<T>>,
    mailbox_warn_depth: usize,
}

impl<T: Entity> PaginationController<T> {
    /// Create an empty, idle controller. Nothing is fetched until
    /// `load_more` or `refresh` is called.
    pub fn new<S>(source: Arc<S>, endpoint: Endpoint, options: PaginationOptions) -> Self
    where
        S: EndpointSource<T> + 'static,
    {
        let source: Arc<dyn EndpointSource<T>> = source;
        let state = PageState::with_page_size(options.page_size);
        let (mailbox, inbox) = Mailbox::channel();
        let (view, _) = watch::channel(PageView::of(&state));
        let (refresh_signal, _) = broadcast::channel(REFRESH_SIGNAL_CAPACITY);
        let id = Uuid::new_v4();

        tracing::info!(
            screen = %id,
            endpoint = %endpoint,
            page_size = state.page_size,
            "Pagination controller created"
        );

        Self {
            id,
            endpoint,
            source,
            state,
            mailbox,
            inbox,
            view,
            refresh_signal,
            fetches: Vec::new(),
            pending_fetches: 0,
            binding: None,
            mailbox_warn_depth: options.mailbox_warn_depth.max(1),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn items(&self) -> &[T] {
        &self.state.items
    }

    pub fn loading_state(&self) -> LoadingState {
        self.state.loading
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// Number of fetches whose completion has not been processed yet.
    pub fn pending_fetches(&self) -> usize {
        self.pending_fetches
    }

    /// Observable list snapshot, updated after every change.
    pub fn subscribe_view(&self) -> watch::Receiver<PageView<T>> {
        self.view.subscribe()
    }

    /// One message per refresh cycle, success or failure.
    pub fn subscribe_refresh(&self) -> broadcast::Receiver<RefreshOutcome> {
        self.refresh_signal.subscribe()
    }

    /// Fetch the next page. No-op while loading, refreshing or exhausted.
    pub fn load_more(&mut self) {
        self.handle(PaginationIntent::LoadMore);
    }

    /// Refetch the first page and replace the list with it.
    ///
    /// No-op while a refresh is in flight. Supersedes an in-flight
    /// `load_more`, whose completion will be discarded.
    pub fn refresh(&mut self) {
        self.handle(PaginationIntent::Refresh);
    }

    /// Insert a locally created entity at `index` without a round-trip.
    ///
    /// An entity whose id is already listed replaces the existing entry.
    pub fn insert(&mut self, entity: T, index: usize) {
        self.handle(PaginationIntent::Insert { entity, index });
    }

    /// Apply every operation `dispatcher` broadcasts from now on to this
    /// list. Replaces any previous binding.
    ///
    /// The returned binding is owned by the controller and released by
    /// [`unbind`](Self::unbind) or when the controller is dropped.
    pub fn bind(&mut self, dispatcher: &Dispatcher<T>) -> &Binding<T> {
        let binding = binding::bind(dispatcher, self.mailbox.clone());
        tracing::debug!(
            screen = %self.id,
            dispatcher = binding.dispatcher(),
            "Bound to dispatcher"
        );
        self.binding.insert(binding)
    }

    /// Release the dispatcher binding. Returns whether one existed.
    pub fn unbind(&mut self) -> bool {
        self.binding.take().is_some()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Current dispatcher binding, if any.
    pub fn binding(&self) -> Option<&Binding<T>> {
        self.binding.as_ref()
    }

    /// Apply every message already queued. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(intent) = self.inbox.try_recv() {
            self.handle(intent);
            handled += 1;
        }

        if handled > self.mailbox_warn_depth {
            tracing::warn!(
                screen = %self.id,
                handled,
                threshold = self.mailbox_warn_depth,
                "Mailbox backlog above threshold"
            );
        }
        handled
    }

    /// Wait for the next message and apply it.
    ///
    /// Waits indefinitely when nothing is in flight and nothing is bound.
    pub async fn process_next(&mut self) {
        if let Some(intent) = self.inbox.recv().await {
            self.handle(intent);
        }
    }

    /// Apply queued messages and wait until every started fetch has
    /// reported back.
    pub async fn settle(&mut self) {
        self.process_pending();
        while self.pending_fetches > 0 {
            self.process_next().await;
        }
        self.process_pending();
    }

    fn handle(&mut self, intent: PaginationIntent<T>) {
        let label = intent.label();
        if intent.is_completion() {
            self.pending_fetches = self.pending_fetches.saturating_sub(1);
        }

        if let Some(discard) = self.state.discard_reason(&intent) {
            tracing::debug!(
                screen = %self.id,
                endpoint = %self.endpoint,
                intent = label,
                ?discard,
                "Message discarded"
            );
            return;
        }

        let refresh_outcome = match &intent {
            PaginationIntent::RefreshLoaded { .. } => Some(RefreshOutcome::Completed),
            PaginationIntent::RefreshFailed { error, .. } => {
                tracing::warn!(
                    screen = %self.id,
                    endpoint = %self.endpoint,
                    error = %error,
                    "Refresh failed"
                );
                Some(RefreshOutcome::Failed)
            }
            PaginationIntent::PageFailed { error, .. } => {
                tracing::warn!(
                    screen = %self.id,
                    endpoint = %self.endpoint,
                    page = self.state.cursor.page,
                    error = %error,
                    "Page fetch failed"
                );
                None
            }
            _ => None,
        };

        let before_loading = self.state.loading;
        let before_generation = self.state.generation;
        let state = std::mem::take(&mut self.state);
        self.state = PaginationReducer::reduce(state, intent);

        if self.state.generation != before_generation {
            self.spawn_fetch(FetchKind::FirstPage, Cursor::first());
        } else if self.state.loading == LoadingState::Loading
            && before_loading != LoadingState::Loading
        {
            self.spawn_fetch(FetchKind::NextPage, self.state.cursor.clone());
        }

        if let Some(outcome) = refresh_outcome {
            tracing::info!(
                screen = %self.id,
                endpoint = %self.endpoint,
                items = self.state.items.len(),
                ?outcome,
                "Refresh complete"
            );
            // No receivers is fine: nobody is showing a refresh indicator.
            let _ = self.refresh_signal.send(outcome);
        }

        tracing::trace!(
            screen = %self.id,
            intent = label,
            loading = %self.state.loading,
            items = self.state.items.len(),
            "Message applied"
        );
        self.publish();
    }

    fn spawn_fetch(&mut self, kind: FetchKind, cursor: Cursor) {
        self.fetches.retain(|handle| !handle.is_finished());

        let source = Arc::clone(&self.source);
        let endpoint = self.endpoint.clone();
        let mailbox = self.mailbox.clone();
        let generation = self.state.generation;
        let page_size = self.state.page_size;

        tracing::debug!(
            screen = %self.id,
            endpoint = %endpoint,
            ?kind,
            page = cursor.page,
            generation,
            "Fetch started"
        );

        self.pending_fetches += 1;
        let handle = tokio::spawn(async move {
            // Exactly one completion per fetch, even when aborted or unwinding.
            let guard = scopeguard::guard(mailbox, move |mailbox| {
                mailbox.post(kind.completion::<T>(generation, Err(FetchError::Cancelled)));
            });
            let result = source.fetch_page(&endpoint, &cursor, page_size).await;
            let mailbox = ScopeGuard::into_inner(guard);
            mailbox.post(kind.completion(generation, result));
        });
        self.fetches.push(handle);
    }

    fn publish(&self) {
        let next = PageView::of(&self.state);
        self.view.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl<T: StoreEntity> PaginationController<T> {
    /// Bind to the store's dispatcher for `T`.
    pub fn bind_store(&mut self, store: &Store) -> &Binding<T> {
        self.bind(store.of::<T>())
    }
}

impl<T: Entity> Drop for PaginationController<T> {
    fn drop(&mut self) {
        for handle in self.fetches.drain(..) {
            handle.abort();
        }
        self.binding.take();
        tracing::info!(
            screen = %self.id,
            endpoint = %self.endpoint,
            "Pagination controller torn down"
        );
    }
}
