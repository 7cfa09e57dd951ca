//! List state owned by one pagination controller.

use std::fmt;
use std::sync::Arc;

use crate::error::{Discard, FetchError};
use crate::model::Entity;
use crate::pagination::intent::PaginationIntent;
use crate::pagination::mvi::ViewState;
use crate::pagination::patch;
use crate::source::Cursor;
use crate::store::Operation;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fetch lifecycle of one list.
///
/// ```text
/// Idle ──loadMore──→ Loading ──→ Idle | Exhausted | Failed
/// Idle | Loading | Exhausted | Failed ──refresh──→ Refreshing ──→ Idle | Failed
/// ```
///
/// `Failed` is recoverable: the next load or refresh tries again.
/// `Exhausted` only blocks `loadMore` until a refresh resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Refreshing,
    Exhausted,
    Failed,
}

impl LoadingState {
    /// Whether a `loadMore` request starts a fetch from this state.
    pub fn accepts_load_more(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    /// Whether a `refresh` request starts a fetch from this state.
    pub fn accepts_refresh(self) -> bool {
        !matches!(self, Self::Refreshing)
    }

    /// A fetch is outstanding (bottom spinner / refresh indicator).
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Loading | Self::Refreshing)
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Refreshing => "refreshing",
            Self::Exhausted => "exhausted",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One screen's paged view of entity `T`.
///
/// Invariant: `items` never holds two entries with the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T: Entity> {
    pub items: Vec<T>,
    /// Next page to request on `loadMore`.
    pub cursor: Cursor,
    pub loading: LoadingState,
    /// Bumped when a refresh starts; completions carry the generation
    /// they were issued under.
    pub generation: u64,
    pub page_size: usize,
    /// Error behind the current `Failed` state.
    pub last_error: Option<FetchError>,
}

impl<T: Entity> Default for PageState<T> {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl<T: Entity> ViewState for PageState<T> {}

impl<T: Entity> PageState<T> {
    /// Empty list, idle, positioned at the first page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor: Cursor::first(),
            loading: LoadingState::Idle,
            generation: 0,
            page_size: page_size.max(1),
            last_error: None,
        }
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        patch::position(&self.items, id).is_some()
    }

    /// Why `intent` would leave this state untouched, if it would.
    ///
    /// Covers fetch completions that belong to a superseded generation and
    /// edits/deletes for ids this list does not hold. Requests that are
    /// ignored because of the current loading state are not discards.
    pub fn discard_reason(&self, intent: &PaginationIntent<T>) -> Option<Discard> {
        match intent {
            PaginationIntent::PageLoaded { generation, .. }
            | PaginationIntent::PageFailed { generation, .. } => {
                self.stale(*generation, LoadingState::Loading)
            }
            PaginationIntent::RefreshLoaded { generation, .. }
            | PaginationIntent::RefreshFailed { generation, .. } => {
                self.stale(*generation, LoadingState::Refreshing)
            }
            PaginationIntent::Apply(Operation::Edit(entity)) if !self.contains(&entity.id()) => {
                Some(Discard::NotFound)
            }
            PaginationIntent::Apply(Operation::Delete(id)) if !self.contains(id) => {
                Some(Discard::NotFound)
            }
            _ => None,
        }
    }

    fn stale(&self, issued: u64, expected: LoadingState) -> Option<Discard> {
        if issued != self.generation || self.loading != expected {
            Some(Discard::StaleCompletion {
                issued,
                current: self.generation,
            })
        } else {
            None
        }
    }
}

/// Snapshot published to the rendering layer after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Arc<[T]>,
    pub loading: LoadingState,
}

impl<T: Entity> PageView<T> {
    pub fn of(state: &PageState<T>) -> Self {
        Self {
            items: Arc::from(state.items.as_slice()),
            loading: state.loading,
        }
    }
}

/// Signal sent once per refresh cycle so the UI can stop its indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    Failed,
}
