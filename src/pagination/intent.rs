//! Messages processed by the pagination reducer.

use crate::error::FetchError;
use crate::model::Entity;
use crate::pagination::mvi::Intent;
use crate::source::Page;
use crate::store::Operation;

/// Everything that can change a [`PageState`](super::PageState).
///
/// Requests come from the owning screen; completions are posted by fetch
/// tasks through the controller's mailbox; `Apply` is posted by a
/// dispatcher binding.
#[derive(Debug)]
pub enum PaginationIntent<T: Entity> {
    /// Screen scrolled near the end of the list.
    LoadMore,

    /// Pull to refresh. Supersedes an in-flight `LoadMore`.
    Refresh,

    /// Next page arrived.
    PageLoaded { generation: u64, page: Page<T> },

    /// Next page could not be fetched.
    PageFailed { generation: u64, error: FetchError },

    /// First page arrived after a refresh.
    RefreshLoaded { generation: u64, page: Page<T> },

    /// Refresh fetch failed.
    RefreshFailed { generation: u64, error: FetchError },

    /// Locally created entity placed by the caller.
    Insert { entity: T, index: usize },

    /// Operation delivered by the bound dispatcher.
    Apply(Operation<T>),
}

impl<T: Entity> Intent for PaginationIntent<T> {}

impl<T: Entity> PaginationIntent<T> {
    /// True for messages produced by a fetch task.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::PageLoaded { .. }
                | Self::PageFailed { .. }
                | Self::RefreshLoaded { .. }
                | Self::RefreshFailed { .. }
        )
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadMore => "load_more",
            Self::Refresh => "refresh",
            Self::PageLoaded { .. } => "page_loaded",
            Self::PageFailed { .. } => "page_failed",
            Self::RefreshLoaded { .. } => "refresh_loaded",
            Self::RefreshFailed { .. } => "refresh_failed",
            Self::Insert { .. } => "insert",
            Self::Apply(_) => "apply",
        }
    }
}
