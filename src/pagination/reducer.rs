//! Reducer for paginated lists.

use std::marker::PhantomData;

use crate::model::Entity;
use crate::pagination::intent::PaginationIntent;
use crate::pagination::mvi::Reducer;
use crate::pagination::patch;
use crate::pagination::state::{LoadingState, PageState};
use crate::source::Cursor;

/// Pure state transitions for [`PageState`].
///
/// Starting fetches and emitting refresh signals are side effects handled
/// by the controller around the `reduce` call.
pub struct PaginationReducer<T>(PhantomData<T>);

impl<T: Entity> Reducer for PaginationReducer<T> {
    type State = PageState<T>;
    type Intent = PaginationIntent<T>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        if state.discard_reason(&intent).is_some() {
            return state;
        }

        match intent {
            PaginationIntent::LoadMore => {
                if state.loading.accepts_load_more() {
                    state.loading = LoadingState::Loading;
                }
                state
            }

            PaginationIntent::Refresh => {
                if state.loading.accepts_refresh() {
                    state.generation += 1;
                    state.loading = LoadingState::Refreshing;
                }
                state
            }

            PaginationIntent::PageLoaded { page, .. } => {
                let exhausted = !page.has_more || page.items.len() < state.page_size;
                state.cursor = state.cursor.advance(&page);
                patch::append_unique(&mut state.items, page.items);
                state.loading = if exhausted {
                    LoadingState::Exhausted
                } else {
                    LoadingState::Idle
                };
                state.last_error = None;
                state
            }

            PaginationIntent::RefreshLoaded { page, .. } => {
                state.cursor = Cursor::first().advance(&page);
                state.items = patch::dedup_by_id(page.items);
                state.loading = LoadingState::Idle;
                state.last_error = None;
                state
            }

            PaginationIntent::PageFailed { error, .. }
            | PaginationIntent::RefreshFailed { error, .. } => {
                state.loading = LoadingState::Failed;
                state.last_error = Some(error);
                state
            }

            PaginationIntent::Insert { entity, index } => {
                patch::insert_at(&mut state.items, entity, index);
                state
            }

            PaginationIntent::Apply(operation) => {
                patch::apply(&mut state.items, operation);
                state
            }
        }
    }
}
