//! Per-screen paginated lists.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern, traits in `mvi.rs`:
//! - `state.rs` - List state and loading state machine
//! - `intent.rs` - Requests, fetch completions, dispatched operations
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `controller.rs` - Mailbox, fetch tasks, binding, observable view
//!
//! Edits that keep ids unique live in `patch.rs`; comment placement for
//! locally posted comments lives in `comments.rs`.

mod binding;
pub mod comments;
mod controller;
mod intent;
pub mod mvi;
pub mod patch;
mod reducer;
mod state;

pub use binding::Binding;
pub use controller::{PaginationController, PaginationOptions};
pub use intent::PaginationIntent;
pub use reducer::PaginationReducer;
pub use state::{LoadingState, PageState, PageView, RefreshOutcome, DEFAULT_PAGE_SIZE};
