//! Intent/reducer plumbing shared by list screens.
//!
//! A screen's list only changes by feeding an intent through a reducer:
//! `state = R::reduce(state, intent)`. Side effects (fetches, signals)
//! stay in the controller that owns the state.

/// Anything a list can react to: a user request, a fetch completion or a
/// dispatched operation. Intents cross threads through the mailbox.
pub trait Intent: Send + 'static {}

/// Snapshot of a list that can be compared to skip redundant publishes.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}

/// Pure transition function for one kind of list state.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    /// Consume the current state and return the next one. Must not block
    /// or perform I/O.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
