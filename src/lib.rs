//! Client-side entity synchronization and pagination.
//!
//! A [`Store`] holds one [`Dispatcher`](store::Dispatcher) per entity kind.
//! Screens own a [`PaginationController`] that fetches pages of entities
//! from an [`EndpointSource`] and, once bound to a dispatcher, applies every
//! insert, edit and delete broadcast after the binding. Two screens showing
//! the same record stay consistent without refetching.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod source;
pub mod store;

pub use error::{Discard, FetchError};
pub use model::Entity;
pub use pagination::{LoadingState, PaginationController, PaginationOptions};
pub use source::{Cursor, Endpoint, EndpointSource, Page};
pub use store::{Operation, Store};
