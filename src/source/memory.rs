use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use super::{Cursor, Endpoint, EndpointSource, Page};
use crate::error::FetchError;
use crate::model::Entity;

/// In-memory endpoint serving a fixed ordered collection by page index.
///
/// Stands in for the remote endpoint in the demo binary and in tests.
/// The collection can be changed between fetches to simulate server-side
/// updates picked up by a refresh.
pub struct MemorySource<T: Entity> {
    records: RwLock<Vec<T>>,
}

impl<T: Entity> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replace the served collection.
    pub fn replace(&self, records: Vec<T>) {
        *self.records.write() = records;
    }

    /// Add a record in front, as a newly created record on the server.
    pub fn push_front(&self, record: T) {
        self.records.write().insert(0, record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T: Entity + DeserializeOwned> MemorySource<T> {
    /// Build a source from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let records: Vec<T> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }
}

#[async_trait]
impl<T: Entity> EndpointSource<T> for MemorySource<T> {
    async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        cursor: &Cursor,
        page_size: usize,
    ) -> Result<Page<T>, FetchError> {
        let records = self.records.read();
        let start = (cursor.page.saturating_sub(1) as usize).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(records.len());
        let items = records.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
        let has_more = end < records.len();

        tracing::trace!(
            endpoint = %endpoint,
            page = cursor.page,
            returned = items.len(),
            has_more,
            "Served in-memory page"
        );

        Ok(Page::new(items, has_more))
    }
}
