//! The session seam between [`RecordClient`](crate::RecordClient) and the
//! service that owns the records.
//!
//! Implementations:
//! - [`DynamoStore`](crate::DynamoStore): one blocking session against DynamoDB.
//! - [`MemoryStore`]: an in-process table, used by tests.
//!
//! Every call answers with a [`StoreResponse`] carrying the status the store
//! reported. `Err` is reserved for calls that got no answer at all.

use crate::item::{Item, StoreResponse};
use crate::Result;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

pub trait ItemStore {
    /// Point lookup by primary key, returning only `attributes`.
    fn get_item(&self, table: &str, key: &Item, attributes: &[&str]) -> Result<StoreResponse>;

    /// Create or fully replace the item keyed by its `id` attribute.
    fn put_item(&self, table: &str, item: Item) -> Result<StoreResponse>;

    /// Delete by primary key. Deleting an absent key succeeds.
    fn delete_item(&self, table: &str, key: &Item) -> Result<StoreResponse>;
}

/// In-memory item store.
///
/// Items are kept per table and keyed by their `id` string attribute.
/// `fail_with` makes every later call answer with the given status and leave
/// the tables untouched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<BTreeMap<String, BTreeMap<String, Item>>>,
    failure: Cell<Option<u16>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, status: u16) {
        self.failure.set(Some(status));
    }

    /// Number of put/delete calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Number of items currently held in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables.borrow().get(table).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    /// Raw item as stored, with no projection applied.
    pub fn raw_item(&self, table: &str, id: &str) -> Option<Item> {
        self.tables.borrow().get(table)?.get(id).cloned()
    }

    fn key_of(item: &Item) -> Option<String> {
        item.get("id")?.as_s().map(str::to_owned)
    }
}

impl ItemStore for MemoryStore {
    fn get_item(&self, table: &str, key: &Item, attributes: &[&str]) -> Result<StoreResponse> {
        if let Some(status) = self.failure.get() {
            return Ok(StoreResponse::status(status));
        }
        let item = Self::key_of(key)
            .and_then(|id| self.raw_item(table, &id))
            .map(|item| {
                item.into_iter()
                    .filter(|(name, _)| attributes.contains(&name.as_str()))
                    .collect()
            });
        Ok(StoreResponse::with_item(item))
    }

    fn put_item(&self, table: &str, item: Item) -> Result<StoreResponse> {
        self.writes.set(self.writes.get() + 1);
        if let Some(status) = self.failure.get() {
            return Ok(StoreResponse::status(status));
        }
        match Self::key_of(&item) {
            Some(id) => {
                self.tables
                    .borrow_mut()
                    .entry(table.to_owned())
                    .or_default()
                    .insert(id, item);
                Ok(StoreResponse::ok())
            }
            None => Ok(StoreResponse::status(400)),
        }
    }

    fn delete_item(&self, table: &str, key: &Item) -> Result<StoreResponse> {
        self.writes.set(self.writes.get() + 1);
        if let Some(status) = self.failure.get() {
            return Ok(StoreResponse::status(status));
        }
        if let Some(id) = Self::key_of(key) {
            if let Some(items) = self.tables.borrow_mut().get_mut(table) {
                items.remove(&id);
            }
        }
        Ok(StoreResponse::ok())
    }
}
