use std::collections::BTreeMap;

/// The only status the item store reports for a successful call.
pub const STATUS_OK: u16 = 200;

/// A single attribute value as the item store types it.
///
/// Records only ever write `S`. The other scalar types exist because the
/// table is shared: an item written by another client can come back with a
/// number, boolean or null where a string is expected, and `fetch` has to
/// report that as `InvalidFieldType` rather than fail the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    N(String),
    Bool(bool),
    Null,
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(value) => Some(value),
            _ => None,
        }
    }
}

pub type Item = BTreeMap<String, AttributeValue>;

/// Builds the primary key item for a record id.
pub fn key(id: &str) -> Item {
    let mut key = Item::new();
    key.insert("id".to_owned(), AttributeValue::S(id.to_owned()));
    key
}

/// What the store answered for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub item: Option<Item>,
}

impl StoreResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK,
            item: None,
        }
    }

    pub fn with_item(item: Option<Item>) -> Self {
        Self {
            status: STATUS_OK,
            item,
        }
    }

    pub fn status(status: u16) -> Self {
        Self { status, item: None }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}
