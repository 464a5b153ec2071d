use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::item::{self, AttributeValue, Item};
use crate::store::ItemStore;
use crate::{Result, StudentsError};

/// The collection every record lives in.
pub const TABLE_NAME: &str = "Students";

/// Returned by a successful upsert.
pub const SUCCESS: &str = "SUCCESS";
/// Returned by a delete, whether or not the record existed.
pub const DELETED: &str = "DELETED";

/// Attribute names, in the order they are checked and projected.
pub const FIELDS: [&str; 3] = ["id", "full_name", "personal_website"];

/// A student as persisted in the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub full_name: String,
    pub personal_website: String,
}

impl Record {
    /// Parses an upsert payload: a JSON object that must hold `id`,
    /// `full_name` and `personal_website` as strings. Other keys are ignored.
    pub fn from_payload(payload: &str) -> Result<Self> {
        let fields: Map<String, Value> =
            serde_json::from_str(payload).map_err(StudentsError::MalformedInput)?;

        for field in FIELDS {
            if !fields.contains_key(field) {
                return Err(StudentsError::MissingField(field));
            }
        }

        let text = |field: &'static str| match &fields[field] {
            Value::String(value) => Ok(value.clone()),
            _ => Err(StudentsError::InvalidFieldType(field)),
        };

        Ok(Record {
            id: text("id")?,
            full_name: text("full_name")?,
            personal_website: text("personal_website")?,
        })
    }

    fn from_item(item: &Item) -> Result<Self> {
        let text = |field: &'static str| match item.get(field) {
            Some(value) => value
                .as_s()
                .map(str::to_owned)
                .ok_or(StudentsError::InvalidFieldType(field)),
            None => Err(StudentsError::MissingField(field)),
        };

        Ok(Record {
            id: text("id")?,
            full_name: text("full_name")?,
            personal_website: text("personal_website")?,
        })
    }

    fn into_item(self) -> Item {
        let mut item = item::key(&self.id);
        item.insert("full_name".to_owned(), AttributeValue::S(self.full_name));
        item.insert(
            "personal_website".to_owned(),
            AttributeValue::S(self.personal_website),
        );
        item
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Reads and writes Students records through an injected item store session.
///
/// Example:
///
/// ```rust
/// # use students::{MemoryStore, RecordClient};
/// let client = RecordClient::new(MemoryStore::new());
/// let payload = r#"{"id":"s1","full_name":"Ada Lovelace","personal_website":"http://ada.example"}"#;
/// assert_eq!(client.upsert(payload).unwrap(), "SUCCESS");
/// assert_eq!(client.fetch("s1").unwrap().full_name, "Ada Lovelace");
/// assert_eq!(client.remove("s1").unwrap(), "DELETED");
/// assert!(client.fetch("s1").is_err());
/// ```
#[derive(Debug)]
pub struct RecordClient<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> RecordClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetch(&self, id: &str) -> Result<Record> {
        if id.is_empty() {
            return Err(StudentsError::EmptyId);
        }
        debug!("fetching student {}", id);

        let response = self.store.get_item(TABLE_NAME, &item::key(id), &FIELDS)?;
        match response.item {
            Some(item) if response.status == item::STATUS_OK => Record::from_item(&item),
            _ => Err(StudentsError::NotFound(id.to_owned())),
        }
    }

    pub fn upsert(&self, payload: &str) -> Result<&'static str> {
        let record = Record::from_payload(payload)?;
        debug!("writing student {}", record.id);

        let response = self.store.put_item(TABLE_NAME, record.into_item())?;
        if !response.is_success() {
            return Err(StudentsError::StoreWrite(response.status));
        }
        Ok(SUCCESS)
    }

    pub fn remove(&self, id: &str) -> Result<&'static str> {
        if id.is_empty() {
            return Err(StudentsError::EmptyId);
        }
        debug!("deleting student {}", id);

        let response = self.store.delete_item(TABLE_NAME, &item::key(id))?;
        if !response.is_success() {
            return Err(StudentsError::StoreWrite(response.status));
        }
        Ok(DELETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    const ADA: &str =
        r#"{"id":"s1","full_name":"Ada Lovelace","personal_website":"http://ada.example"}"#;

    fn client() -> RecordClient<MemoryStore> {
        RecordClient::new(MemoryStore::new())
    }

    #[test]
    fn upsert_fetch_remove_cycle() {
        let client = client();

        assert_eq!(client.upsert(ADA).unwrap(), SUCCESS);
        let record = client.fetch("s1").unwrap();
        assert_eq!(
            record,
            Record {
                id: "s1".to_owned(),
                full_name: "Ada Lovelace".to_owned(),
                personal_website: "http://ada.example".to_owned(),
            }
        );
        assert_eq!(record.to_string(), ADA);

        assert_eq!(client.remove("s1").unwrap(), DELETED);
        match client.fetch("s1") {
            Err(StudentsError::NotFound(id)) => assert_eq!(id, "s1"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn fetch_returns_last_upsert() {
        let client = client();
        client.upsert(ADA).unwrap();
        client
            .upsert(r#"{"id":"s1","full_name":"Augusta Ada King","personal_website":"http://ada.example"}"#)
            .unwrap();

        assert_eq!(client.fetch("s1").unwrap().full_name, "Augusta Ada King");
        assert_eq!(client.store().len(TABLE_NAME), 1);
    }

    #[test]
    fn upsert_is_idempotent() {
        let client = client();
        assert_eq!(client.upsert(ADA).unwrap(), SUCCESS);
        let once = client.store().raw_item(TABLE_NAME, "s1");
        assert_eq!(client.upsert(ADA).unwrap(), SUCCESS);

        assert_eq!(client.store().raw_item(TABLE_NAME, "s1"), once);
        assert_eq!(client.store().len(TABLE_NAME), 1);
    }

    #[test]
    fn upsert_writes_only_known_fields() {
        let client = client();
        client
            .upsert(r#"{"id":"s2","full_name":"Alan","personal_website":"http://alan.example","year":3}"#)
            .unwrap();

        let item = client.store().raw_item(TABLE_NAME, "s2").unwrap();
        assert_eq!(item.keys().collect::<Vec<_>>(), ["full_name", "id", "personal_website"]);
        assert_eq!(item["full_name"], AttributeValue::S("Alan".to_owned()));
    }

    #[test]
    fn missing_fields_are_reported_without_writing() {
        let client = client();
        let payloads = [
            (r#"{"full_name":"Ada","personal_website":"x"}"#, "id"),
            (r#"{"id":"s1","personal_website":"x"}"#, "full_name"),
            (r#"{"id":"s1","full_name":"Ada"}"#, "personal_website"),
        ];

        for (payload, missing) in payloads {
            match client.upsert(payload) {
                Err(StudentsError::MissingField(field)) => assert_eq!(field, missing),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(client.store().writes(), 0);
    }

    #[test]
    fn malformed_payload_is_rejected_without_writing() {
        let client = client();
        for payload in ["", "{id: s1}", "[\"id\"]", "\"id\""] {
            assert!(matches!(
                client.upsert(payload),
                Err(StudentsError::MalformedInput(_))
            ));
        }
        assert_eq!(client.store().writes(), 0);
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let client = client();
        let result = client.upsert(r#"{"id":7,"full_name":"Ada","personal_website":"x"}"#);
        assert!(matches!(result, Err(StudentsError::InvalidFieldType("id"))));
        assert_eq!(client.store().writes(), 0);
    }

    #[test]
    fn fetch_rejects_items_written_with_other_types() {
        let client = client();
        let mut item = item::key("s3");
        item.insert("full_name".to_owned(), AttributeValue::N("42".to_owned()));
        item.insert("personal_website".to_owned(), AttributeValue::Null);
        client.store().put_item(TABLE_NAME, item).unwrap();

        assert!(matches!(
            client.fetch("s3"),
            Err(StudentsError::InvalidFieldType("full_name"))
        ));

        let mut item = item::key("s4");
        item.insert("full_name".to_owned(), AttributeValue::S("Grace".to_owned()));
        item.insert("personal_website".to_owned(), AttributeValue::Bool(false));
        client.store().put_item(TABLE_NAME, item).unwrap();

        assert!(matches!(
            client.fetch("s4"),
            Err(StudentsError::InvalidFieldType("personal_website"))
        ));
    }

    #[test]
    fn fetch_rejects_items_missing_fields() {
        let client = client();
        client.store().put_item(TABLE_NAME, item::key("s5")).unwrap();

        assert!(matches!(
            client.fetch("s5"),
            Err(StudentsError::MissingField("full_name"))
        ));
    }

    #[test]
    fn remove_missing_record_still_deletes() {
        let client = client();
        assert_eq!(client.remove("nobody").unwrap(), DELETED);
    }

    #[test]
    fn empty_id_is_rejected() {
        let client = client();
        assert!(matches!(client.fetch(""), Err(StudentsError::EmptyId)));
        assert!(matches!(client.remove(""), Err(StudentsError::EmptyId)));
        assert_eq!(client.store().writes(), 0);
    }

    #[test]
    fn failed_status_maps_to_typed_errors() {
        let client = client();
        client.upsert(ADA).unwrap();
        client.store().fail_with(500);

        assert!(matches!(client.fetch("s1"), Err(StudentsError::NotFound(_))));
        assert!(matches!(client.upsert(ADA), Err(StudentsError::StoreWrite(500))));
        assert!(matches!(client.remove("s1"), Err(StudentsError::StoreWrite(500))));
    }
}
