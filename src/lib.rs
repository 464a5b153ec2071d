mod commands;
mod dynamo;
mod error;
mod item;
mod record;
mod response;
mod store;
pub use commands::{Cli, Operation};
pub use dynamo::{DynamoStore, StoreConfig};
pub use error::{Result, StudentsError};
pub use item::{key, AttributeValue, Item, StoreResponse, STATUS_OK};
pub use record::{Record, RecordClient, DELETED, FIELDS, SUCCESS, TABLE_NAME};
pub use response::Response;
pub use store::{ItemStore, MemoryStore};
