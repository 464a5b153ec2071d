use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudentsError>;

#[derive(Error, Debug)]
pub enum StudentsError {
    #[error("No student with id `{0}`")]
    NotFound(String),
    #[error("Malformed payload: {0}")]
    MalformedInput(serde_json::Error),
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Field `{0}` must be a string")]
    InvalidFieldType(&'static str),
    #[error("Attribute `{0}` has an unsupported type")]
    UnsupportedAttribute(String),
    #[error("Store write failed with status {0}")]
    StoreWrite(u16),
    #[error("Id must be a non-empty string")]
    EmptyId,
    #[error("Store request failed: {0}")]
    Transport(String),
    #[error("Failed to read/write")]
    IoError(#[from] io::Error),
}
