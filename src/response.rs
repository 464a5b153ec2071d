use std::fmt;

use crate::record::Record;

/// What one dispatched operation prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Record(Record),
    Marker(&'static str),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Record(record) => fmt::Display::fmt(record, f),
            Response::Marker(marker) => f.write_str(marker),
        }
    }
}
