use crate::attr::Attr;
use crate::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A record as produced by a logging front-end, before it reaches a handler.
///
/// `attrs` are the attributes passed at the call site only; context added
/// through `with_attrs`/`with_group` lives in the handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub timestamp: Option<DateTime<Utc>>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    /// Untimed record, convenient for building expectations.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    /// Record stamped with the current time.
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Self::new(level, message)
        }
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }
}

/// A captured log record, suitable for direct comparison in assertions.
///
/// `attrs` holds the complete attribute list for the record: call-site
/// attributes merged with handler context, with groups nested as
/// [`Value::Group`](crate::attr::Value::Group).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl LoggedRecord {
    /// Builds a stored record from a record header and its final attributes.
    /// Any attributes still attached to `record` are ignored.
    pub fn from_parts(record: Record, attrs: Vec<Attr>) -> Self {
        Self {
            timestamp: record.timestamp,
            level: record.level,
            message: record.message,
            attrs,
        }
    }

    /// Untimed record with the given attributes.
    pub fn new(level: Level, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            timestamp: None,
            level,
            message: message.into(),
            attrs,
        }
    }

    /// Copy of this record with the timestamp cleared.
    pub fn untimed(&self) -> Self {
        Self {
            timestamp: None,
            ..self.clone()
        }
    }

    /// Returns a map of all attributes in the record. Groups are recursively
    /// converted to nested objects.
    pub fn attrs_map(&self) -> serde_json::Map<String, serde_json::Value> {
        attrs_to_map(&self.attrs)
    }
}

pub(crate) fn attrs_to_map(attrs: &[Attr]) -> serde_json::Map<String, serde_json::Value> {
    let mut res = serde_json::Map::new();
    for a in attrs {
        if a.key.is_empty() {
            continue;
        }
        res.insert(a.key.clone(), a.value.to_json());
    }
    res
}
