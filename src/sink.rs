use crate::attr::{Attr, Value};
use crate::level::Level;
use crate::record::{LoggedRecord, Record};

/// Concurrency-safe collection of observed log records.
///
/// Handlers write through [`ObservedLogs::add`]; test code keeps its own
/// reference and reads through the query methods at any time. Built-in
/// implementations are [`OrderedLogs`](crate::ordered::OrderedLogs) and
/// [`RingLogs`](crate::ring::RingLogs); a custom store can be plugged in via
/// [`ObserverConfig::store`](crate::init::ObserverConfig::store).
pub trait ObservedLogs: Send + Sync {
    /// Number of records currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of all records in insertion order.
    fn all(&self) -> Vec<LoggedRecord>;

    /// Returns all records and empties the store in one step.
    fn take_all(&self) -> Vec<LoggedRecord>;

    /// Like [`ObservedLogs::all`], with every timestamp cleared.
    fn all_untimed(&self) -> Vec<LoggedRecord> {
        let mut ret = self.all();
        for r in &mut ret {
            r.timestamp = None;
        }
        ret
    }

    /// Stores one record.
    ///
    /// **Parameters**
    /// - `record`: header of the record (time, level, message). Its own
    ///   `attrs` are ignored; the handler has already merged them.
    /// - `attrs`: the complete attribute list to store with it.
    fn add(&self, record: Record, attrs: Vec<Attr>);

    /// New store of the same family holding only the records for which
    /// `keep` returns true, in their original order. The result is never
    /// capacity bounded.
    fn filter(&self, keep: &dyn Fn(&LoggedRecord) -> bool) -> Box<dyn ObservedLogs>;

    /// Records logged at exactly `level`.
    fn filter_level_exact(&self, level: Level) -> Box<dyn ObservedLogs> {
        self.filter(&|r| r.level == level)
    }

    /// Records whose message equals `msg`.
    fn filter_message(&self, msg: &str) -> Box<dyn ObservedLogs> {
        self.filter(&|r| r.message == msg)
    }

    /// Records whose message contains `snippet`.
    fn filter_message_snippet(&self, snippet: &str) -> Box<dyn ObservedLogs> {
        self.filter(&|r| r.message.contains(snippet))
    }

    /// Records carrying `attr` (same key, kind and value) at any depth.
    fn filter_attr(&self, attr: &Attr) -> Box<dyn ObservedLogs> {
        self.filter(&|r| contains_attr(&r.attrs, attr))
    }

    /// Records with a top-level attribute named `key`.
    fn filter_field_key(&self, key: &str) -> Box<dyn ObservedLogs> {
        self.filter(&|r| r.attrs.iter().any(|a| a.key == key))
    }
}

/// Searches `attrs` for `target`, descending into groups.
///
/// A group attribute is never matched as a whole, only its members are.
/// `Any` payloads compare structurally.
pub fn contains_attr(attrs: &[Attr], target: &Attr) -> bool {
    attrs.iter().any(|a| match &a.value {
        Value::Group(nested) => contains_attr(nested, target),
        value => a.key == target.key && value.kind() == target.kind() && *value == target.value,
    })
}
