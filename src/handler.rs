use crate::attr::Attr;
use crate::fold::{self, OpenGroup};
use crate::level::Level;
use crate::record::Record;
use crate::sink::ObservedLogs;
use std::sync::Arc;

/// Capability set a logging front-end drives.
///
/// Front-ends call [`Handler::handle`] only after [`Handler::enabled`]
/// returned true for the record's level; implementations must stay correct
/// when that is not the case.
pub trait Handler: Clone + Send + Sync {
    /// Whether records at `level` would be kept.
    fn enabled(&self, level: Level) -> bool;

    /// Processes one record.
    fn handle(&self, record: Record);

    /// New handler whose records also carry `attrs`.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Self;

    /// New handler that nests all further attributes under `name`.
    fn with_group(&self, name: &str) -> Self;
}

/// [`Handler`] that captures records into an [`ObservedLogs`] store.
///
/// Each derived handler owns its attribute and group state; all handlers
/// derived from one root share the same store.
#[derive(Clone)]
pub struct ObserverHandler {
    min_level: Level,
    logs: Arc<dyn ObservedLogs>,
    attrs: Vec<Attr>,
    groups: Vec<OpenGroup>,
}

impl ObserverHandler {
    pub fn new(min_level: Level, logs: Arc<dyn ObservedLogs>) -> Self {
        Self {
            min_level,
            logs,
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Store this handler writes to.
    pub fn logs(&self) -> Arc<dyn ObservedLogs> {
        Arc::clone(&self.logs)
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

impl std::fmt::Debug for ObserverHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverHandler")
            .field("min_level", &self.min_level)
            .field("attrs", &self.attrs)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl Handler for ObserverHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn handle(&self, mut record: Record) {
        if !self.enabled(record.level) {
            return;
        }
        let own = std::mem::take(&mut record.attrs);
        let attrs = fold::flatten(&self.attrs, &self.groups, own);
        self.logs.add(record, attrs);
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let attrs = fold::normalize(attrs);
        let mut child = self.clone();
        if attrs.is_empty() {
            return child;
        }
        match child.groups.last_mut() {
            Some(group) => group.attrs.extend(attrs),
            None => child.attrs.extend(attrs),
        }
        child
    }

    fn with_group(&self, name: &str) -> Self {
        let mut child = self.clone();
        if !name.is_empty() {
            child.groups.push(OpenGroup::new(name));
        }
        child
    }
}
