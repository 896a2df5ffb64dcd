use crate::attr::Attr;
use crate::record::{LoggedRecord, Record};
use crate::sink::ObservedLogs;
use parking_lot::RwLock;
use std::collections::VecDeque;

/// Ordered [`ObservedLogs`] backed by a deque.
///
/// With a capacity set, adding to a full store drops the oldest record
/// first, so the store always holds the most recent `max_logs` records.
#[derive(Debug, Default)]
pub struct OrderedLogs {
    max_logs: Option<usize>,
    logs: RwLock<VecDeque<LoggedRecord>>,
}

impl OrderedLogs {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store keeping at most `max_logs` records; zero means unbounded.
    pub fn with_max_logs(max_logs: usize) -> Self {
        if max_logs == 0 {
            return Self::new();
        }
        Self {
            max_logs: Some(max_logs),
            logs: RwLock::new(VecDeque::with_capacity(max_logs)),
        }
    }

    pub fn max_logs(&self) -> Option<usize> {
        self.max_logs
    }

    fn from_records(records: VecDeque<LoggedRecord>) -> Self {
        Self {
            max_logs: None,
            logs: RwLock::new(records),
        }
    }
}

impl ObservedLogs for OrderedLogs {
    fn len(&self) -> usize {
        self.logs.read().len()
    }

    fn all(&self) -> Vec<LoggedRecord> {
        self.logs.read().iter().cloned().collect()
    }

    fn take_all(&self) -> Vec<LoggedRecord> {
        let mut logs = self.logs.write();
        let capacity = self.max_logs.unwrap_or(0);
        std::mem::replace(&mut *logs, VecDeque::with_capacity(capacity)).into()
    }

    fn add(&self, record: Record, attrs: Vec<Attr>) {
        let entry = LoggedRecord::from_parts(record, attrs);
        let mut logs = self.logs.write();
        if let Some(max) = self.max_logs {
            while logs.len() >= max {
                logs.pop_front();
            }
        }
        logs.push_back(entry);
    }

    fn filter(&self, keep: &dyn Fn(&LoggedRecord) -> bool) -> Box<dyn ObservedLogs> {
        let logs = self.logs.read();
        let filtered = logs.iter().filter(|&r| keep(r)).cloned().collect();
        Box::new(OrderedLogs::from_records(filtered))
    }
}
