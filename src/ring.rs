use crate::attr::Attr;
use crate::record::{LoggedRecord, Record};
use crate::sink::ObservedLogs;
use parking_lot::RwLock;

/// [`ObservedLogs`] backed by a circular buffer with a write cursor.
///
/// Behaves exactly like [`OrderedLogs`](crate::ordered::OrderedLogs) but a
/// bounded store overwrites the oldest slot in place instead of shifting.
#[derive(Debug, Default)]
pub struct RingLogs {
    inner: RwLock<Ring>,
}

#[derive(Debug, Default)]
struct Ring {
    /// Fixed size when bounded, growing when unbounded.
    slots: Vec<Option<LoggedRecord>>,
    bounded: bool,
    /// Total number of records written since the last reset.
    written: usize,
}

impl Ring {
    fn with_max_logs(max_logs: usize) -> Self {
        Self {
            slots: vec![None; max_logs],
            bounded: max_logs > 0,
            written: 0,
        }
    }

    fn len(&self) -> usize {
        if self.bounded {
            self.written.min(self.slots.len())
        } else {
            self.slots.len()
        }
    }

    /// Oldest-first iteration over the stored records.
    fn iter(&self) -> impl Iterator<Item = &LoggedRecord> {
        let start = if self.bounded && self.written > self.slots.len() {
            self.written % self.slots.len()
        } else {
            0
        };
        let (head, tail) = self.slots.split_at(start);
        tail.iter().chain(head.iter()).flatten()
    }

    fn push(&mut self, entry: LoggedRecord) {
        if self.bounded {
            let idx = self.written % self.slots.len();
            self.slots[idx] = Some(entry);
        } else {
            self.slots.push(Some(entry));
        }
        self.written += 1;
    }

    fn reset(&mut self) {
        self.written = 0;
        if self.bounded {
            self.slots.iter_mut().for_each(|s| *s = None);
        } else {
            self.slots = Vec::new();
        }
    }
}

impl RingLogs {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store keeping at most `max_logs` records; zero means unbounded.
    pub fn with_max_logs(max_logs: usize) -> Self {
        Self {
            inner: RwLock::new(Ring::with_max_logs(max_logs)),
        }
    }
}

impl ObservedLogs for RingLogs {
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn all(&self) -> Vec<LoggedRecord> {
        self.inner.read().iter().cloned().collect()
    }

    fn take_all(&self) -> Vec<LoggedRecord> {
        let mut ring = self.inner.write();
        let ret = ring.iter().cloned().collect();
        ring.reset();
        ret
    }

    fn add(&self, record: Record, attrs: Vec<Attr>) {
        let entry = LoggedRecord::from_parts(record, attrs);
        self.inner.write().push(entry);
    }

    fn filter(&self, keep: &dyn Fn(&LoggedRecord) -> bool) -> Box<dyn ObservedLogs> {
        let ring = self.inner.read();
        let slots: Vec<_> = ring.iter().filter(|&r| keep(r)).cloned().map(Some).collect();
        let written = slots.len();
        Box::new(RingLogs {
            inner: RwLock::new(Ring {
                slots,
                bounded: false,
                written,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn numbers(logs: &RingLogs) -> Vec<i64> {
        logs.all()
            .iter()
            .map(|r| match r.attrs[0].value {
                crate::attr::Value::Int64(i) => i,
                _ => unreachable!(),
            })
            .collect()
    }

    fn add_range(logs: &RingLogs, range: std::ops::Range<i64>) {
        for i in range {
            logs.add(Record::new(Level::INFO, "msg"), vec![Attr::int("i", i)]);
        }
    }

    #[test]
    fn partially_filled_ring_is_in_order() {
        let logs = RingLogs::with_max_logs(4);
        add_range(&logs, 0..3);
        assert_eq!(numbers(&logs), vec![0, 1, 2]);
    }

    #[test]
    fn wrapped_ring_is_in_order() {
        let logs = RingLogs::with_max_logs(4);
        for n in 5..12 {
            logs.take_all();
            add_range(&logs, 0..n);
            let want: Vec<i64> = (n - 4..n).collect();
            assert_eq!(numbers(&logs), want, "after {} records", n);
            assert_eq!(logs.len(), 4);
        }
    }

    #[test]
    fn take_all_resets_cursor() {
        let logs = RingLogs::with_max_logs(3);
        add_range(&logs, 0..5);
        let taken: Vec<_> = logs.take_all().into_iter().map(|r| r.attrs).collect();
        assert_eq!(taken.len(), 3);
        assert_eq!(logs.len(), 0);

        add_range(&logs, 10..12);
        assert_eq!(numbers(&logs), vec![10, 11]);
    }

    #[test]
    fn filter_of_wrapped_ring_is_unbounded_and_ordered() {
        let logs = RingLogs::with_max_logs(3);
        add_range(&logs, 0..7);
        let filtered = logs.filter(&|r| r.attrs[0] != Attr::int("i", 5));
        assert_eq!(filtered.len(), 2);
        assert_eq!(
            filtered.all().into_iter().map(|r| r.attrs[0].clone()).collect::<Vec<_>>(),
            vec![Attr::int("i", 4), Attr::int("i", 6)]
        );
    }
}
