use std::sync::Arc;

use tracing_log_observer::{
    observe, Attr, Logger, LoggedRecord, ObservedLogs, ObserverConfig, OrderedLogs, Record,
};

/// Example of plugging in a custom store by implementing `ObservedLogs`
/// directly. This one echoes every record before keeping it.
#[derive(Default)]
struct EchoLogs {
    inner: OrderedLogs,
}

impl ObservedLogs for EchoLogs {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn all(&self) -> Vec<LoggedRecord> {
        self.inner.all()
    }

    fn take_all(&self) -> Vec<LoggedRecord> {
        self.inner.take_all()
    }

    fn add(&self, record: Record, attrs: Vec<Attr>) {
        println!("[echo] {} {} {:?}", record.level, record.message, attrs);
        self.inner.add(record, attrs);
    }

    fn filter(&self, keep: &dyn Fn(&LoggedRecord) -> bool) -> Box<dyn ObservedLogs> {
        self.inner.filter(keep)
    }
}

fn main() {
    let store: Arc<dyn ObservedLogs> = Arc::new(EchoLogs::default());
    let (handler, logs) = observe(ObserverConfig::new().store(store));
    let logger = Logger::new(handler);

    logger.info("custom store example started", vec![]);
    logger.warn("simulated warning", vec![Attr::string("db", "my-custom-db")]);

    println!("{} records with a db field", logs.filter_field_key("db").len());
}
