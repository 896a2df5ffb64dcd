use crate::handler::ObserverHandler;
use crate::layer::ObserverLayer;
use crate::level::Level;
use crate::ordered::OrderedLogs;
use crate::ring::RingLogs;
use crate::sink::ObservedLogs;
use std::sync::Arc;

/// Configuration of an observer.
///
/// **Fields**
/// - `min_level`: lowest level that is captured; `None` means `INFO`.
/// - `max_logs`: capacity bound of the built-in store; `0` keeps every
///   record.
/// - `ring`: use [`RingLogs`] instead of [`OrderedLogs`] for the built-in
///   store. Both behave the same to callers.
/// - `store`: custom store; when set, `max_logs` and `ring` are ignored.
#[derive(Clone, Default)]
pub struct ObserverConfig {
    pub min_level: Option<Level>,
    pub max_logs: usize,
    pub ring: bool,
    pub store: Option<Arc<dyn ObservedLogs>>,
}

impl ObserverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    pub fn max_logs(mut self, max_logs: usize) -> Self {
        self.max_logs = max_logs;
        self
    }

    pub fn ring(mut self, ring: bool) -> Self {
        self.ring = ring;
        self
    }

    pub fn store(mut self, store: Arc<dyn ObservedLogs>) -> Self {
        self.store = Some(store);
        self
    }

    fn build_store(&self) -> Arc<dyn ObservedLogs> {
        match &self.store {
            Some(store) => Arc::clone(store),
            None if self.ring => Arc::new(RingLogs::with_max_logs(self.max_logs)),
            None => Arc::new(OrderedLogs::with_max_logs(self.max_logs)),
        }
    }
}

impl std::fmt::Debug for ObserverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverConfig")
            .field("min_level", &self.min_level)
            .field("max_logs", &self.max_logs)
            .field("ring", &self.ring)
            .field("store", &self.store.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Create a capturing handler and the store it writes to.
///
/// **Returns**
/// - the root [`ObserverHandler`]; derive children from it with
///   `with_attrs`/`with_group`.
/// - the shared store, for assertions.
pub fn observe(config: ObserverConfig) -> (ObserverHandler, Arc<dyn ObservedLogs>) {
    let min_level = config.min_level.unwrap_or(Level::INFO);
    let logs = config.build_store();
    tracing::debug!(
        min_level = %min_level,
        max_logs = config.max_logs,
        ring = config.ring,
        custom_store = config.store.is_some(),
        "observer created"
    );
    (ObserverHandler::new(min_level, Arc::clone(&logs)), logs)
}

/// Observer with default settings: `INFO` and above, unbounded.
pub fn observe_default() -> (ObserverHandler, Arc<dyn ObservedLogs>) {
    observe(ObserverConfig::default())
}

/// Create a [`tracing_subscriber`] layer that captures events, and the
/// store it writes to.
///
/// Install it with `Registry::default().with(layer)`; see
/// [`ObserverLayer`] for how spans map to attributes and groups.
pub fn observe_tracing(config: ObserverConfig) -> (ObserverLayer, Arc<dyn ObservedLogs>) {
    let (handler, logs) = observe(config);
    (ObserverLayer::new(handler), logs)
}
