use crate::attr::Attr;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::Record;

/// Minimal front-end over a [`Handler`].
///
/// Stamps records with the current time and skips the handler entirely when
/// it reports the level as disabled.
#[derive(Debug, Clone)]
pub struct Logger<H> {
    handler: H,
}

impl<H: Handler> Logger<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Logger whose records carry `attrs` in addition to their own.
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_attrs(attrs))
    }

    /// Logger that nests further attributes under `name`.
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_group(name))
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    pub fn log_attrs(&self, level: Level, msg: &str, attrs: Vec<Attr>) {
        if !self.handler.enabled(level) {
            return;
        }
        self.handler.handle(Record::now(level, msg).with_attrs(attrs));
    }

    pub fn debug(&self, msg: &str, attrs: Vec<Attr>) {
        self.log_attrs(Level::DEBUG, msg, attrs)
    }

    pub fn info(&self, msg: &str, attrs: Vec<Attr>) {
        self.log_attrs(Level::INFO, msg, attrs)
    }

    pub fn warn(&self, msg: &str, attrs: Vec<Attr>) {
        self.log_attrs(Level::WARN, msg, attrs)
    }

    pub fn error(&self, msg: &str, attrs: Vec<Attr>) {
        self.log_attrs(Level::ERROR, msg, attrs)
    }
}
