use crate::attr::Attr;

/// Errors returned by this crate.
///
/// Capturing itself never fails; only parsing configuration input can.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),
}

/// Default key used by [`ErrorAttr`].
pub const DEFAULT_ERROR_KEY: &str = "error";

/// Builds attributes for errors under a fixed key.
///
/// A missing error produces the empty attribute, which handlers drop, so
/// call sites can pass an optional error unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAttr {
    key: String,
}

impl ErrorAttr {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attr(&self, err: Option<&dyn std::error::Error>) -> Attr {
        match err {
            Some(err) => Attr::string(self.key.clone(), err.to_string()),
            None => Attr::default(),
        }
    }
}

impl Default for ErrorAttr {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_KEY)
    }
}
