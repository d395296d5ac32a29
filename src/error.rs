//! Error handling for the feedwatch application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for feedwatch operations
#[derive(Error, Debug)]
pub enum FeedError {
    /// Errors from the HTTP transport (connection, TLS, status codes)
    #[error("HTTP error: {0}")]
    Http(Box<ureq::Error>),

    /// Response body could not be parsed as the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// A sample carried a timestamp that could not be interpreted
    #[error("Timestamp error: {0}")]
    Timestamp(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FeedError>,
    },
}

impl FeedError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FeedError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a transport error from a ureq error
    pub fn from_ureq(err: ureq::Error) -> Self {
        FeedError::Http(Box::new(err))
    }

    /// True for failures surfaced as error notifications: transport
    /// failures and unparseable bodies or timestamps.
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            FeedError::Http(_) | FeedError::Parse(_) | FeedError::Timestamp(_) => true,
            FeedError::WithContext { source, .. } => source.is_fetch_failure(),
            _ => false,
        }
    }
}

/// Result type alias for feedwatch operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ureq::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FeedError::from_ureq(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| FeedError::from_ureq(e).with_context(f()))
    }
}
