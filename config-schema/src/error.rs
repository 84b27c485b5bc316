use std::fmt;

use thiserror::Error;

/// A configuration value failed validation.
///
/// The message is the user-facing text. The path records where in the
/// configuration tree the failure happened, outermost key first, and is
/// filled in as the error propagates out through nested options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    path: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Prefix the error path with an enclosing option key or list index.
    #[must_use]
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Error rendered with its location, e.g. `display.0.dimensions: ...`.
    pub fn located(&self) -> Located<'_> {
        Located(self)
    }
}

pub struct Located<'a>(&'a ValidationError);

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.path.is_empty() {
            write!(f, "{}", self.0.message)
        } else {
            write!(f, "{}: {}", self.0.path.join("."), self.0.message)
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
