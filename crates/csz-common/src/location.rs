//! Source locations attached to declarations and diagnostics.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A byte range inside one source file.
///
/// File names are shared `Arc<str>` so cloning a location never allocates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub start: u32,
    pub length: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<Arc<str>>, start: u32, length: u32) -> Self {
        SourceLocation {
            file: file.into(),
            start,
            length,
        }
    }

    /// Location used for symbols that have no source (metadata, synthesized).
    pub fn none() -> Self {
        SourceLocation {
            file: Arc::from(""),
            start: 0,
            length: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.file.is_empty() && self.length == 0
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{}]", self.file, self.start, self.end())
    }
}
