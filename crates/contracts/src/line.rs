//! Line and Category - the records flowing through the pipeline

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One input record, without its line terminator
///
/// Content is arbitrary bytes (not necessarily UTF-8). Cloning is cheap:
/// the payload is reference counted and never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based arrival order within the source
    pub number: u64,
    /// Raw content
    pub content: Bytes,
}

impl Line {
    /// Create a new line
    pub fn new(number: u64, content: impl Into<Bytes>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }

    /// Raw content bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes (terminator excluded)
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the line has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Routing outcome of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Lines without the marker
    Primary,
    /// Lines containing the marker
    Secondary,
}

impl Category {
    /// Number of categories (fan-out factor)
    pub const COUNT: usize = 2;

    /// All categories, ordered by `index()`
    pub const ALL: [Category; Self::COUNT] = [Category::Primary, Category::Secondary];

    /// Stable table index
    pub fn index(self) -> usize {
        match self {
            Category::Primary => 0,
            Category::Secondary => 1,
        }
    }

    /// Label used in logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Primary => "primary",
            Category::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
