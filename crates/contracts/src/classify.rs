//! Classifier - the marker rule selecting a line's category

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Category, Line};

/// How the marker is matched against line content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Marker may appear anywhere in the line
    #[default]
    Contains,
    /// Line must start with the marker
    Prefix,
}

/// Pure, deterministic line classifier
///
/// A line is `Secondary` iff its content matches the marker under the
/// configured `MatchMode`, otherwise `Primary`. Matching is byte-wise and
/// case-sensitive. An empty marker matches every line.
#[derive(Debug, Clone)]
pub struct Classifier {
    marker: Bytes,
    mode: MatchMode,
}

impl Classifier {
    /// Create a classifier for the given marker
    pub fn new(marker: impl Into<Bytes>, mode: MatchMode) -> Self {
        Self {
            marker: marker.into(),
            mode,
        }
    }

    /// Marker bytes
    pub fn marker(&self) -> &[u8] {
        &self.marker
    }

    /// Match mode
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Classify a line
    pub fn classify(&self, line: &Line) -> Category {
        if self.matches(line.as_bytes()) {
            Category::Secondary
        } else {
            Category::Primary
        }
    }

    /// Whether raw content matches the marker
    pub fn matches(&self, content: &[u8]) -> bool {
        match self.mode {
            MatchMode::Prefix => content.starts_with(&self.marker),
            MatchMode::Contains => contains(content, &self.marker),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}
