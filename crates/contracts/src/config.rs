//! SplitConfig - explicit configuration passed into the pipeline

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Category, Classifier, MatchMode};

/// Default marker selecting the secondary stream
pub const DEFAULT_MARKER: &str = "ERR";
/// Default suffix of the primary output
pub const DEFAULT_PRIMARY_SUFFIX: &str = ".stdout";
/// Default suffix of the secondary output
pub const DEFAULT_SECONDARY_SUFFIX: &str = ".stderr";
/// Default per-channel queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Splitter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SplitConfig {
    /// Substring selecting the secondary category
    #[validate(length(min = 1, message = "marker cannot be empty"))]
    pub marker: String,

    /// Marker match mode
    pub match_mode: MatchMode,

    /// Suffix appended to the input path for primary lines
    #[validate(length(min = 1, message = "suffix cannot be empty"))]
    pub primary_suffix: String,

    /// Suffix appended to the input path for secondary lines
    #[validate(length(min = 1, message = "suffix cannot be empty"))]
    pub secondary_suffix: String,

    /// Bounded capacity of each category channel
    #[validate(range(min = 1, max = 1_048_576))]
    pub queue_capacity: usize,

    /// Fail the run (after draining) if any line could not be written
    pub strict_writes: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            match_mode: MatchMode::default(),
            primary_suffix: DEFAULT_PRIMARY_SUFFIX.to_string(),
            secondary_suffix: DEFAULT_SECONDARY_SUFFIX.to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            strict_writes: false,
        }
    }
}

impl SplitConfig {
    /// Build the classifier for this configuration
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.marker.clone().into_bytes(), self.match_mode)
    }

    /// Output suffix for a category
    pub fn suffix(&self, category: Category) -> &str {
        match category {
            Category::Primary => &self.primary_suffix,
            Category::Secondary => &self.secondary_suffix,
        }
    }

    /// Output path for a category: the input path with the suffix appended
    pub fn output_path(&self, input: &Path, category: Category) -> PathBuf {
        let mut path = OsString::from(input.as_os_str());
        path.push(self.suffix(category));
        PathBuf::from(path)
    }

    /// Output paths for all categories, indexed by `Category::index()`
    pub fn output_paths(&self, input: &Path) -> [PathBuf; Category::COUNT] {
        Category::ALL.map(|category| self.output_path(input, category))
    }
}
