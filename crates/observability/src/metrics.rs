//! Splitter metric recording
//!
//! Thin wrappers over the `metrics` facade so metric names live in one place.

use contracts::Category;
use metrics::counter;

/// Record one line pulled from the source
pub fn record_line_read() {
    counter!("logsplit_lines_read_total").increment(1);
}

/// Record one line handed to a category channel
pub fn record_line_dispatched(category: Category) {
    counter!("logsplit_lines_dispatched_total", "category" => category.as_str()).increment(1);
}

/// Record a failed write (or flush/close) in a sink worker
pub fn record_write_failure(category: Category) {
    counter!("logsplit_write_failures_total", "category" => category.as_str()).increment(1);
}

/// Record a mid-stream read failure
pub fn record_read_failure() {
    counter!("logsplit_read_failures_total").increment(1);
}
