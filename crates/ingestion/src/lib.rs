//! # Ingestion
//!
//! Line source module.
//!
//! Responsibilities:
//! - Open the input resource read-only
//! - Split it into ordered `Line`s, terminator stripped
//! - Distinguish mid-stream read failure from clean end of input
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::LineSource;
//! use ingestion::FileLineSource;
//!
//! let mut source = FileLineSource::open("app.log").await?;
//! while let Some(line) = source.next_line().await? {
//!     // Process line
//! }
//! ```
//!
//! ## Mock Testing
//!
//! ```ignore
//! use ingestion::MockLineSource;
//!
//! let source = MockLineSource::from_lines(["INFO start", "ERR disk full"]).fail_after(1);
//! ```

mod mock;
mod reader;

// Re-exports
pub use contracts::{Line, LineSource};
pub use mock::MockLineSource;
pub use reader::{FileLineSource, ReaderLineSource};
