//! Sink implementations
//!
//! Contains FileSink.

mod file;

pub use self::file::FileSink;
