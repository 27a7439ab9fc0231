//! # Contracts
//!
//! Frozen interface contracts shared by every logsplit crate.
//! Business crates depend only on this crate, reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `Line`: one immutable input record without its terminator
//! - `Category`: the binary routing outcome (`Primary` / `Secondary`)
//! - `Classifier`: the single marker rule mapping a `Line` to its `Category`

mod classify;
mod config;
mod error;
mod line;
mod sink;
mod source;

pub use classify::*;
pub use config::*;
pub use error::*;
pub use line::*;
pub use sink::*;
pub use source::LineSource;
