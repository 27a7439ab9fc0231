//! Command implementations.

mod split;

pub use split::run_split;
