//! Utility modules shared across the build.
//!
//! - [`exec`]: External command execution (`Cmd` builder)
//! - [`path`]: Path normalization and relative-directory helpers
//! - [`plural`]: Count formatting for log messages

pub mod exec;
pub mod path;
mod plural;

pub use plural::plural_count;
