//! Configuration section definitions.
//!
//! Each module corresponds to a section in `lessgen.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Source/output paths, include/exclude     |
//! | `less`  | `[less]`     | Stylesheet compiler and output prefix    |

mod build;
pub mod less;

pub use build::BuildSectionConfig;
pub use less::{CompilerCommand, LessConfig};
