//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "."                    # Site source root (relative to config file)
//! output = "_site"                # Build output directory
//! exclude = ["node_modules", "README.md"]
//! include = [".htaccess"]         # Hidden names that are still collected
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SOURCE: FieldPath = FieldPath::new("build.source");
const OUTPUT: FieldPath = FieldPath::new("build.output");

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Site source root.
    pub source: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Paths (relative to `source`) that are never collected.
    /// A directory entry excludes everything below it.
    pub exclude: Vec<PathBuf>,

    /// File or directory names collected even though they start with
    /// `.` or `_`.
    pub include: Vec<String>,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            source: ".".into(),
            output: "_site".into(),
            exclude: Vec::new(),
            include: Vec::new(),
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    /// Check whether a source-relative path is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|e| relative.starts_with(e))
    }

    /// Check whether a hidden name was explicitly included.
    pub fn is_included(&self, name: &str) -> bool {
        self.include.iter().any(|i| i == name)
    }

    /// Validate build configuration.
    ///
    /// Expects `source` and `output` to be normalized already.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.source.exists() {
            diag.error_with_hint(
                SOURCE,
                format!("directory not found: {}", self.source.display()),
                format!("create it or update {SOURCE}"),
            );
        } else if !self.source.is_dir() {
            diag.error(
                SOURCE,
                format!("not a directory: {}", self.source.display()),
            );
        }

        if self.output == self.source {
            diag.error_with_hint(
                OUTPUT,
                "output directory is the same as the source directory",
                format!("point {OUTPUT} at a separate directory such as `_site`"),
            );
        }

        for entry in &self.exclude {
            if entry.is_absolute() {
                diag.error(
                    FieldPath::new("build.exclude"),
                    format!("must be relative to {SOURCE}: {}", entry.display()),
                );
            }
        }
    }
}
