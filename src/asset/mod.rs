//! Site assets and how they reach the output directory.
//!
//! Every entry collected from the source tree starts out as an
//! [`Asset::Static`] file. Generators may swap entries for other variants,
//! like [`Asset::Stylesheet`], which compiles instead of copying.
//!
//! ```text
//! read                     generate                 write
//! ────                     ────────                 ─────
//! styles/main.less  ──▶  Stylesheet(main.less) ──▶ lessc → css/styles/main.css
//! img/logo.png      ──▶  Static(logo.png)      ──▶ copy  → img/logo.png
//! ```

mod scan;
mod static_file;
mod stylesheet;

pub use scan::collect_static_files;
pub use static_file::StaticFile;
pub use stylesheet::{StylesheetOptions, StylesheetTask};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing an asset to the output directory.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to write `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{name}` does not end with `{ext}`")]
    Extension { name: String, ext: String },

    #[error("failed to compile `{}`\n{message}", path.display())]
    Compiler { path: PathBuf, message: String },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One entry of the site's asset collection.
#[derive(Debug, Clone)]
pub enum Asset {
    /// Copied unchanged.
    Static(StaticFile),
    /// Compiled by the external stylesheet compiler.
    Stylesheet(StylesheetTask),
}

impl Asset {
    /// Path relative to the site source root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Static(file) => file.relative_path(),
            Self::Stylesheet(task) => task.relative_path(),
        }
    }

    /// Counter name used by the write phase progress line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Stylesheet(_) => "less",
        }
    }

    /// Write this asset below `dest`.
    pub fn write(&self, dest: &Path) -> Result<(), AssetError> {
        match self {
            Self::Static(file) => file.write(dest),
            Self::Stylesheet(task) => task.write(dest),
        }
    }
}

impl From<StaticFile> for Asset {
    fn from(file: StaticFile) -> Self {
        Self::Static(file)
    }
}

impl From<StylesheetTask> for Asset {
    fn from(task: StylesheetTask) -> Self {
        Self::Stylesheet(task)
    }
}
