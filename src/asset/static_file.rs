//! Pass-through files.

use super::AssetError;
use std::fs;
use std::path::{Path, PathBuf};

/// A file copied unchanged from the source tree to the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    /// Site source root.
    pub base: PathBuf,
    /// Directory relative to `base`, empty for top-level files.
    pub dir: PathBuf,
    /// File name.
    pub name: String,
}

impl StaticFile {
    pub fn new(base: impl Into<PathBuf>, dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Absolute source path.
    pub fn path(&self) -> PathBuf {
        self.base.join(&self.dir).join(&self.name)
    }

    pub fn relative_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Copy to `dest/dir/name`.
    pub fn write(&self, dest: &Path) -> Result<(), AssetError> {
        let target = dest.join(self.relative_path());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
        }
        fs::copy(self.path(), &target).map_err(|e| AssetError::io(&target, e))?;
        Ok(())
    }
}
