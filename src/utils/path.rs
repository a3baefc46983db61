//! Path normalization utilities.
//!
//! Pure functions for path manipulation. Only `normalize_path` touches the
//! filesystem (through `canonicalize`).

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Directory of `path` relative to `root`.
///
/// ```text
/// relative_dir("/site/styles/main.less", "/site") -> "styles"
/// relative_dir("/site/main.less", "/site")        -> ""
/// ```
///
/// Paths outside `root` keep their parent directory unchanged.
pub fn relative_dir(path: &Path, root: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new(""));
    parent
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| parent.to_path_buf())
}

/// Turn a configured output prefix into a path that can be joined.
///
/// Root markers, leading separators and `..` are dropped, so `/`, `""` and
/// `.` all mean "no prefix", `/css` behaves like `css`, and the prefix never
/// leaves the directory it is joined to.
pub fn output_prefix(prefix: &str) -> PathBuf {
    Path::new(prefix)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}
