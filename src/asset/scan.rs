//! Asset collection (reads the filesystem, no side effects).

use super::StaticFile;
use crate::config::SiteConfig;
use std::path::Path;

/// Collect every file below `build.source` as a [`StaticFile`].
///
/// Skipped:
/// - names starting with `.`, `_` or `#`, or ending with `~`,
///   unless listed in `build.include`
/// - paths listed in `build.exclude`
/// - the output directory and the config file itself
///
/// Results are sorted by relative path so builds are deterministic.
///
/// ```text
/// site/
/// ├── lessgen.toml        -> (config, skipped)
/// ├── _site/              -> (output, skipped)
/// ├── .git/               -> (hidden, skipped)
/// ├── index.html          -> index.html
/// └── styles/
///     ├── main.less       -> styles/main.less
///     └── _mixins.less    -> (hidden, skipped)
/// ```
pub fn collect_static_files(config: &SiteConfig) -> Vec<StaticFile> {
    let source = &config.build.source;
    let mut results = Vec::new();

    if source.is_dir() {
        collect_recursive(&mut results, source, source, config);
    }

    results.sort_by_key(StaticFile::relative_path);
    results
}

fn collect_recursive(results: &mut Vec<StaticFile>, dir: &Path, base: &Path, config: &SiteConfig) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if is_ignored_name(&name) && !config.build.is_included(&name) {
            continue;
        }

        let rel = path.strip_prefix(base).unwrap_or(&path);
        if config.build.is_excluded(rel) || path == config.build.output || path == config.config_path {
            continue;
        }

        if path.is_dir() {
            collect_recursive(results, &path, base, config);
        } else {
            let rel_dir = rel.parent().unwrap_or(Path::new(""));
            results.push(StaticFile::new(base, rel_dir, name));
        }
    }
}

/// Hidden, private, or editor backup names.
fn is_ignored_name(name: &str) -> bool {
    name.starts_with(['.', '_', '#']) || name.ends_with('~')
}
