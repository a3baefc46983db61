//! Deferred stylesheet compilation.
//!
//! A [`StylesheetTask`] stands in for one `.less` source in the asset
//! collection. Nothing happens until the write phase calls
//! [`StylesheetTask::write`], which runs
//!
//! ```text
//! <lessc...> <base>/<dir>/<name>.less <dest>/<css_dest>/<dir>/<name>.css
//! ```

use super::AssetError;
use crate::config::CompilerCommand;
use crate::config::section::less::{DEFAULT_CSS_DEST, DEFAULT_EXTENSION};
use crate::debug;
use crate::utils::exec::{Cmd, EMPTY_FILTER, FilterRule, format_error};
use crate::utils::path::output_prefix;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of compiled output.
const CSS_EXTENSION: &str = ".css";

/// lessc prints these around the actual error.
static LESSC_FILTER: FilterRule = FilterRule::new(&["npm WARN", "npm notice"]);

/// Settings shared by every task of one build.
#[derive(Debug, Clone)]
pub struct StylesheetOptions {
    /// Output prefix below the destination root.
    pub css_dest: String,
    pub compiler: CompilerCommand,
    /// Source extension, with leading dot.
    pub extension: String,
    /// Fail the write when the compiler fails.
    pub strict: bool,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        Self {
            css_dest: DEFAULT_CSS_DEST.into(),
            compiler: CompilerCommand::Argv(Vec::new()),
            extension: DEFAULT_EXTENSION.into(),
            strict: false,
        }
    }
}

/// One pending source-to-css compilation.
#[derive(Debug, Clone)]
pub struct StylesheetTask {
    base: PathBuf,
    dir: PathBuf,
    name: String,
    /// `base/dir/name`, computed once.
    source: PathBuf,
    options: StylesheetOptions,
}

impl StylesheetTask {
    /// Create a task. Performs no I/O.
    pub fn new(
        base: impl Into<PathBuf>,
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        options: StylesheetOptions,
    ) -> Self {
        let base = base.into();
        let dir = dir.into();
        let name = name.into();
        let source = base.join(&dir).join(&name);
        Self {
            base,
            dir,
            name,
            source,
            options,
        }
    }

    /// Absolute path of the source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn relative_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Source name with its extension swapped for `.css`.
    ///
    /// The extension matches case-insensitively: `Main.LESS` gives `Main.css`.
    pub fn output_name(&self) -> Result<String, AssetError> {
        let ext = &self.options.extension;
        let pattern = format!("(?i){}$", regex::escape(ext));
        let re = Regex::new(&pattern).map_err(|_| self.extension_error())?;

        if !re.is_match(&self.name) {
            return Err(self.extension_error());
        }
        Ok(re.replace(&self.name, CSS_EXTENSION).into_owned())
    }

    /// Where the compiled file lands below `dest`. Pure.
    pub fn output_path(&self, dest: &Path) -> Result<PathBuf, AssetError> {
        Ok(dest
            .join(output_prefix(&self.options.css_dest))
            .join(&self.dir)
            .join(self.output_name()?))
    }

    /// Compile into `dest`.
    ///
    /// The output directory is created first. Compiler failures only fail
    /// the write in strict mode; otherwise they show up in verbose logs.
    pub fn write(&self, dest: &Path) -> Result<(), AssetError> {
        let output = self.output_path(dest)?;
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
        }

        let argv = self.options.compiler.to_argv();
        let cmd = Cmd::from_slice(&argv)
            .arg(&self.source)
            .arg(&output)
            .cwd(&self.base);
        debug!("less"; "{}", cmd.display());

        if self.options.strict {
            cmd.filter(&LESSC_FILTER)
                .run()
                .map_err(|e| AssetError::Compiler {
                    path: self.source.clone(),
                    message: format!("{e:#}"),
                })?;
            return Ok(());
        }

        let name = argv.first().map_or("lessc", String::as_str);
        match cmd.output() {
            Ok(out) if !out.status.success() => {
                debug!("less"; "{}", format_error(name, &out, &EMPTY_FILTER));
            }
            Err(e) => debug!("less"; "{e:#}"),
            Ok(_) => {}
        }
        Ok(())
    }

    fn extension_error(&self) -> AssetError {
        AssetError::Extension {
            name: self.name.clone(),
            ext: self.options.extension.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(css_dest: &str, compiler: CompilerCommand) -> StylesheetOptions {
        StylesheetOptions {
            css_dest: css_dest.into(),
            compiler,
            ..Default::default()
        }
    }

    #[test]
    fn test_source_path_cached() {
        let task = StylesheetTask::new("/site", "styles", "main.less", options("css", "lessc".into()));
        assert_eq!(task.source(), Path::new("/site/styles/main.less"));
        assert_eq!(task.relative_path(), PathBuf::from("styles/main.less"));
    }

    #[test]
    fn test_output_path_with_prefix() {
        let task = StylesheetTask::new("/site", "styles", "main.less", options("css", "lessc".into()));
        assert_eq!(
            task.output_path(Path::new("/out")).unwrap(),
            PathBuf::from("/out/css/styles/main.css")
        );
    }

    #[test]
    fn test_output_path_root_prefix_collapses() {
        let task = StylesheetTask::new("/site", "styles", "main.less", options("/", "lessc".into()));
        assert_eq!(
            task.output_path(Path::new("/out")).unwrap(),
            PathBuf::from("/out/styles/main.css")
        );

        let leading = StylesheetTask::new("/site", "", "main.less", options("/css/", "lessc".into()));
        assert_eq!(
            leading.output_path(Path::new("/out")).unwrap(),
            PathBuf::from("/out/css/main.css")
        );
    }

    #[test]
    fn test_output_path_stays_below_dest() {
        let task = StylesheetTask::new("/site", "styles", "main.less", options("../escape", "lessc".into()));
        let output = task.output_path(Path::new("/out")).unwrap();
        assert_eq!(output, PathBuf::from("/out/escape/styles/main.css"));
        assert!(output.starts_with("/out"));
    }

    #[test]
    fn test_output_path_is_pure() {
        let task = StylesheetTask::new(
            "/does/not/exist",
            "a/b",
            "theme.less",
            options("assets", "lessc".into()),
        );
        let first = task.output_path(Path::new("/nowhere")).unwrap();
        let second = task.output_path(Path::new("/nowhere")).unwrap();
        assert_eq!(first, second);
        assert!(!Path::new("/nowhere/assets").exists());
    }

    #[test]
    fn test_output_name_case_insensitive() {
        let task = StylesheetTask::new("/site", "", "Main.LESS", options("/", "lessc".into()));
        assert_eq!(task.output_name().unwrap(), "Main.css");

        let dotted = StylesheetTask::new("/site", "", "print.less.less", options("/", "lessc".into()));
        assert_eq!(dotted.output_name().unwrap(), "print.less.css");
    }

    #[test]
    fn test_output_name_without_extension() {
        let task = StylesheetTask::new("/site", "", "main.scss", options("/", "lessc".into()));
        assert!(matches!(
            task.output_name(),
            Err(AssetError::Extension { .. })
        ));

        let out = TempDir::new().unwrap();
        assert!(task.write(out.path()).is_err());
        assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_invokes_compiler_with_two_paths() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(site.path().join("styles")).unwrap();
        fs::write(site.path().join("styles/main.less"), "@c: red;").unwrap();

        let script = site.path().join("fake-lessc.sh");
        let log = site.path().join("args.txt");
        fs::write(
            &script,
            format!("printf '%s\\n' \"$@\" > '{}'\ncp \"$1\" \"$2\"\n", log.display()),
        )
        .unwrap();

        let compiler = CompilerCommand::Argv(vec!["sh".into(), script.display().to_string()]);
        let task = StylesheetTask::new(site.path(), "styles", "main.less", options("css", compiler));
        task.write(out.path()).unwrap();

        let expected = out.path().join("css/styles/main.css");
        let args = fs::read_to_string(&log).unwrap();
        let args: Vec<_> = args.lines().collect();
        assert_eq!(
            args,
            vec![
                site.path().join("styles/main.less").display().to_string(),
                expected.display().to_string(),
            ]
        );
        assert_eq!(fs::read_to_string(expected).unwrap(), "@c: red;");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_shared_output_dir_is_idempotent() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(site.path().join("a.less"), "a").unwrap();
        fs::write(site.path().join("b.less"), "b").unwrap();

        for name in ["a.less", "b.less", "a.less"] {
            StylesheetTask::new(site.path(), "", name, options("css", "cp".into()))
                .write(out.path())
                .unwrap();
        }

        assert_eq!(fs::read_to_string(out.path().join("css/a.css")).unwrap(), "a");
        assert_eq!(fs::read_to_string(out.path().join("css/b.css")).unwrap(), "b");
    }

    #[cfg(unix)]
    #[test]
    fn test_compiler_failure_ignored_unless_strict() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(site.path().join("bad.less"), "{").unwrap();

        let failing = CompilerCommand::Argv(vec![
            "sh".into(),
            "-c".into(),
            "echo 'ParseError: missing closing `}`' >&2; exit 1".into(),
        ]);

        let lenient = StylesheetTask::new(site.path(), "", "bad.less", options("/", failing.clone()));
        lenient.write(out.path()).unwrap();
        assert!(!out.path().join("bad.css").exists());

        let strict = StylesheetTask::new(
            site.path(),
            "",
            "bad.less",
            StylesheetOptions {
                strict: true,
                ..options("/", failing)
            },
        );
        let err = strict.write(out.path()).unwrap_err();
        assert!(matches!(err, AssetError::Compiler { .. }));
        assert!(err.to_string().contains("ParseError"));
    }

    #[test]
    fn test_missing_compiler_ignored_unless_strict() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let missing = CompilerCommand::from("lessgen-definitely-not-installed");

        StylesheetTask::new(site.path(), "", "main.less", options("css", missing.clone()))
            .write(out.path())
            .unwrap();
        assert!(out.path().join("css").is_dir());

        let strict = StylesheetTask::new(
            site.path(),
            "",
            "main.less",
            StylesheetOptions {
                strict: true,
                ..options("css", missing)
            },
        );
        assert!(strict.write(out.path()).is_err());
    }
}
