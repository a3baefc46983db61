//! `[less]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [less]
//! lessc = "lessc"               # or ["npx", "lessc"], or "~/node_modules/.bin/lessc"
//! css_dest = "/css"             # output prefix under build.output (default "/")
//! extension = ".less"           # source extension (default ".less")
//! strict = false                # fail the build when the compiler fails
//! ```
//!
//! Every matching file `<source>/<dir>/<name>.less` is compiled with
//! `lessc <source>/<dir>/<name>.less <output>/<css_dest>/<dir>/<name>.css`.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::{Component, Path};

const LESSC: FieldPath = FieldPath::new("less.lessc");
const EXTENSION: FieldPath = FieldPath::new("less.extension");
const CSS_DEST: FieldPath = FieldPath::new("less.css_dest");

/// Default source extension.
pub const DEFAULT_EXTENSION: &str = ".less";

/// Default output prefix ("no prefix").
pub const DEFAULT_CSS_DEST: &str = "/";

/// Package runners that fetch the compiler on demand.
const PACKAGE_RUNNERS: &[&str] = &["npx", "bunx", "pnpx", "yarn", "dlx"];

/// Compiler invocation: a single program or a program with leading args.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompilerCommand {
    /// `lessc = "/usr/local/bin/lessc"`
    Program(String),
    /// `lessc = ["npx", "lessc", "--strict-math=on"]`
    Argv(Vec<String>),
}

impl CompilerCommand {
    /// Whether there is no program to run.
    pub fn is_empty(&self) -> bool {
        self.program().is_none()
    }

    /// The program to execute (first element), if any.
    pub fn program(&self) -> Option<&str> {
        let program = match self {
            Self::Program(p) => p.as_str(),
            Self::Argv(argv) => argv.first().map(String::as_str)?,
        };
        let program = program.trim();
        (!program.is_empty()).then_some(program)
    }

    /// Full argv with `~` expanded in the program path.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = match self {
            Self::Program(p) => vec![p.trim().to_string()],
            Self::Argv(argv) => argv.clone(),
        };
        if let Some(program) = argv.first_mut() {
            *program = shellexpand::tilde(program.as_str()).into_owned();
        }
        argv
    }

    /// Anchor a relative program path such as `bin/lessc` at `root`.
    ///
    /// Bare names (`lessc`, `npx`) are left for `PATH` lookup.
    pub fn resolve_against(&mut self, root: &Path) {
        let program = match self {
            Self::Program(p) => p,
            Self::Argv(argv) => match argv.first_mut() {
                Some(p) => p,
                None => return,
            },
        };

        let expanded = shellexpand::tilde(program.trim()).into_owned();
        let path = Path::new(&expanded);
        if path.is_relative() && path.components().count() > 1 {
            *program = root.join(path).to_string_lossy().into_owned();
        }
    }
}

impl From<&str> for CompilerCommand {
    fn from(program: &str) -> Self {
        Self::Program(program.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LessConfig {
    /// Compiler command. Required once the build runs.
    pub lessc: Option<CompilerCommand>,

    /// Output prefix under the build output directory.
    pub css_dest: Option<String>,

    /// Source extension that selects files for compilation.
    pub extension: String,

    /// Turn compiler failures into build errors.
    pub strict: bool,
}

impl Default for LessConfig {
    fn default() -> Self {
        Self {
            lessc: None,
            css_dest: None,
            extension: DEFAULT_EXTENSION.into(),
            strict: false,
        }
    }
}

impl LessConfig {
    /// Configured compiler, `None` when absent or empty.
    pub fn compiler(&self) -> Option<&CompilerCommand> {
        self.lessc.as_ref().filter(|c| !c.is_empty())
    }

    /// Output prefix, defaulting to `/`.
    pub fn css_dest(&self) -> &str {
        self.css_dest.as_deref().unwrap_or(DEFAULT_CSS_DEST)
    }

    /// Source extension with its leading dot (`less` becomes `.less`).
    pub fn extension(&self) -> String {
        let ext = self.extension.trim();
        if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        }
    }

    /// Validate `[less]` configuration.
    ///
    /// A missing compiler is not reported here: the stylesheet generator
    /// fails the build on its own when it runs.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let ext = self.extension.trim().trim_start_matches('.');
        if ext.is_empty() {
            diag.error_with_hint(
                EXTENSION,
                format!("{EXTENSION} must not be empty"),
                format!("remove {EXTENSION} to use `{DEFAULT_EXTENSION}`"),
            );
        } else if ext.eq_ignore_ascii_case("css") {
            diag.error(
                EXTENSION,
                "`.css` sources would be compiled onto themselves",
            );
        }

        if Path::new(self.css_dest())
            .components()
            .any(|c| c == Component::ParentDir)
        {
            diag.error_with_hint(
                CSS_DEST,
                format!("`{}` points outside the output directory", self.css_dest()),
                format!("use a path below `build.output` for {CSS_DEST}"),
            );
        }

        let Some(compiler) = self.compiler() else {
            return;
        };
        let argv = compiler.to_argv();
        let program = &argv[0];

        if which::which(program).is_err() {
            if PACKAGE_RUNNERS.contains(&program.as_str()) {
                if let Some(package) = argv.get(1) {
                    diag.hint(
                        LESSC,
                        format!("`{package}` via `{program}`, ensure the package is installed"),
                    );
                }
            } else {
                diag.hint(
                    LESSC,
                    format!("`{program}` not found, stylesheets will not be compiled"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.less.lessc.is_none());
        assert!(config.less.compiler().is_none());
        assert_eq!(config.less.css_dest(), "/");
        assert_eq!(config.less.extension(), ".less");
        assert!(!config.less.strict);
    }

    #[test]
    fn test_program_form() {
        let config = test_parse_config(
            r#"
[less]
lessc = "/opt/less/bin/lessc"
css_dest = "css"
strict = true
"#,
        );
        assert_eq!(
            config.less.compiler(),
            Some(&CompilerCommand::Program("/opt/less/bin/lessc".into()))
        );
        assert_eq!(config.less.css_dest(), "css");
        assert!(config.less.strict);
    }

    #[test]
    fn test_argv_form() {
        let config = test_parse_config("[less]\nlessc = [\"npx\", \"lessc\"]");
        let compiler = config.less.compiler().unwrap();
        assert_eq!(compiler.program(), Some("npx"));
        assert_eq!(compiler.to_argv(), vec!["npx", "lessc"]);
    }

    #[test]
    fn test_empty_compiler_is_absent() {
        let config = test_parse_config("[less]\nlessc = \"  \"");
        assert!(config.less.lessc.is_some());
        assert!(config.less.compiler().is_none());

        let config = test_parse_config("[less]\nlessc = []");
        assert!(config.less.compiler().is_none());
    }

    #[test]
    fn test_tilde_expansion() {
        let compiler = CompilerCommand::from("~/bin/lessc");
        let argv = compiler.to_argv();
        assert!(!argv[0].starts_with('~') || std::env::var_os("HOME").is_none());
        assert!(argv[0].ends_with("/bin/lessc"));
    }

    #[test]
    fn test_extension_normalized() {
        let less = LessConfig {
            extension: "scss".into(),
            ..Default::default()
        };
        assert_eq!(less.extension(), ".scss");
    }

    #[test]
    fn test_validate_extension() {
        let mut diag = ConfigDiagnostics::new();
        LessConfig {
            extension: ".".into(),
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        LessConfig {
            extension: "CSS".into(),
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_css_dest_parent_dir() {
        let mut diag = ConfigDiagnostics::new();
        LessConfig {
            css_dest: Some("../shared/css".into()),
            ..Default::default()
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, CSS_DEST);

        let mut diag = ConfigDiagnostics::new();
        LessConfig {
            css_dest: Some("/assets/css".into()),
            ..Default::default()
        }
        .validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_resolve_against_root() {
        let root = Path::new("/project");

        let mut relative = CompilerCommand::from("bin/lessc");
        relative.resolve_against(root);
        assert_eq!(relative, CompilerCommand::from("/project/bin/lessc"));

        let mut dotted = CompilerCommand::Argv(vec!["./node_modules/.bin/lessc".into(), "--math=always".into()]);
        dotted.resolve_against(root);
        assert_eq!(dotted.to_argv()[0], "/project/./node_modules/.bin/lessc");
        assert_eq!(dotted.to_argv()[1], "--math=always");

        let mut bare = CompilerCommand::from("lessc");
        bare.resolve_against(root);
        assert_eq!(bare, CompilerCommand::from("lessc"));

        let mut absolute = CompilerCommand::from("/usr/bin/lessc");
        absolute.resolve_against(root);
        assert_eq!(absolute, CompilerCommand::from("/usr/bin/lessc"));

        let mut empty = CompilerCommand::Argv(Vec::new());
        empty.resolve_against(root);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_validate_missing_program_is_only_a_hint() {
        let mut diag = ConfigDiagnostics::new();
        LessConfig {
            lessc: Some("lessgen-definitely-not-installed".into()),
            ..Default::default()
        }
        .validate(&mut diag);
        assert!(diag.is_empty());
    }
}
