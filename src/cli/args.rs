//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Static site builder that compiles LESS stylesheets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Source directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Config file path (default: lessgen.toml)
    #[arg(short = 'C', long, default_value = "lessgen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new site with a default config
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Build the site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Fail the build when the stylesheet compiler fails
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["lessgen", "-o", "public", "build", "-c", "-V"]);
        assert_eq!(cli.output, Some(PathBuf::from("public")));
        assert_eq!(cli.config, PathBuf::from("lessgen.toml"));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert!(build_args.clean);
        assert!(build_args.verbose);
        assert_eq!(build_args.strict, None);
    }

    #[test]
    fn test_parse_strict_forms() {
        for (args, expected) in [
            (vec!["lessgen", "build", "--strict"], Some(true)),
            (vec!["lessgen", "build", "--strict=false"], Some(false)),
            (vec!["lessgen", "build", "--strict", "true"], Some(true)),
        ] {
            let cli = Cli::parse_from(args);
            let Commands::Build { build_args } = cli.command else {
                panic!("expected build");
            };
            assert_eq!(build_args.strict, expected);
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["lessgen", "--color", "never", "init", "blog", "--dry"]);
        assert!(cli.is_init());
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(matches!(
            cli.command,
            Commands::Init { name: Some(ref n), dry: true } if n == &PathBuf::from("blog")
        ));
    }
}
