//! Site initialization.
//!
//! Writes a commented `lessgen.toml` and ignores the output directory in
//! `.gitignore`. Existing sites can be initialized in place: only an
//! existing config file stops the command.

use crate::{
    config::{ConfigError, SiteConfig},
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Initialize a site at the config's root.
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_site(site_config: &SiteConfig, dry_run: bool) -> Result<()> {
    let template = generate_config_template(&site_config.build.output);
    if dry_run {
        print!("{template}");
        return Ok(());
    }

    let config_path = &site_config.config_path;
    if config_path.exists() {
        return Err(ConfigError::AlreadyExists(config_path.clone()).into());
    }

    let root = site_config.get_root();
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;

    fs::write(config_path, template)
        .with_context(|| format!("Failed to write config file '{}'", config_path.display()))?;
    write_ignore_files(root, &site_config.build.output)?;

    log!("init"; "created {}", config_path.display());
    Ok(())
}

/// Generate lessgen.toml content with comments
pub fn generate_config_template(output: &Path) -> String {
    format!(
        r#"# lessgen configuration file (v{version})

[build]
# Site source root, relative to this file
source = "."
# Build output directory
output = "{output}"
# Paths below `source` that are never copied
exclude = []
# Hidden names (starting with `.` or `_`) that are still copied
include = []

[less]
# Compiler program, or an argv prefix such as ["npx", "lessc"]
lessc = "lessc"
# Output prefix under `build.output`, "/" for none
css_dest = "/"
# Source extension
extension = ".less"
# Fail the build when the compiler fails
strict = false
"#,
        version = env!("CARGO_PKG_VERSION"),
        output = output.display(),
    )
}

/// Write ignore files with the output directory pattern.
///
/// Existing ignore files are left untouched.
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let content = format!("{}/\n", output_pattern.display());

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
