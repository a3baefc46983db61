//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Clean** - Remove the output directory (`--clean`)
//! - **Read** - Collect static files from the source tree
//! - **Generate** - Run generators (LESS substitution)
//! - **Write** - Copy and compile every asset in parallel

use crate::{
    config::SiteConfig,
    generator::default_generators,
    log,
    site::Site,
    utils::plural_count,
};
use anyhow::Result;
use std::time::Instant;

/// Build the entire site.
///
/// Pipeline: clean -> read -> generate -> write
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<Site> {
    let started = Instant::now();
    let mut site = Site::new(config.clone());

    if config.build.clean {
        site.clean_output()?;
    }

    site.read();
    site.generate(&default_generators())?;

    let copied = site.count("static");
    let compiled = site.count("less");
    site.write(quiet)?;

    if !quiet {
        log!(
            "build";
            "{}, {} in {:.2?} -> {}",
            plural_count(copied, "file"),
            plural_count(compiled, "stylesheet"),
            started.elapsed(),
            config.root_relative(&site.dest).display()
        );
    }

    Ok(site)
}
