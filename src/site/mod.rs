//! The per-build site context.
//!
//! A build runs three phases against one [`Site`]:
//!
//! 1. **read** - collect static files from the source tree
//! 2. **generate** - let generators rewrite the asset collection
//! 3. **write** - write every asset into the destination, in parallel

use crate::asset::{Asset, collect_static_files};
use crate::config::SiteConfig;
use crate::generator::{Generator, GeneratorError, run_generators};
use crate::logger::ProgressLine;
use crate::utils::plural_count;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    /// Resolved source root.
    pub source: PathBuf,
    /// Resolved destination root.
    pub dest: PathBuf,
    /// Ordered asset collection, written in the write phase.
    pub static_files: Vec<Asset>,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            source: config.build.source.clone(),
            dest: config.build.output.clone(),
            config,
            static_files: Vec::new(),
        }
    }

    /// Collect static files, replacing any previous collection.
    pub fn read(&mut self) {
        self.static_files = collect_static_files(&self.config)
            .into_iter()
            .map(Asset::from)
            .collect();
        debug!("build"; "collected {} files from {}", self.static_files.len(), self.source.display());
    }

    pub fn generate(&mut self, generators: &[Box<dyn Generator>]) -> Result<(), GeneratorError> {
        run_generators(self, generators)
    }

    /// Number of assets of a kind (`"static"` or `"less"`).
    pub fn count(&self, kind: &str) -> usize {
        self.static_files.iter().filter(|a| a.kind() == kind).count()
    }

    /// Remove the destination directory.
    pub fn clean_output(&self) -> Result<()> {
        if !self.dest.exists() {
            return Ok(());
        }
        if self.source.starts_with(&self.dest) {
            bail!(
                "refusing to clean `{}`: it contains the source directory",
                self.dest.display()
            );
        }
        fs::remove_dir_all(&self.dest)
            .with_context(|| format!("Failed to clean `{}`", self.dest.display()))
    }

    /// Write every asset into the destination.
    ///
    /// All assets are attempted. Each failure is logged, then the build
    /// fails with a summary.
    pub fn write(&self, quiet: bool) -> Result<()> {
        fs::create_dir_all(&self.dest)
            .with_context(|| format!("Failed to create `{}`", self.dest.display()))?;

        let progress = (!quiet).then(|| {
            ProgressLine::new(&[("static", self.count("static")), ("less", self.count("less"))])
        });

        let errors: Vec<(PathBuf, anyhow::Error)> = self
            .static_files
            .par_iter()
            .filter_map(|asset| {
                let result = asset.write(&self.dest);
                if let Some(p) = &progress {
                    p.inc(asset.kind());
                }
                result.err().map(|e| (asset.relative_path(), e.into()))
            })
            .collect();

        if let Some(p) = progress {
            p.finish();
        }

        if errors.is_empty() {
            return Ok(());
        }
        for (path, err) in &errors {
            log!("error"; "{}: {:#}", path.display(), err);
        }
        bail!("failed to write {}", plural_count(errors.len(), "asset"))
    }
}
