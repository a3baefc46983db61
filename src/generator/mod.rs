//! Generators run between asset collection and output writing.
//!
//! A generator receives the whole [`Site`] and may rewrite its asset
//! collection. Generators run once per build, ordered by [`Priority`].
//!
//! - **less**: swaps `.less` sources for compile tasks

pub mod less;

use crate::site::Site;
use thiserror::Error;

pub use less::LessGenerator;

/// Errors that abort the build during the generate phase.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("`less.lessc` is not set, add e.g. `lessc = \"lessc\"` under [less] in lessgen.toml")]
    MissingCompiler,
}

/// Run order. Higher priorities run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    High,
}

pub trait Generator: Send + Sync {
    /// Short name, used as log prefix.
    fn name(&self) -> &'static str;

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn generate(&self, site: &mut Site) -> Result<(), GeneratorError>;
}

/// Generators enabled for every build.
pub fn default_generators() -> Vec<Box<dyn Generator>> {
    vec![Box::new(LessGenerator)]
}

/// Run `generators` against `site`, highest priority first.
///
/// Generators of equal priority keep their given order. The first error
/// stops the run.
pub fn run_generators(site: &mut Site, generators: &[Box<dyn Generator>]) -> Result<(), GeneratorError> {
    let mut ordered: Vec<&dyn Generator> = generators.iter().map(|g| g.as_ref()).collect();
    ordered.sort_by_key(|g| std::cmp::Reverse(g.priority()));

    for generator in ordered {
        crate::debug!("build"; "running generator `{}`", generator.name());
        generator.generate(site)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, StaticFile};
    use crate::config::SiteConfig;

    /// Appends a marker file so the run order is observable.
    struct Marker(&'static str, Priority);

    impl Generator for Marker {
        fn name(&self) -> &'static str {
            self.0
        }

        fn priority(&self) -> Priority {
            self.1
        }

        fn generate(&self, site: &mut Site) -> Result<(), GeneratorError> {
            site.static_files
                .push(Asset::Static(StaticFile::new("/site", "", self.0)));
            Ok(())
        }
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
        assert_eq!(LessGenerator.priority(), Priority::Low);
    }

    #[test]
    fn test_run_generators_by_priority() {
        let mut site = Site::new(SiteConfig::default());
        let generators: Vec<Box<dyn Generator>> = vec![
            Box::new(Marker("low", Priority::Low)),
            Box::new(Marker("first", Priority::Normal)),
            Box::new(Marker("high", Priority::High)),
            Box::new(Marker("second", Priority::Normal)),
        ];

        run_generators(&mut site, &generators).unwrap();

        let names: Vec<_> = site
            .static_files
            .iter()
            .map(|a| a.relative_path().display().to_string())
            .collect();
        assert_eq!(names, vec!["high", "first", "second", "low"]);
    }

    #[test]
    fn test_missing_compiler_message() {
        let msg = GeneratorError::MissingCompiler.to_string();
        assert!(msg.contains("less.lessc"));
    }
}
