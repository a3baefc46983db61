//! LESS discovery and substitution.
//!
//! Finds every collected static file whose name ends with the configured
//! source extension, drops it from the asset collection, and appends a
//! [`StylesheetTask`] in its place. The write phase then compiles instead
//! of copying, so sources never reach the output tree.
//!
//! ```text
//! before: [index.html, a.less, logo.png, b.less]
//! after:  [index.html, logo.png, Stylesheet(a.less), Stylesheet(b.less)]
//! ```

use super::{Generator, GeneratorError, Priority};
use crate::asset::{Asset, StylesheetOptions, StylesheetTask};
use crate::site::Site;
use crate::utils::path::relative_dir;
use crate::utils::plural_count;
use crate::{debug, log};
use rustc_hash::FxHashSet;

pub struct LessGenerator;

impl Generator for LessGenerator {
    fn name(&self) -> &'static str {
        "less"
    }

    /// Runs after every other generator has added its files.
    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn generate(&self, site: &mut Site) -> Result<(), GeneratorError> {
        let less = &site.config.less;
        let compiler = less.compiler().ok_or(GeneratorError::MissingCompiler)?;

        let options = StylesheetOptions {
            css_dest: less.css_dest().to_string(),
            compiler: compiler.clone(),
            extension: less.extension(),
            strict: less.strict,
        };

        // Scan first, mutate after: removal never affects which entries are checked.
        let mut removed = FxHashSet::default();
        let mut tasks = Vec::new();

        for (index, asset) in site.static_files.iter().enumerate() {
            let Asset::Static(file) = asset else {
                continue;
            };
            if !file.name.ends_with(&options.extension) {
                continue;
            }

            let dir = relative_dir(&file.path(), &site.source);
            debug!("less"; "{}", dir.join(&file.name).display());

            tasks.push(StylesheetTask::new(
                &site.source,
                dir,
                file.name.as_str(),
                options.clone(),
            ));
            removed.insert(index);
        }

        if tasks.is_empty() {
            return Ok(());
        }

        let mut index = 0;
        site.static_files.retain(|_| {
            let keep = !removed.contains(&index);
            index += 1;
            keep
        });

        log!("less"; "{} queued for compilation", plural_count(tasks.len(), "stylesheet"));
        site.static_files
            .extend(tasks.into_iter().map(Asset::from));

        Ok(())
    }
}
