use crate::compilation::{Compilation, Stats};
use crate::config::Config;
use crate::error::BuildError;
use crate::hooks::CompilerHooks;

/// Drives builds for one configuration.
///
/// Every call to [`Compiler::run`] or [`Compiler::compile`] starts from an
/// empty [`Compilation`]; nothing is carried over between builds.
#[derive(Debug)]
pub struct Compiler {
    pub options: Config,
    pub hooks: CompilerHooks,
}

impl Compiler {
    /// Create a compiler and let each configured plugin tap its hooks.
    pub fn new(options: Config) -> Self {
        let mut hooks = CompilerHooks::default();
        for plugin in &options.plugins {
            plugin.apply(&mut hooks);
        }
        Self { options, hooks }
    }

    /// Build once without firing hooks.
    pub fn compile(&self) -> Result<Stats, BuildError> {
        Compilation::new(&self.options).build()
    }

    /// Fire `run`, build, hand the result to `on_compiled` (which typically
    /// writes the assets), then fire `done`.
    ///
    /// `done` only fires when both the build and `on_compiled` succeed.
    pub fn run<F, E>(&self, on_compiled: F) -> Result<Stats, E>
    where
        F: FnOnce(&Stats) -> Result<(), E>,
        E: From<BuildError>,
    {
        self.hooks.run.call(&self.options);

        let stats = self.compile()?;
        tracing::info!(
            "compiled {} modules into {} chunks",
            stats.modules.len(),
            stats.chunks.len()
        );
        on_compiled(&stats)?;

        self.hooks.done.call(&stats);
        Ok(stats)
    }
}
