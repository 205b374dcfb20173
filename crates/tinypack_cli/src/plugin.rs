use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use tinypack_core::{CompilerHooks, Plugin};

/// Logs the start and end of every build.
pub struct LogPlugin;

impl Plugin for LogPlugin {
    fn apply(&self, hooks: &mut CompilerHooks) {
        let started = Rc::new(Cell::new(None));

        let start = Rc::clone(&started);
        hooks.run.tap("LogPlugin", move |config| {
            start.set(Some(Instant::now()));
            tracing::info!("build started in {}", config.context.display());
        });

        hooks.done.tap("LogPlugin", move |stats| {
            let elapsed = started.get().map(|t| t.elapsed()).unwrap_or_default();
            tracing::info!(
                "build finished: {} modules, {} assets in {:?}",
                stats.modules.len(),
                stats.assets.len(),
                elapsed
            );
        });
    }
}
