//! tinypack core: builds a module graph from `require` calls, groups it into
//! one chunk per entry and renders a standalone runtime for each chunk.

pub mod chunk;
pub mod compilation;
pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod hooks;
pub mod loader;
pub mod module_id;
pub mod parser;
pub mod plugin;
pub mod resolver;
pub mod runtime;
pub mod stats;

pub use chunk::Chunk;
pub use compilation::{Compilation, Stats};
pub use compiler::Compiler;
pub use config::{Config, Entry, RawConfig};
pub use error::{BuildError, ConfigError};
pub use graph::{Dependency, Module, ModuleGraph};
pub use hooks::{CompilerHooks, SyncHook};
pub use loader::{Loader, LoaderRegistry, Rule};
pub use module_id::ModuleId;
pub use plugin::Plugin;
pub use resolver::Resolver;
pub use stats::StatsOptions;
