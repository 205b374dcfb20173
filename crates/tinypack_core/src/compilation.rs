//! One build generation: module graph, chunks and assets.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use oxc_allocator::Allocator;

use crate::chunk::Chunk;
use crate::config::Config;
use crate::error::{BuildError, Result};
use crate::graph::{Dependency, Module, ModuleGraph};
use crate::loader::run_loaders;
use crate::module_id::ModuleId;
use crate::parser::{parse_program, print_program, require_specifiers, rewrite_require_specifiers};
use crate::resolver::{normalize_path, Resolver};
use crate::runtime::{asset_filename, render_chunk};

/// Everything a finished build produced.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub modules: ModuleGraph,
    pub chunks: Vec<Chunk>,
    /// Output file name -> generated program.
    pub assets: IndexMap<String, String>,
    /// Every path read or resolved during the build, duplicates included.
    pub file_dependencies: Vec<PathBuf>,
}

pub struct Compilation<'c> {
    options: &'c Config,
    resolver: Resolver,
    modules: ModuleGraph,
    chunks: Vec<Chunk>,
    assets: IndexMap<String, String>,
    file_dependencies: Vec<PathBuf>,
}

impl<'c> Compilation<'c> {
    pub fn new(options: &'c Config) -> Self {
        Self {
            options,
            resolver: Resolver::new(options.resolve.extensions.clone()),
            modules: ModuleGraph::new(),
            chunks: Vec::new(),
            assets: IndexMap::new(),
            file_dependencies: Vec::new(),
        }
    }

    /// Build every entry, assemble one chunk per entry and render its asset.
    pub fn build(mut self) -> Result<Stats> {
        for (name, path) in self.options.entry.normalized() {
            let entry_path = normalize_path(&self.options.context.join(&path));
            tracing::info!("building entry {name} ({})", entry_path.display());

            self.file_dependencies.push(entry_path.clone());
            let entry_id = self.build_entry(&name, &entry_path)?;
            self.chunks.push(Chunk::assemble(&name, entry_id, &self.modules));
        }

        for chunk in &self.chunks {
            let filename = asset_filename(&self.options.output.filename, &chunk.name);
            let code = render_chunk(chunk, &self.modules);
            tracing::debug!("emitting {filename} ({} modules)", chunk.modules.len());
            if self.assets.insert(filename.clone(), code).is_some() {
                return Err(BuildError::AssetConflict { filename });
            }
        }

        Ok(Stats {
            modules: self.modules,
            chunks: self.chunks,
            assets: self.assets,
            file_dependencies: self.file_dependencies,
        })
    }

    fn build_entry(&mut self, name: &str, entry_path: &Path) -> Result<ModuleId> {
        let id = ModuleId::from_path(&self.options.context, entry_path);
        if self.modules.contains(&id) {
            // already pulled in by an earlier entry
            self.modules.mark_reachable(&id, name);
            return Ok(id);
        }
        self.build_module(name, entry_path)
    }

    /// Compile the module at `module_path` and, depth first, every module it
    /// requires that is not in the graph yet.
    ///
    /// The module is registered before its dependencies are visited, so a
    /// dependency cycle finds it already present and stops there.
    pub fn build_module(&mut self, name: &str, module_path: &Path) -> Result<ModuleId> {
        let source = std::fs::read_to_string(module_path).map_err(|source| BuildError::Read {
            path: module_path.to_path_buf(),
            source,
        })?;
        let source = run_loaders(&self.options.module.rules, module_path, source);
        let id = ModuleId::from_path(&self.options.context, module_path);
        tracing::debug!("building module {id}");

        let (code, dependencies) = self.compile_source(module_path, &source)?;

        self.modules.add_module(Module {
            id: id.clone(),
            names: IndexSet::from([name.to_string()]),
            dependencies: dependencies.clone(),
            source: code,
        });

        for dependency in &dependencies {
            if self.modules.contains(&dependency.id) {
                self.modules.mark_reachable(&dependency.id, name);
            } else {
                self.build_module(name, &dependency.path)?;
            }
        }

        Ok(id)
    }

    // Parse, resolve each `require` specifier and rewrite it to a module id.
    fn compile_source(&mut self, module_path: &Path, source: &str) -> Result<(String, Vec<Dependency>)> {
        let allocator = Allocator::default();
        let mut program = parse_program(&allocator, source, module_path)?;

        let mut dependencies = Vec::new();
        for specifier in require_specifiers(&program, module_path)? {
            let path = self.resolver.resolve(module_path, &specifier)?;
            self.file_dependencies.push(path.clone());
            let id = ModuleId::from_path(&self.options.context, &path);
            dependencies.push(Dependency { id, path });
        }

        let ids: Vec<String> = dependencies.iter().map(|d| d.id.to_string()).collect();
        rewrite_require_specifiers(&allocator, &mut program, &ids);

        Ok((print_program(&program), dependencies))
    }
}
