use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::module_id::ModuleId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub id: ModuleId,
    pub path: PathBuf,
}

#[derive(Clone, Debug, Serialize)]
pub struct Module {
    pub id: ModuleId,
    /// Entry names this module is reachable from.
    pub names: IndexSet<String>,
    pub dependencies: Vec<Dependency>,
    /// Transformed source with every `require` argument rewritten to an id.
    #[serde(skip)]
    pub source: String,
}

/// All modules of one build, keyed by id in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, Module>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly built module. A second module with the same id is
    /// ignored; ids are only ever built once per graph.
    pub fn add_module(&mut self, module: Module) -> bool {
        if self.modules.contains_key(&module.id) {
            return false;
        }
        self.modules.insert(module.id.clone(), module);
        true
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Add `name` to `id` and to everything reachable from it that does not
    /// carry the name yet. Stops at modules already marked, so cycles end.
    pub fn mark_reachable(&mut self, id: &ModuleId, name: &str) {
        let mut pending = vec![id.clone()];
        while let Some(current) = pending.pop() {
            let Some(module) = self.modules.get_mut(&current) else {
                continue;
            };
            if !module.names.insert(name.to_string()) {
                continue;
            }
            pending.extend(module.dependencies.iter().map(|dep| dep.id.clone()));
        }
    }

    /// Ids of every module reachable from the entry `name`, in graph order.
    pub fn modules_for(&self, name: &str) -> Vec<ModuleId> {
        self.modules
            .values()
            .filter(|m| m.names.contains(name))
            .map(|m| m.id.clone())
            .collect()
    }
}
