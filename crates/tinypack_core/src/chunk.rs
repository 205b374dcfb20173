use serde::Serialize;

use crate::graph::{Module, ModuleGraph};
use crate::module_id::ModuleId;

/// One output bundle: an entry module and everything reachable from it.
#[derive(Clone, Debug, Serialize)]
pub struct Chunk {
    pub name: String,
    #[serde(rename = "entry")]
    pub entry_module: ModuleId,
    pub modules: Vec<ModuleId>,
}

impl Chunk {
    /// Collect every module in `graph` that carries `name`.
    pub fn assemble(name: &str, entry_module: ModuleId, graph: &ModuleGraph) -> Self {
        Self {
            name: name.to_string(),
            entry_module,
            modules: graph.modules_for(name),
        }
    }

    pub fn entry<'g>(&self, graph: &'g ModuleGraph) -> Option<&'g Module> {
        graph.get(&self.entry_module)
    }

    pub fn module_records<'g>(&'g self, graph: &'g ModuleGraph) -> impl Iterator<Item = &'g Module> + 'g {
        self.modules.iter().filter_map(move |id| graph.get(id))
    }
}
