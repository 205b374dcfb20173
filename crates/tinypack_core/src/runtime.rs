//! Bootstrap code that makes a chunk runnable without a native module system.

use crate::chunk::Chunk;
use crate::graph::ModuleGraph;

pub const NAME_TOKEN: &str = "[name]";

const RUNTIME_PRELUDE: &str = "(() => {\n  var modules = {\n";

// Cache entry is stored before the factory runs so a cyclic require sees the
// partially populated exports instead of recursing.
const RUNTIME_REQUIRE: &str = r#"  };
  var cache = {};
  function require(moduleId) {
    var cachedModule = cache[moduleId];
    if (cachedModule !== undefined) {
      return cachedModule.exports;
    }
    var factory = modules[moduleId];
    if (factory === undefined) {
      throw new Error("Cannot find module '" + moduleId + "'");
    }
    var module = (cache[moduleId] = { exports: {} });
    factory(module, module.exports, require);
    return module.exports;
  }
  var module = { exports: {} };
"#;

const RUNTIME_ENTRY: &str = "  var exports = module.exports;\n  (() => {\n";

const RUNTIME_EPILOGUE: &str = "  })();\n})();\n";

/// Render the self-executing program for `chunk`.
pub fn render_chunk(chunk: &Chunk, graph: &ModuleGraph) -> String {
    let mut out = String::from(RUNTIME_PRELUDE);

    for module in chunk.module_records(graph) {
        out.push_str("    ");
        out.push_str(&quote(module.id.as_str()));
        out.push_str(": (module, exports, require) => {\n");
        push_source(&mut out, &module.source);
        out.push_str("    },\n");
    }

    out.push_str(RUNTIME_REQUIRE);
    let entry = chunk.entry(graph);
    // the inline entry is the cached instance, so requiring it back does not
    // run its factory a second time
    if let Some(entry) = entry {
        out.push_str("  cache[");
        out.push_str(&quote(entry.id.as_str()));
        out.push_str("] = module;\n");
    }
    out.push_str(RUNTIME_ENTRY);
    if let Some(entry) = entry {
        push_source(&mut out, &entry.source);
    }
    out.push_str(RUNTIME_EPILOGUE);
    out
}

/// Substitute every `[name]` token of the output filename template.
pub fn asset_filename(template: &str, chunk_name: &str) -> String {
    template.replace(NAME_TOKEN, chunk_name)
}

fn quote(id: &str) -> String {
    serde_json::Value::String(id.to_string()).to_string()
}

// Module text is copied verbatim, never re-indented.
fn push_source(out: &mut String, source: &str) {
    out.push_str(source);
    if !source.ends_with('\n') {
        out.push('\n');
    }
}
