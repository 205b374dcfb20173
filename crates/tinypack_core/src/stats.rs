//! JSON summary of a finished build.

use serde_json::{json, Map, Value};

use crate::compilation::Stats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsOptions {
    pub assets: bool,
    pub chunks: bool,
    pub modules: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            assets: true,
            chunks: true,
            modules: true,
        }
    }
}

impl Stats {
    pub fn to_json(&self, options: &StatsOptions) -> Value {
        let mut out = Map::new();

        if options.assets {
            let assets: Vec<Value> = self
                .assets
                .iter()
                .map(|(name, code)| json!({ "name": name, "size": code.len() }))
                .collect();
            out.insert("assets".into(), Value::Array(assets));
        }
        if options.chunks {
            out.insert("chunks".into(), json!(self.chunks));
        }
        if options.modules {
            let modules: Vec<_> = self.modules.iter().collect();
            out.insert("modules".into(), json!(modules));
        }

        Value::Object(out)
    }
}
