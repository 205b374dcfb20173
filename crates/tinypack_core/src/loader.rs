//! Source transforms applied to a module before it is parsed.
//!
//! Every [`Rule`] whose pattern matches a module path contributes its loaders,
//! in order, to one list. That list then runs right-to-left: for `[a, b]` the
//! module source becomes `a(b(source))`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use crate::error::ConfigError;

type LoaderFn = dyn Fn(&str) -> String + Send + Sync;

/// A named, pure text-to-text transform.
#[derive(Clone)]
pub struct Loader {
    name: String,
    func: Arc<LoaderFn>,
}

impl Loader {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, source: &str) -> String {
        (self.func)(source)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Loader").field(&self.name).finish()
    }
}

#[derive(Clone, Debug)]
pub struct Rule {
    pub test: Regex,
    pub use_loaders: Vec<Loader>,
}

impl Rule {
    pub fn new(pattern: &str, use_loaders: Vec<Loader>) -> Result<Self, ConfigError> {
        let test = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { test, use_loaders })
    }

    pub fn matches(&self, path: &Path) -> bool {
        // patterns are written with `/` on every platform
        self.test.is_match(&path.to_string_lossy().replace('\\', "/"))
    }
}

/// Collect the loaders of every matching rule, in rule order.
pub fn matching_loaders<'r>(rules: &'r [Rule], path: &Path) -> Vec<&'r Loader> {
    rules
        .iter()
        .filter(|rule| rule.matches(path))
        .flat_map(|rule| rule.use_loaders.iter())
        .collect()
}

/// Run the loader pipeline for `path` over `source`.
pub fn run_loaders(rules: &[Rule], path: &Path, source: String) -> String {
    let loaders = matching_loaders(rules, path);
    if loaders.is_empty() {
        return source;
    }

    tracing::debug!(
        "loaders for {}: {:?}",
        path.display(),
        loaders.iter().map(|l| l.name()).collect::<Vec<_>>()
    );

    loaders
        .into_iter()
        .rev()
        .fold(source, |code, loader| loader.run(&code))
}

/// Loaders addressable by name from a JSON configuration.
#[derive(Clone, Debug, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Loader>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with `json`, `raw` and `strip-bom`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Loader::new("json", json_loader));
        registry.register(Loader::new("raw", raw_loader));
        registry.register(Loader::new("strip-bom", |source: &str| {
            source.strip_prefix('\u{feff}').unwrap_or(source).to_string()
        }));
        registry
    }

    pub fn register(&mut self, loader: Loader) {
        self.loaders.insert(loader.name.clone(), loader);
    }

    pub fn get(&self, name: &str) -> Result<Loader, ConfigError> {
        self.loaders
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownLoader(name.to_string()))
    }
}

// Invalid JSON is passed through as-is so the parser reports it against the
// module path.
fn json_loader(source: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(source) {
        Ok(value) => format!("module.exports = {value};"),
        Err(_) => source.to_string(),
    }
}

fn raw_loader(source: &str) -> String {
    let quoted = serde_json::Value::String(source.to_string());
    format!("module.exports = {quoted};")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(tag: &'static str) -> Loader {
        Loader::new(tag, move |source: &str| format!("{source}//{tag}"))
    }

    #[test]
    fn test_rule_matches_forward_slash_path() {
        let rule = Rule::new(r"src/.*\.js$", vec![suffix("t")]).unwrap();
        assert!(rule.matches(Path::new(r"C:\proj\src\lib\a.js")));
        assert!(rule.matches(Path::new("/proj/src/lib/a.js")));
        assert!(!rule.matches(Path::new("/proj/test/a.js")));
    }

    #[test]
    fn test_loaders_run_right_to_left() {
        let rules = vec![Rule::new(r"\.js$", vec![suffix("t1"), suffix("t2")]).unwrap()];
        let out = run_loaders(&rules, Path::new("/p/a.js"), "x".to_string());
        assert_eq!(out, "x//t2//t1");
    }

    #[test]
    fn test_rules_accumulate_in_order() {
        let rules = vec![
            Rule::new(r"\.js$", vec![suffix("first")]).unwrap(),
            Rule::new(r"src", vec![suffix("second")]).unwrap(),
            Rule::new(r"\.css$", vec![suffix("never")]).unwrap(),
        ];
        let out = run_loaders(&rules, Path::new("/p/src/a.js"), "x".to_string());
        assert_eq!(out, "x//second//first");
    }

    #[test]
    fn test_no_match_passes_through() {
        let rules = vec![Rule::new(r"\.ts$", vec![suffix("ts")]).unwrap()];
        let out = run_loaders(&rules, Path::new("/p/a.js"), "same".to_string());
        assert_eq!(out, "same");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new("(", Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_builtin_loaders() {
        let registry = LoaderRegistry::with_builtins();
        let json = registry.get("json").unwrap();
        assert_eq!(json.run(r#"{ "a": 1 }"#), r#"module.exports = {"a":1};"#);

        let raw = registry.get("raw").unwrap();
        assert_eq!(raw.run("say \"hi\""), r#"module.exports = "say \"hi\"";"#);

        let bom = registry.get("strip-bom").unwrap();
        assert_eq!(bom.run("\u{feff}var a;"), "var a;");

        assert!(matches!(
            registry.get("sass"),
            Err(ConfigError::UnknownLoader(name)) if name == "sass"
        ));
    }
}
