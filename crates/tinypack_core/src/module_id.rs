//! Canonical module identifiers

use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

use crate::resolver::normalize_path;

/// Project-root-relative, forward-slash path of a module, always prefixed
/// with `./` (e.g. `./src/index.js`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn from_path(root: &Path, path: &Path) -> Self {
        let relative = relative_components(&normalize_path(root), &normalize_path(path));
        ModuleId(format!("./{}", relative.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        ModuleId(id.to_string())
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Path segments of `path` relative to `root`, climbing with `..` when `path`
// lives outside of it.
fn relative_components(root: &Path, path: &Path) -> Vec<String> {
    let root: Vec<Component> = root.components().collect();
    let path: Vec<Component> = path.components().collect();

    let common = root
        .iter()
        .zip(path.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments = Vec::new();
    for component in &root[common..] {
        if matches!(component, Component::Normal(_)) {
            segments.push("..".to_string());
        }
    }
    for component in &path[common..] {
        if let Component::Normal(part) = component {
            segments.push(part.to_string_lossy().into_owned());
        }
    }
    segments
}
