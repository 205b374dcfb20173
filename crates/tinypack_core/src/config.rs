//! Build configuration.
//!
//! [`Config`] is what the compiler consumes. [`RawConfig`] is its JSON file
//! form, where loaders are referenced by name and resolved through a
//! [`LoaderRegistry`].

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::loader::{LoaderRegistry, Rule};
use crate::plugin::Plugin;
use crate::resolver::{normalize_path, DEFAULT_EXTENSIONS};

pub const DEFAULT_ENTRY_NAME: &str = "main";
pub const DEFAULT_FILENAME: &str = "[name].js";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Either a single entry path or named entries.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(String),
    Named(IndexMap<String, String>),
}

impl Entry {
    /// Entries in declaration order; a single path is named `main`.
    pub fn normalized(&self) -> Vec<(String, String)> {
        match self {
            Entry::Single(path) => vec![(DEFAULT_ENTRY_NAME.to_string(), path.clone())],
            Entry::Named(entries) => entries
                .iter()
                .map(|(name, path)| (name.clone(), path.clone()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// Absolute directory the CLI writes assets into.
    pub path: PathBuf,
    /// File name template; `[name]` becomes the chunk name.
    pub filename: String,
}

#[derive(Clone, Debug, Default)]
pub struct ModuleOptions {
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    pub extensions: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

pub struct Config {
    /// Project root. Module ids and entry paths are relative to it.
    pub context: PathBuf,
    pub entry: Entry,
    pub output: OutputOptions,
    pub module: ModuleOptions,
    pub resolve: ResolveOptions,
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl Config {
    pub fn new(context: impl Into<PathBuf>, entry: Entry) -> Self {
        let context = normalize_path(&context.into());
        let output = OutputOptions {
            path: context.join(DEFAULT_OUTPUT_DIR),
            filename: DEFAULT_FILENAME.to_string(),
        };
        Self {
            context,
            entry,
            output,
            module: ModuleOptions::default(),
            resolve: ResolveOptions::default(),
            plugins: Vec::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.output.filename = filename.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = self.context.join(path.into());
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.module.rules.push(rule);
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolve.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("context", &self.context)
            .field("entry", &self.entry)
            .field("output", &self.output)
            .field("module", &self.module)
            .field("resolve", &self.resolve)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub context: Option<PathBuf>,
    pub entry: Entry,
    #[serde(default)]
    pub output: RawOutput,
    #[serde(default)]
    pub module: RawModule,
    #[serde(default)]
    pub resolve: RawResolve,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOutput {
    pub path: Option<PathBuf>,
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawModule {
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
pub struct RawRule {
    pub test: String,
    #[serde(rename = "use", default)]
    pub use_loaders: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawResolve {
    pub extensions: Option<Vec<String>>,
}

impl RawConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Resolve relative paths against `base_dir` and loader names against
    /// `loaders`.
    pub fn into_config(self, base_dir: &Path, loaders: &LoaderRegistry) -> Result<Config, ConfigError> {
        let context = match self.context {
            Some(context) => base_dir.join(context),
            None => base_dir.to_path_buf(),
        };
        let mut config = Config::new(context, self.entry);

        if let Some(path) = self.output.path {
            config = config.with_output_path(path);
        }
        if let Some(filename) = self.output.filename {
            config = config.with_filename(filename);
        }
        if let Some(extensions) = self.resolve.extensions {
            config = config.with_extensions(extensions);
        }

        for raw in self.module.rules {
            let use_loaders = raw
                .use_loaders
                .iter()
                .map(|name| loaders.get(name))
                .collect::<Result<Vec<_>, _>>()?;
            config = config.with_rule(Rule::new(&raw.test, use_loaders)?);
        }

        Ok(config)
    }
}
