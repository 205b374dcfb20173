use std::path::{Component, Path, PathBuf};

use crate::error::{BuildError, Result};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".js"];

/// Maps a `require` specifier to a file on disk, trying each configured
/// extension when the literal path does not exist.
#[derive(Clone, Debug)]
pub struct Resolver {
    extensions: Vec<String>,
}

impl Resolver {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve `specifier` relative to the directory containing `base_path`.
    ///
    /// The literal path wins if it is a file; otherwise the extensions are
    /// appended in configured order and the first existing file is returned.
    pub fn resolve(&self, base_path: &Path, specifier: &str) -> Result<PathBuf> {
        let dir = base_path.parent().unwrap_or(Path::new("/"));
        let candidate = normalize_path(&dir.join(specifier));

        if candidate.is_file() {
            return Ok(candidate);
        }

        for ext in &self.extensions {
            let mut with_ext = candidate.clone().into_os_string();
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            tracing::trace!("trying {}", with_ext.display());
            if with_ext.is_file() {
                return Ok(with_ext);
            }
        }

        Err(BuildError::Resolution {
            specifier: specifier.to_string(),
            attempted: candidate,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

/// Lexically collapse `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
