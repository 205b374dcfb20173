use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

/// Write every asset under `dir`, creating directories as needed.
pub fn write_assets(dir: &Path, assets: &IndexMap<String, String>) -> Result<()> {
    for (filename, code) in assets {
        let path = dir.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, code).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("emitted {} ({} bytes)", path.display(), code.len());
    }
    Ok(())
}
