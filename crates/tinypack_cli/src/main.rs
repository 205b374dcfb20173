use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tinypack_core::{Compiler, LoaderRegistry, RawConfig, StatsOptions};

mod emit;
mod logging;
mod plugin;

#[derive(Parser)]
#[command(name = "tinypack")]
#[command(about = "Bundle CommonJS modules into standalone scripts", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "tinypack.config.json")]
    config: PathBuf,

    /// Print build stats as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = absolute(&cli.config)?;
    let base_dir = config_path.parent().unwrap_or(Path::new("/"));

    let raw = RawConfig::from_file(&config_path)?;
    let config = raw
        .into_config(base_dir, &LoaderRegistry::with_builtins())?
        .with_plugin(plugin::LogPlugin);

    let compiler = Compiler::new(config);
    let output_dir = compiler.options.output.path.clone();
    let stats = compiler.run(|stats| emit::write_assets(&output_dir, &stats.assets))?;

    if cli.json {
        let json = stats.to_json(&StatsOptions::default());
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    Ok(cwd.join(path))
}
