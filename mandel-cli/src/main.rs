#![forbid(unsafe_code)]

//! `mandel-cli`: renders the benchmark charts and prints the run summary.

mod logging;
mod pipeline;
mod report;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mandel_core::{
    config::{discover_config_file, TEMPLATE_MANDEL_TOML},
    ImageFormat, MandelConfig, Messages,
};
use pipeline::SummaryFormat;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mandel-cli",
    version,
    about = "Charts and summary for Mandelbrot benchmark results"
)]
struct Cli {
    /// Benchmark CSV (default: benchmarks/results.csv)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory the charts are written to (default: benchmarks)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Config file (default: $MANDEL_CONFIG, then ./mandel.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Message language: es | en
    #[arg(long)]
    lang: Option<String>,
    /// Summary output
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
    /// Figure resolution
    #[arg(long)]
    dpi: Option<u32>,
    /// Chart encoding: png (default) | svg
    #[arg(long)]
    image_format: Option<ImageFormat>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Config helpers
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
    /// Show the effective config (defaults, file, env and flags merged)
    Show,
    /// Write a mandel.toml template
    WriteTemplate {
        /// Destination path (default: ./mandel.toml)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite if the file exists
        #[arg(long)]
        force: bool,
    },
}

/// defaults -> file -> env -> flags
fn resolve_config(cli: &Cli) -> anyhow::Result<(MandelConfig, Option<PathBuf>)> {
    if let Some(p) = &cli.config {
        if !p.exists() {
            bail!("config file not found: {}", p.display());
        }
    }
    let file = discover_config_file(cli.config.as_deref());
    let mut cfg = match &file {
        Some(p) => MandelConfig::load_from_file(p).with_context(|| format!("failed to load {}", p.display()))?,
        None => MandelConfig::default(),
    };
    cfg.apply_env()?;
    if let Some(v) = &cli.input { cfg.paths.input = v.clone(); }
    if let Some(v) = &cli.output_dir { cfg.paths.output_dir = v.clone(); }
    if let Some(v) = &cli.lang { cfg.cli.lang = v.clone(); }
    if let Some(v) = cli.dpi { cfg.render.dpi = v; }
    if let Some(v) = cli.image_format { cfg.render.format = v; }
    cfg.validate()?;
    Ok((cfg, file))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // writing a template must work even when the current config is broken
    if let Some(Command::Config { action: ConfigCmd::WriteTemplate { path, force } }) = &cli.command {
        let path = path.clone().unwrap_or_else(|| PathBuf::from("mandel.toml"));
        if path.exists() && !force {
            eprintln!("refusing to overwrite existing file: {} (use --force)", path.display());
            std::process::exit(2);
        }
        std::fs::write(&path, TEMPLATE_MANDEL_TOML).with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let (cfg, file) = resolve_config(&cli)?;
    logging::init(&cfg.cli.log_level);
    tracing::debug!(config_file = ?file, "configuration resolved");

    match cli.command {
        Some(Command::Config { action: ConfigCmd::Show }) => {
            let out = json!({
                "config_file": file.map(|p| p.display().to_string()),
                "paths": cfg.paths,
                "render": cfg.render,
                "cli": cfg.cli,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Some(Command::Config { action: ConfigCmd::WriteTemplate { .. } }) => Ok(()),
        None => {
            let messages = Messages::new(&cfg.cli.lang)?;
            pipeline::run(&cfg, &messages, cli.format)
        }
    }
}
