use crate::report;
use anyhow::{Context, Result};
use clap::ValueEnum;
use mandel_chart::{ChartKind, ChartRenderer, RenderSettings};
use mandel_core::{load_results, MandelConfig, Messages, Summary};
use std::fs;
use tracing::info;

/// How the end-of-run summary is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable block followed by the measurement table.
    #[default]
    Text,
    /// Pretty JSON on stdout; progress lines move to stderr.
    Json,
}

/// Progress lines go to stdout, unless stdout is reserved for JSON.
struct Console {
    format: SummaryFormat,
}

impl Console {
    fn line(&self, s: impl AsRef<str>) {
        match self.format {
            SummaryFormat::Text => println!("{}", s.as_ref()),
            SummaryFormat::Json => eprintln!("{}", s.as_ref()),
        }
    }
}

/// Load, render the four charts, summarize.
///
/// A missing results file prints a message and returns `Ok(())` without
/// touching the output directory.
pub fn run(cfg: &MandelConfig, messages: &Messages, format: SummaryFormat) -> Result<()> {
    let console = Console { format };
    console.line(report::banner(messages));

    let input = &cfg.paths.input;
    let Some(table) = load_results(input).with_context(|| format!("failed to load {}", input.display()))? else {
        let shown = input.display().to_string();
        console.line(messages.text_with("error-not-found", &[("path", shown.as_str())]));
        return Ok(());
    };
    info!(rows = table.len(), "benchmark results loaded");

    let dir = &cfg.paths.output_dir;
    fs::create_dir_all(dir).with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let renderer = ChartRenderer::new(messages, RenderSettings::from_config(cfg));
    for kind in ChartKind::ALL {
        let path = renderer.output_path(dir, kind);
        renderer
            .render(kind, &table, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
        let shown = path.display().to_string();
        console.line(messages.text_with(kind.saved_key(), &[("path", shown.as_str())]));
    }
    info!(dir = %dir.display(), "charts written");

    let summary = Summary::compute(&table)?;
    match format {
        SummaryFormat::Text => console.line(report::summary_block(&summary, &table, messages)),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    console.line(format!("{}\n", messages.text("all-done")));
    Ok(())
}
