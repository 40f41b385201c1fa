//! Run configuration: `mandel.toml`, `MANDEL_*` variables and validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Languages with a bundled message catalog.
pub const SUPPORTED_LANGS: [&str; 2] = ["es", "en"];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const DPI_RANGE: std::ops::RangeInclusive<u32> = 72..=1200;

/// Image encoding of the rendered charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector output; text is left to the viewer's fonts.
    Svg,
    /// Raster output at the configured DPI. Needs the `png` feature.
    #[default]
    Png,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Whether this build can encode the format.
    pub fn is_available(self) -> bool {
        match self {
            Self::Svg => true,
            Self::Png => cfg!(feature = "png"),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(Error::config(format!("unknown image format: {other}"))),
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Benchmark CSV to read.
    pub input: PathBuf,
    /// Directory the charts are written to; created if missing.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { input: crate::loader::DEFAULT_RESULTS_PATH.into(), output_dir: "benchmarks".into() }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image encoding of every chart.
    pub format: ImageFormat,
    /// Pixels per inch; figure sizes are fixed in inches.
    pub dpi: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { format: ImageFormat::Png, dpi: 300 }
    }
}

/// `[cli]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Message catalog, one of [`SUPPORTED_LANGS`].
    pub lang: String,
    /// Default `tracing` level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { lang: "es".into(), log_level: "warn".into() }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandelConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Chart encoding and resolution.
    pub render: RenderConfig,
    /// Language and logging.
    pub cli: CliConfig,
}

impl MandelConfig {
    /// Parse and validate a TOML file. Missing sections keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize as TOML, overwriting `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Overlay `MANDEL_*` variables. Blank values are ignored.
    pub fn apply_env(&mut self) -> Result<()> {
        let var = |name: &str| {
            std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };
        if let Some(v) = var("MANDEL_INPUT") { self.paths.input = v.into(); }
        if let Some(v) = var("MANDEL_OUTPUT_DIR") { self.paths.output_dir = v.into(); }
        if let Some(v) = var("MANDEL_LANG") { self.cli.lang = v; }
        if let Some(v) = var("MANDEL_LOG_LEVEL") { self.cli.log_level = v; }
        if let Some(v) = var("MANDEL_DPI") {
            self.render.dpi = v.parse().map_err(|_| Error::config(format!("invalid MANDEL_DPI: {v}")))?;
        }
        Ok(())
    }

    /// Check log level, language, DPI range and that the image format is
    /// compiled in.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.cli.log_level.as_str()) {
            return Err(Error::config(format!("invalid log_level: {}", self.cli.log_level)));
        }
        if !SUPPORTED_LANGS.contains(&self.cli.lang.as_str()) {
            return Err(Error::config(format!("unsupported lang: {}", self.cli.lang)));
        }
        if !DPI_RANGE.contains(&self.render.dpi) {
            return Err(Error::config(format!(
                "invalid dpi: {} (allowed {}..={})",
                self.render.dpi,
                DPI_RANGE.start(),
                DPI_RANGE.end()
            )));
        }
        if !self.render.format.is_available() {
            return Err(Error::config(format!(
                "{} output requires building with the `png` feature",
                self.render.format
            )));
        }
        Ok(())
    }
}

/// Config file search order: explicit path, `$MANDEL_CONFIG`, `./mandel.toml`.
/// Returns the first candidate that exists.
pub fn discover_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(p) = explicit { candidates.push(p.to_path_buf()); }
    if let Ok(p) = std::env::var("MANDEL_CONFIG") {
        if !p.trim().is_empty() { candidates.push(PathBuf::from(p.trim())); }
    }
    candidates.push(PathBuf::from("mandel.toml"));
    candidates.into_iter().find(|p| p.exists())
}

/// Commented template written by `config write-template`.
pub const TEMPLATE_MANDEL_TOML: &str = r#"# mandel-cli configuration (template)

[paths]
# CSV written by the benchmark driver
input = "benchmarks/results.csv"
# Where the four charts are written
output_dir = "benchmarks"

[render]
# "png" (needs the default `png` feature) or "svg"
format = "png"
dpi = 300

[cli]
# Console and chart language: "es" or "en"
lang = "es"
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "warn"
"#;
