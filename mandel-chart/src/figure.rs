//! Declarative description of a chart.
//!
//! Every chart the renderer produces is one [`ChartSpec`] fed through the
//! same drawing routine; the combined panel reuses the specs in their
//! [`Layout::Compact`] form.

use mandel_core::{BenchmarkTable, Measurement, Messages};
use plotters::style::RGBColor;
use std::ops::Range;

/// Measured speedup; also the data-table header fill.
pub const SPEEDUP_COLOR: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
/// Ideal reference lines.
pub const IDEAL_COLOR: RGBColor = RGBColor(0xA2, 0x3B, 0x72);
/// Execution time.
pub const TIME_COLOR: RGBColor = RGBColor(0xF1, 0x8F, 0x01);
/// Efficiency.
pub const EFFICIENCY_COLOR: RGBColor = RGBColor(0x06, 0xA7, 0x7D);

/// Which chart to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// `speedup.<ext>`
    Speedup,
    /// `execution_time.<ext>`
    ExecutionTime,
    /// `efficiency.<ext>`
    Efficiency,
    /// `combined_analysis.<ext>`, the 2×2 panel.
    Combined,
}

impl ChartKind {
    /// Rendering order of a full run.
    pub const ALL: [ChartKind; 4] = [Self::Speedup, Self::ExecutionTime, Self::Efficiency, Self::Combined];

    /// Output file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Speedup => "speedup",
            Self::ExecutionTime => "execution_time",
            Self::Efficiency => "efficiency",
            Self::Combined => "combined_analysis",
        }
    }

    /// Message key of the "chart saved" confirmation.
    pub fn saved_key(self) -> &'static str {
        match self {
            Self::Speedup => "saved-speedup",
            Self::ExecutionTime => "saved-execution-time",
            Self::Efficiency => "saved-efficiency",
            Self::Combined => "saved-combined",
        }
    }

    /// Figure size in inches.
    pub fn size_in(self) -> (f64, f64) {
        match self {
            Self::Combined => (14.0, 10.0),
            _ => (10.0, 6.0),
        }
    }

    /// Spec of a single-axes chart; `None` for the combined panel.
    pub fn spec(self, messages: &Messages, layout: Layout) -> Option<ChartSpec> {
        match self {
            Self::Speedup => Some(ChartSpec::speedup(messages, layout)),
            Self::ExecutionTime => Some(ChartSpec::execution_time(messages, layout)),
            Self::Efficiency => Some(ChartSpec::efficiency(messages, layout)),
            Self::Combined => None,
        }
    }
}

/// Standalone figure or a cell of the combined panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 10×6 in figure with full titles.
    Full,
    /// Panel cell: smaller fonts, short labels.
    Compact,
}

/// Column plotted on the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// `speedup` column.
    Speedup,
    /// `time` column, in seconds.
    Time,
    /// `efficiency` column ×100.
    EfficiencyPercent,
}

impl Metric {
    /// Value of this metric for one row.
    pub fn value(self, m: &Measurement) -> f64 {
        match self {
            Self::Speedup => m.speedup,
            Self::Time => m.time,
            Self::EfficiencyPercent => m.efficiency_pct(),
        }
    }
}

/// Ideal-scaling line drawn for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference {
    /// y = threads, evaluated at each measured thread count.
    Linear,
    /// Horizontal line across the whole x-axis.
    Constant(f64),
}

impl Reference {
    /// Polyline of the reference in data coordinates.
    pub fn points(self, table: &BenchmarkTable, x: &Range<f64>) -> Vec<(f64, f64)> {
        match self {
            Self::Linear => table.threads().map(|t| (t, t)).collect(),
            Self::Constant(y) => vec![(x.start, y), (x.end, y)],
        }
    }
}

/// Y-axis extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YRange {
    /// From zero (or the smallest negative value) to 10% above the largest value.
    Auto,
    /// Fixed `lo..hi`.
    Fixed(f64, f64),
}

/// Corner the legend box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Top-left corner.
    UpperLeft,
    /// Bottom-left corner.
    LowerLeft,
}

/// One measured line with circle markers.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    /// Column on the y-axis.
    pub metric: Metric,
    /// Legend entry; `None` keeps the series out of the legend.
    pub label: Option<String>,
    /// Line and marker color.
    pub color: RGBColor,
}

/// Dashed comparison line.
#[derive(Debug, Clone)]
pub struct ReferenceSpec {
    /// Shape of the line.
    pub line: Reference,
    /// Legend entry.
    pub label: Option<String>,
    /// Stroke color, drawn at 70% opacity.
    pub color: RGBColor,
}

/// Everything that differs between charts.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Bold caption above the plot.
    pub title: String,
    /// X-axis label.
    pub x_desc: String,
    /// Y-axis label.
    pub y_desc: String,
    /// Measured lines, drawn in order.
    pub series: Vec<SeriesSpec>,
    /// Optional ideal line.
    pub reference: Option<ReferenceSpec>,
    /// Y-axis extent.
    pub y_range: YRange,
    /// Legend placement; `None` draws no legend.
    pub legend: Option<LegendPosition>,
}

impl ChartSpec {
    /// Measured speedup against ideal linear speedup.
    pub fn speedup(m: &Messages, layout: Layout) -> Self {
        let (title, ideal) = match layout {
            Layout::Full => ("title-speedup", "legend-speedup-ideal"),
            Layout::Compact => ("panel-speedup", "legend-speedup-ideal-short"),
        };
        Self {
            title: m.text(title),
            x_desc: m.text("axis-threads"),
            y_desc: m.text("axis-speedup"),
            series: vec![SeriesSpec {
                metric: Metric::Speedup,
                label: Some(m.text("legend-speedup-real")),
                color: SPEEDUP_COLOR,
            }],
            reference: Some(ReferenceSpec { line: Reference::Linear, label: Some(m.text(ideal)), color: IDEAL_COLOR }),
            y_range: YRange::Auto,
            legend: Some(LegendPosition::UpperLeft),
        }
    }

    /// Wall-clock time per thread count; no reference, no legend.
    pub fn execution_time(m: &Messages, layout: Layout) -> Self {
        let (title, y_desc) = match layout {
            Layout::Full => ("title-execution-time", "axis-time"),
            Layout::Compact => ("panel-execution-time", "axis-time-short"),
        };
        Self {
            title: m.text(title),
            x_desc: m.text("axis-threads"),
            y_desc: m.text(y_desc),
            series: vec![SeriesSpec { metric: Metric::Time, label: None, color: TIME_COLOR }],
            reference: None,
            y_range: YRange::Auto,
            legend: None,
        }
    }

    /// Efficiency in percent against the constant 100% line, y fixed to [0, 110].
    pub fn efficiency(m: &Messages, layout: Layout) -> Self {
        let (title, ideal) = match layout {
            Layout::Full => ("title-efficiency", "legend-efficiency-ideal"),
            Layout::Compact => ("panel-efficiency", "legend-ideal"),
        };
        Self {
            title: m.text(title),
            x_desc: m.text("axis-threads"),
            y_desc: m.text("axis-efficiency"),
            series: vec![SeriesSpec { metric: Metric::EfficiencyPercent, label: None, color: EFFICIENCY_COLOR }],
            reference: Some(ReferenceSpec {
                line: Reference::Constant(100.0),
                label: Some(m.text(ideal)),
                color: IDEAL_COLOR,
            }),
            y_range: YRange::Fixed(0.0, 110.0),
            legend: Some(LegendPosition::LowerLeft),
        }
    }

    /// Y-axis range covering every series and the reference line.
    pub fn y_bounds(&self, table: &BenchmarkTable) -> Range<f64> {
        if let YRange::Fixed(lo, hi) = self.y_range {
            return lo..hi;
        }
        let mut values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| table.iter().map(move |m| s.metric.value(m)))
            .collect();
        if let Some(r) = &self.reference {
            match r.line {
                Reference::Linear => values.extend(table.threads()),
                Reference::Constant(y) => values.push(y),
            }
        }
        let finite = values.into_iter().filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((0.0f64, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if hi <= lo {
            return lo..lo + 1.0;
        }
        lo..hi * 1.1
    }
}

/// X-axis range over the measured thread counts, padded by 5% on each side.
/// A single distinct thread count is widened to ±1 so the axis keeps a span.
pub fn x_bounds(table: &BenchmarkTable) -> Range<f64> {
    let (lo, hi) = table
        .threads()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo < f64::EPSILON {
        return lo - 1.0..hi + 1.0;
    }
    let pad = (hi - lo) * 0.05;
    lo - pad..hi + pad
}
