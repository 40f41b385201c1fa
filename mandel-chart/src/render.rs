//! Drawing surfaces and the chart routine shared by every figure.

use crate::{
    error::{Error, Result},
    figure::{x_bounds, ChartKind, ChartSpec, Layout, LegendPosition},
    table::draw_table,
};
use mandel_core::{BenchmarkTable, ImageFormat, MandelConfig, Messages};
use plotters::{coord::Shift, prelude::*};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Named so the TrueType lookup resolves a real bold face; an unknown name
/// falls back to the system sans-serif.
pub(crate) const FONT: &str = "DejaVu Sans";

pub(crate) fn font(px: f64) -> FontDesc<'static> {
    (FONT, px).into_font()
}

pub(crate) fn bold(px: f64) -> FontDesc<'static> {
    font(px).style(FontStyle::Bold)
}

/// Surface settings shared by every chart of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Encoding of the written files.
    pub format: ImageFormat,
    /// Pixels per inch.
    pub dpi: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { format: ImageFormat::Png, dpi: 300 }
    }
}

impl RenderSettings {
    /// Take format and DPI from the `[render]` section.
    pub fn from_config(cfg: &MandelConfig) -> Self {
        Self { format: cfg.render.format, dpi: cfg.render.dpi }
    }

    /// Pixel size of a figure given in inches.
    pub fn pixels(&self, (w, h): (f64, f64)) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }
}

/// Font sizes and stroke widths in pixels, derived from point sizes at the
/// configured DPI.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Typography {
    pub title: f64,
    pub label: f64,
    pub tick: f64,
    pub legend: f64,
    pub table: f64,
    pub line: u32,
    pub marker: u32,
    pub dash: f64,
    pub gap: f64,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Typography {
    pub fn new(layout: Layout, dpi: u32) -> Self {
        let px = f64::from(dpi) / 72.0;
        let (title, label, tick, legend) = match layout {
            Layout::Full => (14.0, 12.0, 10.0, 10.0),
            Layout::Compact => (12.0, 10.0, 9.0, 9.0),
        };
        let line = 2.0 * px;
        Self {
            title: title * px,
            label: label * px,
            tick: tick * px,
            legend: legend * px,
            table: 9.0 * px,
            line: line.round().max(1.0) as u32,
            marker: (4.0 * px).round().max(2.0) as u32,
            dash: 3.7 * line,
            gap: 1.6 * line,
            margin: (10.0 * px).round() as u32,
            x_label_area: ((label + tick) * 1.8 * px).round() as u32,
            y_label_area: ((label + tick * 3.0) * 1.6 * px).round() as u32,
        }
    }

    /// Title of the combined panel.
    pub fn suptitle(&self) -> f64 {
        self.title * 16.0 / 12.0
    }
}

/// Renders benchmark charts to files.
///
/// One surface is opened per call and dropped before returning, so calls are
/// independent and may run in any order.
#[derive(Debug)]
pub struct ChartRenderer<'m> {
    messages: &'m Messages,
    settings: RenderSettings,
}

impl<'m> ChartRenderer<'m> {
    /// Renderer drawing its text from `messages`.
    pub fn new(messages: &'m Messages, settings: RenderSettings) -> Self {
        Self { messages, settings }
    }

    /// Format and DPI in use.
    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// `<dir>/<stem>.<ext>` for a chart kind.
    pub fn output_path(&self, dir: &Path, kind: ChartKind) -> PathBuf {
        dir.join(format!("{}.{}", kind.file_stem(), self.settings.format.extension()))
    }

    /// Measured against ideal linear speedup.
    pub fn plot_speedup(&self, table: &BenchmarkTable, out: &Path) -> Result<()> {
        self.render(ChartKind::Speedup, table, out)
    }

    /// Wall-clock time per thread count.
    pub fn plot_execution_time(&self, table: &BenchmarkTable, out: &Path) -> Result<()> {
        self.render(ChartKind::ExecutionTime, table, out)
    }

    /// Efficiency in percent against the 100% line.
    pub fn plot_efficiency(&self, table: &BenchmarkTable, out: &Path) -> Result<()> {
        self.render(ChartKind::Efficiency, table, out)
    }

    /// The three charts plus the data table on one 2×2 figure.
    pub fn plot_combined(&self, table: &BenchmarkTable, out: &Path) -> Result<()> {
        self.render(ChartKind::Combined, table, out)
    }

    /// Draw `kind` and write it to `out`, overwriting any existing file.
    pub fn render(&self, kind: ChartKind, table: &BenchmarkTable, out: &Path) -> Result<()> {
        let size = self.settings.pixels(kind.size_in());
        debug!(?kind, path = %out.display(), width = size.0, height = size.1, "rendering chart");
        match self.settings.format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(out, size).into_drawing_area();
                self.draw(kind, table, &root)?;
                root.present()?;
                Ok(())
            }
            ImageFormat::Png => self.render_png(kind, table, out, size),
        }
    }

    #[cfg(feature = "png")]
    fn render_png(&self, kind: ChartKind, table: &BenchmarkTable, out: &Path, size: (u32, u32)) -> Result<()> {
        let root = BitMapBackend::new(out, size).into_drawing_area();
        self.draw(kind, table, &root)?;
        root.present()?;
        Ok(())
    }

    #[cfg(not(feature = "png"))]
    fn render_png(&self, _kind: ChartKind, _table: &BenchmarkTable, _out: &Path, _size: (u32, u32)) -> Result<()> {
        Err(Error::Unsupported(ImageFormat::Png))
    }

    fn draw<DB: DrawingBackend>(&self, kind: ChartKind, table: &BenchmarkTable, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE)?;
        match kind.spec(self.messages, Layout::Full) {
            Some(spec) => draw_chart(root, &spec, table, &Typography::new(Layout::Full, self.settings.dpi)),
            None => self.draw_combined(root, table),
        }
    }

    /// 2×2 grid: speedup, time, efficiency, then the data table.
    fn draw_combined<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, table: &BenchmarkTable) -> Result<()> {
        let typo = Typography::new(Layout::Compact, self.settings.dpi);
        let title = self.messages.text("title-combined");
        let body = root.titled(&title, bold(typo.suptitle()))?;
        let cells = body.split_evenly((2, 2));
        let panels = [ChartKind::Speedup, ChartKind::ExecutionTime, ChartKind::Efficiency];
        for (cell, kind) in cells.iter().zip(panels) {
            if let Some(spec) = kind.spec(self.messages, Layout::Compact) {
                draw_chart(cell, &spec, table, &typo)?;
            }
        }
        if let Some(cell) = cells.get(panels.len()) {
            draw_table(cell, table, self.messages, &typo)?;
        }
        Ok(())
    }
}

fn threads_label(v: &f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{}", v.round() as i64)
    } else {
        String::new()
    }
}

/// The one drawing routine behind every chart.
pub(crate) fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    table: &BenchmarkTable,
    typo: &Typography,
) -> Result<()> {
    let x = x_bounds(table);
    let y = spec.y_bounds(table);

    let mut chart = ChartBuilder::on(area)
        .caption(&spec.title, bold(typo.title))
        .margin(typo.margin)
        .x_label_area_size(typo.x_label_area)
        .y_label_area_size(typo.y_label_area)
        .build_cartesian_2d(x.clone(), y.clone())?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc.clone())
        .y_desc(spec.y_desc.clone())
        .axis_desc_style(bold(typo.label))
        .label_style(font(typo.tick))
        .x_label_formatter(&threads_label)
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(WHITE)
        .draw()?;

    let legend_len = (typo.legend * 2.0).round() as i32;

    for series in &spec.series {
        let points: Vec<(f64, f64)> = table
            .iter()
            .map(|m| (f64::from(m.threads), series.metric.value(m)))
            .collect();
        let color = series.color;
        let style = color.stroke_width(typo.line);
        let anno = chart.draw_series(LineSeries::new(points.clone(), style))?;
        if let Some(label) = &series.label {
            anno.label(label.as_str())
                .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + legend_len, ly)], style));
        }
        let marker = typo.marker;
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, marker, color.filled())))?;
    }

    if let Some(reference) = &spec.reference {
        let points = reference.line.points(table, &x);
        let style = reference.color.mix(0.7).stroke_width(typo.line);
        let (w, h) = chart.plotting_area().dim_in_pixel();
        let scale = (f64::from(w) / (x.end - x.start), f64::from(h) / (y.end - y.start));
        let dashes = dash_segments(&points, scale, typo.dash, typo.gap);
        let anno = chart.draw_series(dashes.into_iter().map(|seg| PathElement::new(seg, style)))?;
        if let Some(label) = &reference.label {
            anno.label(label.as_str())
                .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + legend_len, ly)], style));
        }
    }

    if let Some(position) = spec.legend {
        let position = match position {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        };
        chart
            .configure_series_labels()
            .position(position)
            .label_font(font(typo.legend))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;
    }
    Ok(())
}

/// Cut a polyline into dashes.
///
/// `scale` converts data units to pixels on each axis so that `dash` and
/// `gap` (in pixels) look the same regardless of the axis ranges. The
/// dash pattern continues across vertices.
pub(crate) fn dash_segments(
    points: &[(f64, f64)],
    scale: (f64, f64),
    dash: f64,
    gap: f64,
) -> Vec<Vec<(f64, f64)>> {
    let period = dash + gap;
    let mut out = Vec::new();
    if !(period > 0.0) || !scale.0.is_finite() || !scale.1.is_finite() {
        return out;
    }
    let mut travelled = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = (((b.0 - a.0) * scale.0).powi(2) + ((b.1 - a.1) * scale.1).powi(2)).sqrt();
        if !(len > 0.0) {
            continue;
        }
        let at = |d: f64| (a.0 + (b.0 - a.0) * d / len, a.1 + (b.1 - a.1) * d / len);
        let mut t = 0.0;
        while t < len {
            let phase = (travelled + t) % period;
            let (on, remaining) = if phase < dash { (true, dash - phase) } else { (false, period - phase) };
            let end = (t + remaining.max(1e-6)).min(len);
            if on {
                out.push(vec![at(t), at(end)]);
            }
            t = end;
        }
        travelled += len;
    }
    out
}
