#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! Chart rendering for Mandelbrot benchmark results.
//!
//! Four figures are produced from one [`mandel_core::BenchmarkTable`]:
//! speedup, execution time, efficiency and a 2×2 panel that combines the
//! three with a data table. All of them go through a single routine driven
//! by a [`ChartSpec`].

pub mod error;
pub mod figure;
pub mod render;
mod table;

pub use error::{Error, Result};
pub use figure::{ChartKind, ChartSpec, Layout, LegendPosition, Metric, Reference, YRange};
pub use render::{ChartRenderer, RenderSettings};
