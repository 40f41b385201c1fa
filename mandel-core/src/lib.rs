#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! Core of the Mandelbrot benchmark reporter: the results table, CSV
//! loading, summary statistics, configuration and localized messages.

pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod summary;
pub mod types;

pub use config::{ImageFormat, MandelConfig};
pub use error::{Error, Result};
pub use i18n::Messages;
pub use loader::load_results;
pub use summary::Summary;
pub use types::{BenchmarkTable, Measurement};
