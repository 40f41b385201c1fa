//! Rendering errors.

use mandel_core::ImageFormat;
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result alias used across the chart crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while rendering a chart.
#[derive(Debug, Error)]
pub enum Error {
	/// Writing the output file failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// The drawing backend rejected an operation (font, encoder, file).
	#[error("drawing: {0}")]
	Drawing(String),
	/// The format was not compiled into this build.
	#[error("{0} output is not available in this build")]
	Unsupported(ImageFormat),
	/// Error from the core crate.
	#[error(transparent)]
	Core(#[from] mandel_core::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
	fn from(e: DrawingAreaErrorKind<E>) -> Self { Self::Drawing(e.to_string()) }
}
