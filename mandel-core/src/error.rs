//! Error type shared by the core crate.

use thiserror::Error;

/// Result alias used across the core crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while loading, summarizing or configuring.
#[derive(Debug, Error)]
pub enum Error {
	/// Reading the results or config file failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Malformed CSV: bad header, missing column or non-numeric cell.
	#[error("csv: {0}")]
	Csv(#[from] csv::Error),
	/// Invalid configuration value, file or language.
	#[error("config: {0}")]
	Config(String),
	/// The table has a header but no rows.
	#[error("benchmark table is empty")]
	EmptyTable,
	/// No row was measured with a single thread.
	#[error("no serial measurement (threads == 1) in benchmark table")]
	MissingSerialRow,
}

impl Error {
	/// Build a configuration error from any message.
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
}
