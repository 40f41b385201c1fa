//! Benchmark rows and the table that holds them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io;

/// One benchmark run: how many threads were used and how it performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Parallelism level of the run.
    pub threads: u32,
    /// Wall-clock seconds.
    pub time: f64,
    /// `time(threads = 1) / time(threads = n)`.
    pub speedup: f64,
    /// `speedup / threads`; a fraction, 1.0 is ideal scaling.
    pub efficiency: f64,
}

impl Measurement {
    /// Efficiency expressed as a percentage.
    pub fn efficiency_pct(&self) -> f64 {
        self.efficiency * 100.0
    }

    /// Table cells: thread count, time `{:.3}s`, speedup `{:.2}x`,
    /// efficiency `{:.1}%`.
    pub fn formatted(&self) -> [String; 4] {
        [
            self.threads.to_string(),
            format!("{:.3}s", self.time),
            format!("{:.2}x", self.speedup),
            format!("{:.1}%", self.efficiency_pct()),
        ]
    }
}

/// Benchmark measurements in file order.
///
/// The table is never sorted or deduplicated; consumers see rows exactly as
/// they were written by the benchmark driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    rows: Vec<Measurement>,
}

impl BenchmarkTable {
    /// Wrap already-parsed rows.
    pub fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    /// Parse a header-delimited CSV stream. Columns are matched by name, so
    /// their order in the file does not matter and extra columns are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in rdr.deserialize() {
            let row: Measurement = record?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Rows in stored order.
    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    /// Iterate rows in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` for a header-only file.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Thread counts, as plotted on every x-axis.
    pub fn threads(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| f64::from(r.threads))
    }

    /// The first row measured with a single thread, if any.
    pub fn serial(&self) -> Option<&Measurement> {
        self.rows.iter().find(|r| r.threads == 1)
    }
}

impl<'a> IntoIterator for &'a BenchmarkTable {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
