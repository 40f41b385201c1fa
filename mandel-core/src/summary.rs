//! End-of-run statistics.

use crate::{
    error::{Error, Result},
    types::BenchmarkTable,
};
use serde::Serialize;

/// Scalar statistics reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Largest thread count measured.
    pub max_threads: u32,
    /// Largest speedup measured.
    pub max_speedup: f64,
    /// Thread count of the first row reaching `max_speedup`.
    pub max_speedup_threads: u32,
    /// Time of the single-thread run.
    pub serial_time: f64,
    /// Fastest time across all runs.
    pub best_time: f64,
    /// Mean efficiency, as a percentage.
    pub mean_efficiency_pct: f64,
}

impl Summary {
    /// Aggregate a table.
    ///
    /// Fails on an empty table and when no row has `threads == 1`.
    pub fn compute(table: &BenchmarkTable) -> Result<Self> {
        let rows = table.rows();
        let first = rows.first().ok_or(Error::EmptyTable)?;
        let serial = table.serial().ok_or(Error::MissingSerialRow)?;

        let mut max_threads = first.threads;
        let mut best = first;
        let mut best_time = first.time;
        let mut efficiency_sum = 0.0;
        for row in rows {
            max_threads = max_threads.max(row.threads);
            // strict comparison: ties keep the earliest row
            if row.speedup > best.speedup {
                best = row;
            }
            best_time = best_time.min(row.time);
            efficiency_sum += row.efficiency;
        }

        Ok(Self {
            max_threads,
            max_speedup: best.speedup,
            max_speedup_threads: best.threads,
            serial_time: serial.time,
            best_time,
            mean_efficiency_pct: efficiency_sum / rows.len() as f64 * 100.0,
        })
    }
}
