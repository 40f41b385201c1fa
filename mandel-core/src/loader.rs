//! Reading the results CSV from disk.

use crate::{error::Result, types::BenchmarkTable};
use std::{fs::File, io::BufReader, path::Path};
use tracing::{debug, warn};

/// Default location of the benchmark driver's output, relative to the
/// working directory.
pub const DEFAULT_RESULTS_PATH: &str = "benchmarks/results.csv";

/// Load benchmark results from `path`.
///
/// A missing file is not an error: it yields `Ok(None)` so the caller can
/// stop without producing anything. Parse failures are returned as errors.
pub fn load_results(path: impl AsRef<Path>) -> Result<Option<BenchmarkTable>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "results file not found");
        return Ok(None);
    }
    let file = File::open(path)?;
    let table = BenchmarkTable::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), rows = table.len(), "loaded benchmark results");
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let out = load_results(dir.path().join("nope.csv")).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn present_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "threads,time,speedup,efficiency\n1,2.0,1.0,1.0\n2,1.1,1.82,0.91\n").unwrap();
        let table = load_results(&path).unwrap().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn malformed_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "threads,time,speedup,efficiency\nx,y,z,w\n").unwrap();
        assert!(load_results(&path).is_err());
    }
}
