#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, path::Path, process::Command};
use tempfile::tempdir;

const RESULTS: &str = "threads,time,speedup,efficiency
1,8.125,1.0,1.0
2,4.2,1.93,0.965
4,2.3,3.53,0.8825
8,1.6,5.08,0.635
";

const CHARTS: [&str; 4] = ["speedup.png", "execution_time.png", "efficiency.png", "combined_analysis.png"];

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn mandel(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mandel-cli").unwrap();
    cmd.current_dir(dir);
    for var in ["MANDEL_CONFIG", "MANDEL_INPUT", "MANDEL_OUTPUT_DIR", "MANDEL_LANG", "MANDEL_LOG_LEVEL", "MANDEL_DPI", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_results(dir: &Path, csv: &str) {
    fs::create_dir_all(dir.join("benchmarks")).unwrap();
    fs::write(dir.join("benchmarks/results.csv"), csv).unwrap();
}

#[test]
fn missing_input_is_a_soft_stop() {
    let dir = tempdir().unwrap();
    mandel(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: No se encontró el archivo benchmarks/results.csv"))
        .stdout(predicate::str::contains("✓ Todas").not());
    assert!(!dir.path().join("benchmarks").exists());
}

#[test]
fn default_run_writes_four_charts_and_summary() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    mandel(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GENERANDO GRÁFICAS DE ANÁLISIS DE RENDIMIENTO"))
        .stdout(predicate::str::contains("✓ Gráfica de speedup guardada en: benchmarks/speedup.png"))
        .stdout(predicate::str::contains("✓ Gráfica combinada guardada en: benchmarks/combined_analysis.png"))
        .stdout(predicate::str::contains("Tiempo serial (1 hilo):          8.125 segundos"))
        .stdout(predicate::str::contains("Mejor tiempo paralelo:           1.600 segundos"))
        .stdout(predicate::str::contains("Máximo speedup alcanzado:        5.08x (con 8 hilos)"))
        .stdout(predicate::str::contains("Número máximo de hilos probados: 8"))
        .stdout(predicate::str::contains("✓ Todas las gráficas generadas exitosamente"));
    for chart in CHARTS {
        let bytes = fs::read(dir.path().join("benchmarks").join(chart)).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE), "{chart} is not a png");
    }
}

#[test]
fn confirmations_follow_render_order() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    let out = mandel(dir.path()).args(["--dpi", "72"]).output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    let positions: Vec<usize> = CHARTS.iter().map(|c| stdout.find(c).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn single_row_table_renders() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), "threads,time,speedup,efficiency\n1,3.5,1.0,1.0\n");
    mandel(dir.path())
        .args(["--dpi", "72"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eficiencia promedio:             100.0%"));
    for chart in CHARTS {
        assert!(dir.path().join("benchmarks").join(chart).is_file());
    }
}

#[test]
fn flags_override_paths_and_language() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("runs.csv"), RESULTS).unwrap();
    mandel(dir.path())
        .args(["--input", "runs.csv", "--output-dir", "out/charts", "--lang", "en", "--dpi", "72"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RESULTS SUMMARY"))
        .stdout(predicate::str::contains("Serial time (1 thread):"));
    assert!(dir.path().join("out/charts/efficiency.png").is_file());
}

#[test]
fn env_overrides_language() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    mandel(dir.path())
        .env("MANDEL_LANG", "en")
        .env("MANDEL_DPI", "72")
        .assert()
        .success()
        .stdout(predicate::str::contains("All charts generated successfully"));
}

#[test]
fn json_summary_owns_stdout() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    let out = mandel(dir.path()).args(["--format", "json", "--dpi", "72"]).output().unwrap();
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["serial_time"], 8.125);
    assert_eq!(summary["max_speedup_threads"], 8);
    assert_eq!(summary["max_threads"], 8);
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("speedup.png"));
}

#[test]
fn missing_serial_row_fails_after_rendering() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), "threads,time,speedup,efficiency\n2,4.0,1.0,0.5\n4,2.0,2.0,0.5\n");
    mandel(dir.path())
        .args(["--dpi", "72"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no serial measurement"));
    assert!(dir.path().join("benchmarks/combined_analysis.png").is_file());
}

#[test]
fn malformed_csv_fails() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), "threads,time,speedup,efficiency\none,2.0,1.0,1.0\n");
    mandel(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn rerun_overwrites_outputs() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    let chart = dir.path().join("benchmarks/speedup.png");
    mandel(dir.path()).args(["--dpi", "72"]).assert().success();
    let first = fs::read(&chart).unwrap();
    mandel(dir.path()).args(["--dpi", "72"]).assert().success();
    assert_eq!(first, fs::read(&chart).unwrap());
}

#[test]
fn svg_is_opt_in() {
    let dir = tempdir().unwrap();
    write_results(dir.path(), RESULTS);
    mandel(dir.path())
        .args(["--image-format", "svg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchmarks/efficiency.svg"));
    for chart in CHARTS {
        let svg = dir.path().join("benchmarks").join(chart).with_extension("svg");
        assert!(fs::read_to_string(svg).unwrap().contains("<svg"));
        assert!(!dir.path().join("benchmarks").join(chart).exists());
    }
}
