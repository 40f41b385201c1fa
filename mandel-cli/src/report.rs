use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use console::style;
use mandel_core::{BenchmarkTable, Messages, Summary};

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Start-of-run banner.
pub fn banner(m: &Messages) -> String {
    format!("\n{}\n{}\n{}\n", style(rule()).dim(), style(m.text("banner-generating")).bold(), style(rule()).dim())
}

/// One row per measurement, in file order.
pub fn measurements_table(table: &BenchmarkTable, m: &Messages) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_header(["table-threads", "table-time", "table-speedup", "table-efficiency"].map(|k| m.text(k)));
    for row in table {
        out.add_row(row.formatted());
    }
    for column in out.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
    out
}

/// The text summary: six values, then the measurement table.
pub fn summary_block(summary: &Summary, table: &BenchmarkTable, m: &Messages) -> String {
    let serial = format!("{:.3}", summary.serial_time);
    let best = format!("{:.3}", summary.best_time);
    let speedup = format!("{:.2}", summary.max_speedup);
    let speedup_threads = summary.max_speedup_threads.to_string();
    let max_threads = summary.max_threads.to_string();
    let efficiency = format!("{:.1}", summary.mean_efficiency_pct);

    let lines = [
        m.text_with("summary-serial-time", &[("time", serial.as_str())]),
        m.text_with("summary-best-time", &[("time", best.as_str())]),
        m.text_with("summary-max-speedup", &[("speedup", speedup.as_str()), ("threads", speedup_threads.as_str())]),
        m.text_with("summary-max-threads", &[("threads", max_threads.as_str())]),
        m.text_with("summary-mean-efficiency", &[("efficiency", efficiency.as_str())]),
    ];

    let mut out = format!("\n{}\n{}\n{}\n\n", style(rule()).dim(), style(m.text("summary-title")).bold(), style(rule()).dim());
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\n{}\n{}\n", style(m.text("summary-measurements")).bold(), measurements_table(table, m)));
    out.push_str(&format!("\n{}\n", style(rule()).dim()));
    out
}
