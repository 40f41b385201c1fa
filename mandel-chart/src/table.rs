use crate::{
    error::Result,
    figure::SPEEDUP_COLOR,
    render::{bold, font, Typography},
};
use mandel_core::{BenchmarkTable, Messages};
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

const STRIPE: RGBColor = RGBColor(0xF0, 0xF0, 0xF0);

/// Relative column widths: threads, time, speedup, efficiency.
const COL_WIDTHS: [f64; 4] = [0.2, 0.25, 0.25, 0.3];

/// Pixel rectangle of one table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CellRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CellRect {
    fn center(&self) -> (i32, i32) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }
}

/// Lay out `rows` data rows plus a header inside an area of `dim` pixels.
/// The table takes 90% of the width and is centered; rows are twice the
/// font height unless that would overflow the area.
pub(crate) fn layout(dim: (u32, u32), rows: usize, font_px: f64) -> Vec<[CellRect; 4]> {
    let (w, h) = (f64::from(dim.0), f64::from(dim.1));
    let n = rows + 1;
    let row_h = (font_px * 2.4).min(h * 0.9 / n as f64);
    let table_w = w * 0.9;
    let x_start = (w - table_w) / 2.0;
    let y_start = (h - row_h * n as f64) / 2.0;

    (0..n)
        .map(|r| {
            let y0 = y_start + row_h * r as f64;
            let mut x = x_start;
            COL_WIDTHS.map(|frac| {
                let x0 = x;
                x += table_w * frac;
                CellRect { x0: x0.round() as i32, y0: y0.round() as i32, x1: x.round() as i32, y1: (y0 + row_h).round() as i32 }
            })
        })
        .collect()
}

/// Header fill, or the alternating shading of data row `row` (1-based).
fn row_fill(row: usize) -> RGBColor {
    match row {
        0 => SPEEDUP_COLOR,
        r if r % 2 == 0 => STRIPE,
        _ => WHITE,
    }
}

/// Fourth cell of the combined panel: one line per measurement.
pub(crate) fn draw_table<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &BenchmarkTable,
    messages: &Messages,
    typo: &Typography,
) -> Result<()> {
    let header = ["table-threads", "table-time", "table-speedup", "table-efficiency"].map(|k| messages.text(k));
    let body: Vec<[String; 4]> = table.iter().map(|m| m.formatted()).collect();
    let cells = layout(area.dim_in_pixel(), body.len(), typo.table);

    let header_style = bold(typo.table).color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center));
    let body_style = font(typo.table).color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center));

    for (r, (rects, texts)) in cells.iter().zip(std::iter::once(&header).chain(body.iter())).enumerate() {
        let style = if r == 0 { &header_style } else { &body_style };
        for (rect, text) in rects.iter().zip(texts.iter()) {
            let corners = [(rect.x0, rect.y0), (rect.x1, rect.y1)];
            area.draw(&Rectangle::new(corners, row_fill(r).filled()))?;
            area.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;
            area.draw(&Text::new(text.as_str(), rect.center(), style.clone()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_centered_and_contiguous() {
        let rows = layout((1000, 800), 3, 20.0);
        assert_eq!(rows.len(), 4);
        let first = rows[0];
        assert_eq!(first[0].x0, 50);
        assert_eq!(first[3].x1, 950);
        for pair in first.windows(2) {
            assert_eq!(pair[0].x1, pair[1].x0);
        }
        assert_eq!(rows[1][0].y0, first[0].y1);
        let top = first[0].y0;
        let bottom = rows[3][0].y1;
        assert!((top - (800 - bottom)).abs() <= 1);
    }

    #[test]
    fn rows_shrink_to_fit_area() {
        let rows = layout((400, 100), 20, 20.0);
        let last = rows.last().unwrap();
        assert!(last[0].y1 <= 100);
        assert!(rows[0][0].y0 >= 0);
    }

    #[test]
    fn header_and_stripes() {
        assert_eq!(row_fill(0), SPEEDUP_COLOR);
        assert_eq!(row_fill(1), WHITE);
        assert_eq!(row_fill(2), STRIPE);
    }
}
