use chrono::Datelike;
use egui::Color32;
use std::fmt::Write;

use super::page::{PageLayout, PagePlan};

const HEADER_HEIGHT: f32 = 36.0;
const ROW_HEIGHT: f32 = 18.0;
const BAR_INSET: f32 = 3.0;
const LOT_BAR_INSET: f32 = 6.0;

const PAGE_BG: &str = "#ffffff";
const GRID_LINE: &str = "#d8d8d8";
const WEEKEND_FILL: &str = "#f0f0f0";
const TEXT_COLOR: &str = "#222222";
const TEXT_DIM: &str = "#777777";
const DEFAULT_BAR: &str = "#4682b4";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Render one planned page as a standalone SVG document.
///
/// Pure string building: all geometry comes from the page plan and layout,
/// so the output is deterministic for identical inputs.
pub fn render_page(
    layout: &PageLayout,
    plan: &PagePlan,
    title: &str,
    page_no: usize,
    page_count: usize,
) -> String {
    let col = plan.column_width;
    let label_w = plan.surface.label_width;
    let margin = plan.surface.margins / 2.0;
    let grid_x = margin + label_w;
    let grid_w = layout.days.len() as f32 * col;
    let grid_top = margin + HEADER_HEIGHT;
    let body_h = layout.rows.len() as f32 * ROW_HEIGHT;
    let page_w = plan.surface.target_width;
    let page_h = grid_top + body_h + margin + 14.0;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{page_w}" height="{page_h}" viewBox="0 0 {page_w} {page_h}" font-family="Helvetica, Arial, sans-serif">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{page_w}" height="{page_h}" fill="{PAGE_BG}"/>"#
    );

    // Title and page counter
    let _ = writeln!(
        svg,
        r#"<text x="{margin}" y="{y}" font-size="11" fill="{TEXT_COLOR}" font-weight="bold">{}</text>"#,
        escape(title),
        y = margin + 10.0,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="8" fill="{TEXT_DIM}" text-anchor="end">Page {page_no} / {page_count}</text>"#,
        x = page_w - margin,
        y = margin + 10.0,
    );

    // Weekend tinting behind everything else
    for (i, day) in layout.days.iter().enumerate() {
        if day.weekday().num_days_from_monday() >= 5 {
            let x = grid_x + i as f32 * col;
            let _ = writeln!(
                svg,
                r#"<rect x="{x}" y="{grid_top}" width="{col}" height="{body_h}" fill="{WEEKEND_FILL}"/>"#
            );
        }
    }

    // Month band row
    let band_y = margin + 14.0;
    for band in &layout.bands {
        let x = grid_x + band.start_day_index as f32 * col;
        let w = band.day_count as f32 * col;
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{band_y}" width="{w}" height="11" fill="none" stroke="{GRID_LINE}" stroke-width="0.5"/>"#
        );
        if w >= 40.0 {
            let _ = writeln!(
                svg,
                r#"<text x="{cx}" y="{ty}" font-size="7.5" fill="{TEXT_COLOR}" text-anchor="middle">{}</text>"#,
                escape(&band.label),
                cx = x + w / 2.0,
                ty = band_y + 8.0,
            );
        }
    }

    // Day number row
    let day_y = band_y + 11.0;
    for (i, day) in layout.days.iter().enumerate() {
        let x = grid_x + i as f32 * col;
        if col >= 8.0 {
            let _ = writeln!(
                svg,
                r#"<text x="{cx}" y="{ty}" font-size="6" fill="{TEXT_DIM}" text-anchor="middle">{}</text>"#,
                day.day(),
                cx = x + col / 2.0,
                ty = day_y + 8.0,
            );
        }
        let _ = writeln!(
            svg,
            r#"<line x1="{x}" y1="{grid_top}" x2="{x}" y2="{y2}" stroke="{GRID_LINE}" stroke-width="0.5"/>"#,
            y2 = grid_top + body_h,
        );
    }
    let _ = writeln!(
        svg,
        r#"<line x1="{x}" y1="{grid_top}" x2="{x}" y2="{y2}" stroke="{GRID_LINE}" stroke-width="0.5"/>"#,
        x = grid_x + grid_w,
        y2 = grid_top + body_h,
    );

    // Rows: label column text plus bars
    for (i, row) in layout.rows.iter().enumerate() {
        let y = grid_top + i as f32 * ROW_HEIGHT;
        let _ = writeln!(
            svg,
            r#"<line x1="{margin}" y1="{ly}" x2="{x2}" y2="{ly}" stroke="{GRID_LINE}" stroke-width="0.5"/>"#,
            ly = y + ROW_HEIGHT,
            x2 = grid_x + grid_w,
        );

        let (size, weight) = if row.is_lot { (8.0, "bold") } else { (7.0, "normal") };
        let _ = writeln!(
            svg,
            r#"<text x="{tx}" y="{ty}" font-size="{size}" font-weight="{weight}" fill="{TEXT_COLOR}">{}</text>"#,
            escape(&row.title),
            tx = if row.is_lot { margin } else { margin + 8.0 },
            ty = y + ROW_HEIGHT / 2.0 + 2.5,
        );

        if row.position.width <= 0.0 {
            continue;
        }
        let fill = row.accent.map(hex).unwrap_or_else(|| DEFAULT_BAR.to_string());
        let bx = grid_x + row.position.offset;
        let inset = if row.is_lot { LOT_BAR_INSET } else { BAR_INSET };
        let bh = ROW_HEIGHT - inset * 2.0;
        let opacity = if row.is_lot { 0.45 } else { 0.9 };
        let _ = writeln!(
            svg,
            r#"<rect x="{bx}" y="{by}" width="{bw}" height="{bh}" rx="2" fill="{fill}" fill-opacity="{opacity}"/>"#,
            by = y + inset,
            bw = row.position.width,
        );
        if !row.is_lot && row.progress > 0 {
            let pw = row.position.width * (row.progress.min(100) as f32 / 100.0);
            let _ = writeln!(
                svg,
                r##"<rect x="{bx}" y="{by}" width="{pw}" height="{bh}" rx="2" fill="#000000" fill-opacity="0.25"/>"##,
                by = y + inset,
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::page::{layout_page, plan_pages, PageSlice};
    use crate::layout::{generate_day_grid, DateWindow, Orientation, PageFormat};
    use chrono::NaiveDate;

    #[test]
    fn rendered_page_is_wellformed_and_deterministic() {
        let grid = generate_day_grid(DateWindow::new(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        ));
        let plan = plan_pages(grid.len(), PageFormat::A4, Orientation::Landscape);
        let slice = PageSlice {
            first_day: 0,
            day_count: grid.len(),
        };
        let layout = layout_page(slice, &grid, &[], plan.column_width);
        let a = render_page(&layout, &plan, "Villa <Richter>", 1, 1);
        let b = render_page(&layout, &plan, "Villa <Richter>", 1, 1);
        assert_eq!(a, b);
        assert!(a.starts_with("<svg"));
        assert!(a.trim_end().ends_with("</svg>"));
        // Title must be escaped
        assert!(a.contains("Villa &lt;Richter&gt;"));
        assert!(!a.contains("Villa <Richter>"));
    }
}
