use chrono::NaiveDate;
use egui::Color32;

use crate::layout::{
    aggregate_month_bands, compute_column_width, map_range_position, map_task_position,
    LotSection, MonthBand, Orientation, PageFormat, Surface, TaskPosition,
};

/// One page's slice of the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub first_day: usize,
    pub day_count: usize,
}

/// The pagination of a full day grid onto a fixed page format.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub surface: Surface,
    pub column_width: f32,
    pub days_per_page: usize,
    pub slices: Vec<PageSlice>,
}

/// Slice the day grid into pages for the chosen paper.
///
/// The column width is derived from the whole grid first; when the clamp
/// floor keeps columns wider than one page can hold, the overflow becomes
/// additional pages. Every day lands on exactly one page.
pub fn plan_pages(grid_len: usize, format: PageFormat, orientation: Orientation) -> PagePlan {
    let surface = Surface::page(format, orientation);
    let column_width = compute_column_width(grid_len, &surface);
    let days_per_page = ((surface.available_width() / column_width).floor() as usize).max(1);

    let mut slices = Vec::new();
    let mut first_day = 0;
    while first_day < grid_len {
        let day_count = days_per_page.min(grid_len - first_day);
        slices.push(PageSlice {
            first_day,
            day_count,
        });
        first_day += day_count;
    }

    PagePlan {
        surface,
        column_width,
        days_per_page,
        slices,
    }
}

/// One positioned row on an export page.
#[derive(Debug, Clone)]
pub struct PageRow {
    pub title: String,
    pub accent: Option<Color32>,
    /// Lot banner rows render differently from task bars.
    pub is_lot: bool,
    pub progress: u8,
    pub position: TaskPosition,
}

/// Everything the page renderer needs for one page: its sub-grid, month
/// bands, and positioned rows.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub days: Vec<NaiveDate>,
    pub bands: Vec<MonthBand>,
    pub rows: Vec<PageRow>,
}

/// Lay out one page: month bands over the page's sub-grid, then a lot
/// banner row followed by its task rows, for every lot. Positions come from
/// the same mapper the interactive chart uses, so bars spilling over a page
/// break clamp to the page edge.
pub fn layout_page(
    slice: PageSlice,
    grid: &[NaiveDate],
    sections: &[LotSection],
    column_width: f32,
) -> PageLayout {
    let days = grid[slice.first_day..slice.first_day + slice.day_count].to_vec();
    let bands = aggregate_month_bands(&days);

    let mut rows = Vec::new();
    for section in sections {
        rows.push(PageRow {
            title: section.lot.title.clone(),
            accent: section.lot.accent,
            is_lot: true,
            progress: 0,
            position: map_range_position(section.range, &days, column_width),
        });
        for task in &section.tasks {
            if task.is_header {
                continue;
            }
            rows.push(PageRow {
                title: task.title.clone(),
                accent: section.lot.accent,
                is_lot: false,
                progress: task.progress,
                position: map_task_position(task, &days, column_width),
            });
        }
    }

    PageLayout { days, bands, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{generate_day_grid, DateWindow};
    use crate::model::{Group, Task};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pages_cover_every_day_exactly_once() {
        let plan = plan_pages(365, PageFormat::A4, Orientation::Landscape);
        let total: usize = plan.slices.iter().map(|s| s.day_count).sum();
        assert_eq!(total, 365);
        let mut next = 0;
        for slice in &plan.slices {
            assert_eq!(slice.first_day, next);
            next += slice.day_count;
        }
    }

    #[test]
    fn short_grid_fits_one_page() {
        let plan = plan_pages(30, PageFormat::A3, Orientation::Landscape);
        assert_eq!(plan.slices.len(), 1);
        assert_eq!(plan.slices[0].day_count, 30);
    }

    #[test]
    fn empty_grid_plans_no_pages() {
        let plan = plan_pages(0, PageFormat::A4, Orientation::Portrait);
        assert!(plan.slices.is_empty());
    }

    #[test]
    fn page_rows_interleave_lot_banners_and_tasks() {
        let lot = Group::new_lot("Roofing", egui::Color32::from_rgb(180, 100, 50));
        let wrapper = Group::new_task_group(lot.id, "Trusses");
        let task = Task::new(
            wrapper.id,
            "Trusses",
            date(2023, 6, 3).and_hms_opt(0, 0, 0).unwrap(),
            date(2023, 6, 5).and_hms_opt(0, 0, 0).unwrap(),
        );
        let grid = generate_day_grid(DateWindow::new(date(2023, 6, 1), date(2023, 6, 10)));
        let sections =
            crate::layout::group_tasks_by_lot(std::slice::from_ref(&task), &[lot, wrapper]);
        let slice = PageSlice {
            first_day: 0,
            day_count: grid.len(),
        };
        let page = layout_page(slice, &grid, &sections, 10.0);
        assert_eq!(page.rows.len(), 2);
        assert!(page.rows[0].is_lot);
        assert!(!page.rows[1].is_lot);
        assert_eq!(page.rows[1].position.start_idx, 2);
        let covered: usize = page.bands.iter().map(|b| b.day_count).sum();
        assert_eq!(covered, page.days.len());
    }
}
