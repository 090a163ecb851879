use chrono::{NaiveDate, NaiveDateTime};

use crate::model::Task;

/// A task bar's place in one layout pass: grid indices plus the pixel/point
/// span they resolve to. Recomputed on every pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskPosition {
    pub start_idx: usize,
    pub end_idx: usize,
    /// Horizontal offset of the bar from the grid origin.
    pub offset: f32,
    pub width: f32,
}

impl TaskPosition {
    /// Zero-width placeholder for spans that cannot be placed (empty grid,
    /// childless lot).
    pub fn empty() -> Self {
        Self {
            start_idx: 0,
            end_idx: 0,
            offset: 0.0,
            width: 0.0,
        }
    }
}

/// Map a day span onto the grid.
///
/// Out-of-window spans clamp to the nearest edge instead of failing: a span
/// ending before the grid pins to the first column, one starting after it
/// pins to the last. The inversion guard collapses `start_idx` onto
/// `end_idx` (observed source behavior, kept as-is).
pub fn map_span_position(
    start_day: NaiveDate,
    end_day: NaiveDate,
    grid: &[NaiveDate],
    column_width: f32,
) -> TaskPosition {
    if grid.is_empty() {
        return TaskPosition::empty();
    }

    let start_idx = grid
        .iter()
        .position(|d| *d >= start_day)
        .unwrap_or(grid.len());
    let end_idx = grid.iter().rposition(|d| *d <= end_day).unwrap_or(0);
    let start_idx = if start_idx > end_idx { end_idx } else { start_idx };

    TaskPosition {
        start_idx,
        end_idx,
        offset: start_idx as f32 * column_width,
        width: (end_idx - start_idx + 1) as f32 * column_width,
    }
}

/// Map a task's instants onto the grid, normalizing to calendar days first.
pub fn map_task_position(task: &Task, grid: &[NaiveDate], column_width: f32) -> TaskPosition {
    map_span_position(task.start.date(), task.end.date(), grid, column_width)
}

/// Map an optional aggregate range (a lot's span). `None` means the lot has
/// no resolvable children and renders as a zero-width bar.
pub fn map_range_position(
    range: Option<(NaiveDateTime, NaiveDateTime)>,
    grid: &[NaiveDate],
    column_width: f32,
) -> TaskPosition {
    match range {
        Some((start, end)) => map_span_position(start.date(), end.date(), grid, column_width),
        None => TaskPosition::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::generate_day_grid;
    use crate::layout::range::DateWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june_grid() -> Vec<NaiveDate> {
        generate_day_grid(DateWindow::new(date(2023, 6, 1), date(2023, 6, 10)))
    }

    #[test]
    fn in_window_span_maps_to_exact_indices() {
        let grid = june_grid();
        let pos = map_span_position(date(2023, 6, 3), date(2023, 6, 5), &grid, 10.0);
        assert_eq!(pos.start_idx, 2);
        assert_eq!(pos.end_idx, 4);
        assert_eq!(pos.offset, 20.0);
        assert_eq!(pos.width, 30.0);
    }

    #[test]
    fn span_starting_before_the_window_clamps_to_first_column() {
        let grid = june_grid();
        let pos = map_span_position(date(2023, 5, 1), date(2023, 6, 2), &grid, 10.0);
        assert_eq!(pos.start_idx, 0);
        assert_eq!(pos.end_idx, 1);
    }

    #[test]
    fn span_overshooting_both_edges_covers_the_whole_grid() {
        let grid = june_grid();
        let pos = map_span_position(date(2023, 5, 1), date(2023, 7, 15), &grid, 10.0);
        assert_eq!(pos.start_idx, 0);
        assert_eq!(pos.end_idx, grid.len() - 1);
        assert_eq!(pos.width, grid.len() as f32 * 10.0);
    }

    #[test]
    fn span_entirely_before_the_window_pins_to_left_edge() {
        let grid = june_grid();
        let pos = map_span_position(date(2023, 4, 1), date(2023, 4, 10), &grid, 10.0);
        assert_eq!(pos.start_idx, 0);
        assert_eq!(pos.end_idx, 0);
        assert_eq!(pos.width, 10.0);
    }

    #[test]
    fn span_entirely_after_the_window_pins_to_right_edge() {
        let grid = june_grid();
        let pos = map_span_position(date(2023, 8, 1), date(2023, 8, 10), &grid, 10.0);
        // The forward scan overshoots; the inversion guard collapses the
        // start onto the end index.
        assert_eq!(pos.start_idx, grid.len() - 1);
        assert_eq!(pos.end_idx, grid.len() - 1);
    }

    #[test]
    fn instants_are_normalized_to_days() {
        let grid = june_grid();
        let task = Task::new(
            uuid::Uuid::new_v4(),
            "pour slab",
            date(2023, 6, 3).and_hms_opt(14, 45, 0).unwrap(),
            date(2023, 6, 5).and_hms_opt(8, 0, 0).unwrap(),
        );
        let pos = map_task_position(&task, &grid, 10.0);
        assert_eq!((pos.start_idx, pos.end_idx), (2, 4));
    }

    #[test]
    fn empty_grid_and_empty_range_yield_zero_width() {
        assert_eq!(
            map_span_position(date(2023, 6, 1), date(2023, 6, 2), &[], 10.0),
            TaskPosition::empty()
        );
        assert_eq!(map_range_position(None, &june_grid(), 10.0), TaskPosition::empty());
    }
}
