use chrono::{Duration, NaiveDate};

use super::range::DateWindow;

/// Expand a resolved window into the ordered day grid: one midnight-
/// normalized marker per calendar day, both ends inclusive.
///
/// The grid is the index space for every position computation in a layout
/// pass; regenerating from the same window yields an identical sequence.
pub fn generate_day_grid(window: DateWindow) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(window.day_count().max(0) as usize);
    let mut day = window.start;
    while day <= window.end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// A contiguous run of same-month days in the grid, for the upper header
/// row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBand {
    pub label: String,
    pub day_count: usize,
    pub start_day_index: usize,
}

fn month_label(day: NaiveDate) -> String {
    day.format("%B %Y").to_string()
}

/// Group the day grid into consecutive same-month bands, in grid order.
/// The band day counts always sum to the grid length.
pub fn aggregate_month_bands(grid: &[NaiveDate]) -> Vec<MonthBand> {
    let mut bands: Vec<MonthBand> = Vec::new();
    for (idx, day) in grid.iter().enumerate() {
        let label = month_label(*day);
        match bands.last_mut() {
            Some(band) if band.label == label => band.day_count += 1,
            _ => bands.push(MonthBand {
                label,
                day_count: 1,
                start_day_index: idx,
            }),
        }
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_is_contiguous_and_inclusive() {
        let window = DateWindow::new(date(2023, 6, 1), date(2023, 6, 10));
        let grid = generate_day_grid(window);
        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0], date(2023, 6, 1));
        assert_eq!(grid[9], date(2023, 6, 10));
        for pair in grid.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn single_day_window_yields_single_marker() {
        let window = DateWindow::new(date(2023, 6, 1), date(2023, 6, 1));
        assert_eq!(generate_day_grid(window), vec![date(2023, 6, 1)]);
    }

    #[test]
    fn regeneration_is_identical() {
        let window = DateWindow::new(date(2023, 2, 20), date(2023, 3, 12));
        assert_eq!(generate_day_grid(window), generate_day_grid(window));
    }

    #[test]
    fn month_bands_cover_the_grid_in_order() {
        let window = DateWindow::new(date(2023, 5, 28), date(2023, 7, 3));
        let grid = generate_day_grid(window);
        let bands = aggregate_month_bands(&grid);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].label, "May 2023");
        assert_eq!(bands[0].day_count, 4);
        assert_eq!(bands[0].start_day_index, 0);
        assert_eq!(bands[1].label, "June 2023");
        assert_eq!(bands[1].day_count, 30);
        assert_eq!(bands[1].start_day_index, 4);
        assert_eq!(bands[2].label, "July 2023");
        assert_eq!(bands[2].day_count, 3);
        let total: usize = bands.iter().map(|b| b.day_count).sum();
        assert_eq!(total, grid.len());
    }

    #[test]
    fn empty_grid_yields_no_bands() {
        assert!(aggregate_month_bands(&[]).is_empty());
    }
}
