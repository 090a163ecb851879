use chrono::{Duration, Months, NaiveDate};

use crate::model::Task;

/// How the visible date window is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// A fixed window around today: 15 days back, 45 days ahead.
    RecentWindow,
    /// An explicit window picked by the user.
    Custom { start: NaiveDate, end: NaiveDate },
    /// Everything the plan covers, with a week of padding on each side.
    FullExtent,
}

/// An inclusive `[start, end]` window of calendar days. `start <= end`
/// always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// An inverted pair is a caller error; collapse it to a single day
    /// rather than propagating it into the grid.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Inclusive day count of the window.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Resolve the visible date window for a layout pass.
///
/// `today` is injected rather than read from the system clock so window
/// resolution stays deterministic.
pub fn resolve_date_window(mode: RangeMode, tasks: &[Task], today: NaiveDate) -> DateWindow {
    match mode {
        RangeMode::RecentWindow => {
            DateWindow::new(today - Duration::days(15), today + Duration::days(45))
        }
        RangeMode::Custom { start, end } => DateWindow::new(start, end),
        RangeMode::FullExtent => {
            let earliest = tasks.iter().map(|t| t.start.date()).min();
            let latest = tasks.iter().map(|t| t.end.date()).max();
            match (earliest, latest) {
                (Some(min), Some(max)) => {
                    DateWindow::new(min - Duration::days(7), max + Duration::days(7))
                }
                _ => DateWindow::new(
                    today.checked_sub_months(Months::new(1)).unwrap_or(today),
                    today.checked_add_months(Months::new(2)).unwrap_or(today),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(
            Uuid::new_v4(),
            "t",
            start.and_hms_opt(9, 30, 0).unwrap(),
            end.and_hms_opt(17, 0, 0).unwrap(),
        )
    }

    #[test]
    fn recent_window_brackets_today() {
        let today = date(2023, 6, 16);
        let window = resolve_date_window(RangeMode::RecentWindow, &[], today);
        assert_eq!(window.start, date(2023, 6, 1));
        assert_eq!(window.end, date(2023, 7, 31));
        assert_eq!(window.day_count(), 61);
    }

    #[test]
    fn custom_window_is_verbatim() {
        let mode = RangeMode::Custom {
            start: date(2023, 6, 1),
            end: date(2023, 6, 10),
        };
        let window = resolve_date_window(mode, &[], date(2024, 1, 1));
        assert_eq!(window.start, date(2023, 6, 1));
        assert_eq!(window.end, date(2023, 6, 10));
    }

    #[test]
    fn inverted_custom_window_collapses_to_start() {
        let mode = RangeMode::Custom {
            start: date(2023, 6, 10),
            end: date(2023, 6, 1),
        };
        let window = resolve_date_window(mode, &[], date(2024, 1, 1));
        assert_eq!(window.start, window.end);
        assert_eq!(window.day_count(), 1);
    }

    #[test]
    fn full_extent_pads_task_span_by_a_week() {
        let tasks = vec![
            task(date(2023, 6, 10), date(2023, 6, 20)),
            task(date(2023, 6, 5), date(2023, 6, 12)),
        ];
        let window = resolve_date_window(RangeMode::FullExtent, &tasks, date(2023, 1, 1));
        assert_eq!(window.start, date(2023, 5, 29));
        assert_eq!(window.end, date(2023, 6, 27));
    }

    #[test]
    fn full_extent_without_tasks_falls_back_around_today() {
        let today = date(2023, 6, 15);
        let window = resolve_date_window(RangeMode::FullExtent, &[], today);
        assert_eq!(window.start, date(2023, 5, 15));
        assert_eq!(window.end, date(2023, 8, 15));
    }
}
