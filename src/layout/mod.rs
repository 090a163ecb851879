//! The timeline layout engine: pure geometry over tasks and lots, shared by
//! the interactive chart and the export renderer. Nothing in here draws,
//! fetches, or stores.

pub mod columns;
pub mod drag;
pub mod grid;
pub mod lots;
pub mod position;
pub mod range;

pub use columns::{compute_column_width, Orientation, PageFormat, Surface};
pub use drag::{DragEngine, EditKind, Reschedule};
pub use grid::{aggregate_month_bands, generate_day_grid, MonthBand};
pub use lots::{group_tasks_by_lot, LotSection};
pub use position::{map_range_position, map_task_position, TaskPosition};
pub use range::{resolve_date_window, DateWindow, RangeMode};
