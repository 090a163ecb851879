pub mod dialogs;
pub mod planning_chart;
pub mod task_editor;
pub mod theme;
pub mod toolbar;
