use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::export;
use crate::layout::{
    aggregate_month_bands, generate_day_grid, group_tasks_by_lot, resolve_date_window, DragEngine,
    Orientation, PageFormat, RangeMode,
};
use crate::model::{Group, Plan};
use crate::ui;

/// Main application state.
pub struct PlannerApp {
    pub plan: Plan,
    pub range_mode: RangeMode,
    pub drag: DragEngine,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<Uuid>,

    // Export paper settings
    pub page_format: PageFormat,
    pub page_orientation: Orientation,

    // Dialog state
    pub show_add_task: bool,
    pub show_add_lot: bool,
    pub show_custom_range: bool,
    pub show_about: bool,
    pub new_task_title: String,
    pub new_task_lot: Option<Uuid>,
    pub new_task_start_date: NaiveDate,
    pub new_task_end_date: NaiveDate,
    pub new_lot_title: String,
    pub custom_start_date: NaiveDate,
    pub custom_end_date: NaiveDate,

    // Status message
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        _cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();

        Self {
            plan: Self::sample_plan(),
            range_mode: RangeMode::RecentWindow,
            drag: DragEngine::new(),
            file_path: None,
            selected_task: None,
            page_format: PageFormat::A4,
            page_orientation: Orientation::Landscape,
            show_add_task: false,
            show_add_lot: false,
            show_custom_range: false,
            show_about: false,
            new_task_title: String::new(),
            new_task_lot: None,
            new_task_start_date: today,
            new_task_end_date: today + chrono::Duration::days(7),
            new_lot_title: String::new(),
            custom_start_date: today - chrono::Duration::days(15),
            custom_end_date: today + chrono::Duration::days(45),
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample plan for demonstration.
    fn sample_plan() -> Plan {
        let today = chrono::Local::now().date_naive();
        let day = |offset: i64| {
            (today + chrono::Duration::days(offset))
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
        };

        let mut plan = Plan::new("Sample Site");

        let shell = Group::new_lot("Structural Shell", ui::theme::lot_color(0));
        let roofing = Group::new_lot("Roofing", ui::theme::lot_color(1));
        let electrical = Group::new_lot("Electrical", ui::theme::lot_color(2));
        let finishes = Group::new_lot("Finishes", ui::theme::lot_color(3));

        let shell_id = shell.id;
        let roofing_id = roofing.id;
        let electrical_id = electrical.id;
        let finishes_id = finishes.id;
        plan.groups = vec![shell, roofing, electrical, finishes];

        let t1 = plan.add_task(shell_id, "Footings & slab", day(-10), day(-3));
        let t2 = plan.add_task(shell_id, "Masonry walls", day(-3), day(8));
        plan.add_task(roofing_id, "Trusses", day(6), day(12));
        plan.add_task(roofing_id, "Tiling & flashing", day(12), day(18));
        plan.add_task(electrical_id, "First fix wiring", day(10), day(20));
        plan.add_task(finishes_id, "Plaster & paint", day(20), day(34));

        for (id, progress) in [(t1, 100u8), (t2, 60u8)] {
            if let Some(task) = plan.tasks.iter_mut().find(|t| t.id == id) {
                task.progress = progress;
            }
        }

        plan
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        self.plan = Plan::default();
        self.file_path = None;
        self.selected_task = None;
        self.drag.pointer_up();
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Site Plan", &["plan.json", "json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(mut plan) => {
                    let fixed = plan.sanitize();
                    self.plan = plan;
                    self.file_path = Some(path);
                    self.selected_task = None;
                    self.drag.pointer_up();
                    self.status_message = if fixed > 0 {
                        format!("Plan loaded ({} inverted task dates corrected)", fixed)
                    } else {
                        "Plan loaded".to_string()
                    };
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if let Some(ref path) = self.file_path.clone() {
            self.plan.touch();
            match crate::io::save_plan(&self.plan, path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Site Plan", &["plan.json", "json"])
            .set_file_name(&format!("{}.plan.json", self.plan.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.plan.tasks.is_empty() {
            self.status_message = "Nothing to export — plan has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            let sections = group_tasks_by_lot(&self.plan.tasks, &self.plan.groups);
            match crate::io::csv_export::export_csv(&sections, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    /// Export the current date window as one SVG file per page.
    pub fn export_svg_pages(&mut self) {
        let today = chrono::Local::now().date_naive();
        let window = resolve_date_window(self.range_mode, &self.plan.tasks, today);
        let grid = generate_day_grid(window);
        let page_plan = export::plan_pages(grid.len(), self.page_format, self.page_orientation);
        if page_plan.slices.is_empty() {
            self.status_message = "Nothing to export — date window is empty".to_string();
            return;
        }

        let default_name = format!("{}.svg", self.plan.name);
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Files", &["svg"])
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };

        let sections = group_tasks_by_lot(&self.plan.tasks, &self.plan.groups);
        let page_count = page_plan.slices.len();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("plan")
            .to_string();
        let parent = path.parent().map(PathBuf::from).unwrap_or_default();

        for (i, slice) in page_plan.slices.iter().enumerate() {
            let layout = export::layout_page(*slice, &grid, &sections, page_plan.column_width);
            let svg = export::render_page(&layout, &page_plan, &self.plan.name, i + 1, page_count);
            let page_path = if page_count == 1 {
                path.clone()
            } else {
                parent.join(format!("{}_p{}.svg", stem, i + 1))
            };
            if let Err(e) = std::fs::write(&page_path, svg) {
                self.status_message = format!("SVG export failed: {}", e);
                return;
            }
        }
        self.status_message = format!(
            "Exported {} page{} ({} days)",
            page_count,
            if page_count == 1 { "" } else { "s" },
            grid.len()
        );
    }

    // --- Plan operations ---

    pub fn create_lot_from_dialog(&mut self) {
        let title = if self.new_lot_title.is_empty() {
            "New Lot".to_string()
        } else {
            self.new_lot_title.clone()
        };
        let color = ui::theme::lot_color(self.plan.lots().count());
        self.plan.groups.push(Group::new_lot(title, color));
        self.plan.touch();
        self.new_lot_title = String::new();
        self.status_message = "Lot added".to_string();
    }

    pub fn create_task_from_dialog(&mut self) {
        let Some(lot_id) = self.new_task_lot else {
            return;
        };
        let title = if self.new_task_title.is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_title.clone()
        };
        let start = self.new_task_start_date.and_hms_opt(0, 0, 0).unwrap_or_default();
        let end = self
            .new_task_end_date
            .max(self.new_task_start_date)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();

        let id = self.plan.add_task(lot_id, title, start, end);
        self.selected_task = Some(id);
        self.reset_dialog_fields();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: Uuid) {
        self.plan.delete_task(id);
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        self.status_message = "Task deleted".to_string();
    }

    /// Re-parent a task's wrapper group under another lot.
    pub fn move_task_to_lot(&mut self, task_id: Uuid, lot_id: Uuid) {
        let Some(group_id) = self
            .plan
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.group_id)
        else {
            return;
        };
        if let Some(wrapper) = self.plan.groups.iter_mut().find(|g| g.id == group_id) {
            wrapper.parent_id = Some(lot_id);
            self.plan.touch();
            self.status_message = "Task moved".to_string();
        }
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_task_title = String::new();
        self.new_task_start_date = today;
        self.new_task_end_date = today + chrono::Duration::days(7);
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_plan();
        }

        // One layout pass per frame: the window, grid, bands, and sections
        // are computed once and read-only from here on.
        let today = chrono::Local::now().date_naive();
        let window = resolve_date_window(self.range_mode, &self.plan.tasks, today);
        let grid = generate_day_grid(window);
        let bands = aggregate_month_bands(&grid);
        let sections = group_tasks_by_lot(&self.plan.tasks, &self.plan.groups);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Lots: {} · Tasks: {} · Days: {}",
                                self.plan.lots().count(),
                                self.plan.tasks.len(),
                                grid.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: editor for the selected task
        let mut editor_action = ui::task_editor::EditorAction::None;
        if let Some(sel_id) = self.selected_task {
            let lots: Vec<(Uuid, String)> =
                self.plan.lots().map(|l| (l.id, l.title.clone())).collect();
            let current_lot = self
                .plan
                .tasks
                .iter()
                .find(|t| t.id == sel_id)
                .and_then(|t| self.plan.groups.iter().find(|g| g.id == t.group_id))
                .and_then(|g| g.parent_id);
            egui::SidePanel::left("editor_panel")
                .default_width(240.0)
                .resizable(false)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(10.0)),
                )
                .show(ctx, |ui| {
                    if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == sel_id) {
                        editor_action =
                            ui::task_editor::show_task_editor(task, current_lot, &lots, ui);
                    }
                });
        }

        match editor_action {
            ui::task_editor::EditorAction::Changed => {
                self.plan.touch();
                self.status_message = "Task updated".to_string();
            }
            ui::task_editor::EditorAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::task_editor::EditorAction::MoveToLot(task_id, lot_id) => {
                self.move_task_to_lot(task_id, lot_id);
            }
            ui::task_editor::EditorAction::None => {}
        }

        // Central panel: planning chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::planning_chart::show_planning_chart(
                &sections,
                &grid,
                &bands,
                &mut self.drag,
                &mut self.selected_task,
                today,
                ui,
            );
            if let Some(reschedule) = interaction.reschedule {
                self.plan.apply_reschedule(&reschedule);
                if let Some(task) = self.plan.tasks.iter().find(|t| t.id == reschedule.task_id) {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        task.title,
                        task.start.format("%Y-%m-%d"),
                        task.end.format("%Y-%m-%d")
                    );
                } else {
                    self.status_message = "Timeline updated".to_string();
                }
            }
        });

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_add_lot {
            ui::dialogs::show_add_lot_dialog(self, ctx);
        }
        if self.show_custom_range {
            ui::dialogs::show_custom_range_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
