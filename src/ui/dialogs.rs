use crate::app::PlannerApp;
use crate::layout::RangeMode;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Task" dialog.
pub fn show_add_task_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let mut should_create = false;
    let lots: Vec<_> = app
        .plan
        .lots()
        .map(|l| (l.id, l.title.clone()))
        .collect();

    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.add_space(4.0);

            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_task_title)
                            .hint_text("Task title..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Lot").color(theme::TEXT_SECONDARY));
                    let selected_title = lots
                        .iter()
                        .find(|(id, _)| Some(*id) == app.new_task_lot)
                        .map(|(_, t)| t.as_str())
                        .unwrap_or("Pick a lot...");
                    egui::ComboBox::from_id_salt("add_task_lot")
                        .selected_text(selected_title)
                        .show_ui(ui, |ui| {
                            for (id, title) in &lots {
                                ui.selectable_value(&mut app.new_task_lot, Some(*id), title);
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_start_date)
                            .id_salt("dlg_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_end_date)
                            .id_salt("dlg_dp_end"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let can_create = app.new_task_lot.is_some();
                if ui
                    .add_enabled(can_create, egui::Button::new("Create"))
                    .clicked()
                {
                    should_create = true;
                    should_close = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if should_create {
        app.create_task_from_dialog();
    }
    if should_close {
        app.show_add_task = false;
    }
}

/// Render the "Add Lot" dialog.
pub fn show_add_lot_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let mut should_create = false;

    Window::new(RichText::new("Add Lot").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                ui.add_sized(
                    [190.0, 24.0],
                    egui::TextEdit::singleline(&mut app.new_lot_title)
                        .hint_text("e.g. Electrical"),
                );
            });
            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Create").clicked() {
                    should_create = true;
                    should_close = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if should_create {
        app.create_lot_from_dialog();
    }
    if should_close {
        app.show_add_lot = false;
    }
}

/// Render the custom date-window dialog.
pub fn show_custom_range_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let mut should_apply = false;

    Window::new(RichText::new("Custom Date Window").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("custom_range_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("From").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.custom_start_date)
                            .id_salt("range_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("To").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.custom_end_date)
                            .id_salt("range_dp_end"),
                    );
                    ui.end_row();
                });

            if app.custom_end_date < app.custom_start_date {
                ui.add_space(2.0);
                ui.label(
                    RichText::new("End precedes start")
                        .color(theme::TODAY_LINE)
                        .font(theme::font_small()),
                );
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let valid = app.custom_start_date <= app.custom_end_date;
                if ui.add_enabled(valid, egui::Button::new("Apply")).clicked() {
                    should_apply = true;
                    should_close = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if should_apply {
        app.range_mode = RangeMode::Custom {
            start: app.custom_start_date,
            end: app.custom_end_date,
        };
        app.status_message = "Custom date window applied".to_string();
    }
    if should_close {
        app.show_custom_range = false;
    }
}

/// Render the About dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("About Site Planner").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label("Site Planner — construction work scheduling");
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(4.0);
            ui.label(
                RichText::new("Drag bars to move · Drag edges to resize")
                    .color(theme::TEXT_SECONDARY)
                    .font(theme::font_small()),
            );
            ui.add_space(6.0);
            if ui.button("Close").clicked() {
                should_close = true;
            }
        });

    if should_close {
        app.show_about = false;
    }
}
