use crate::app::PlannerApp;
use crate::layout::{Orientation, PageFormat, RangeMode};
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Plan").clicked() {
                app.new_plan();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_plan();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_plan();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_plan_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button("  Export SVG Pages...").clicked() {
                app.export_svg_pages();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Plan  ").font(theme::font_menu()), |ui| {
            if ui.button("  Add Lot...").clicked() {
                app.show_add_lot = true;
                ui.close_menu();
            }
            if ui.button("  Add Task...").clicked() {
                app.show_add_task = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Date Window").small().weak());
            if ui
                .radio(
                    app.range_mode == RangeMode::RecentWindow,
                    "Recent (−15 / +45 days)",
                )
                .clicked()
            {
                app.range_mode = RangeMode::RecentWindow;
                ui.close_menu();
            }
            if ui
                .radio(app.range_mode == RangeMode::FullExtent, "Full extent")
                .clicked()
            {
                app.range_mode = RangeMode::FullExtent;
                ui.close_menu();
            }
            let is_custom = matches!(app.range_mode, RangeMode::Custom { .. });
            if ui.radio(is_custom, "Custom...").clicked() {
                app.show_custom_range = true;
                ui.close_menu();
            }

            ui.separator();
            ui.label(RichText::new("Export Paper").small().weak());
            for (format, label) in [(PageFormat::A4, "A4"), (PageFormat::A3, "A3")] {
                if ui.radio(app.page_format == format, label).clicked() {
                    app.page_format = format;
                    ui.close_menu();
                }
            }
            for (orientation, label) in [
                (Orientation::Landscape, "Landscape"),
                (Orientation::Portrait, "Portrait"),
            ] {
                if ui.radio(app.page_orientation == orientation, label).clicked() {
                    app.page_orientation = orientation;
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
