use crate::model::Task;
use crate::ui::theme;
use egui::{RichText, Ui};
use uuid::Uuid;

/// What the editor asked the app to do this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
    Delete(Uuid),
    MoveToLot(Uuid, Uuid),
}

/// Render the side-panel editor for the selected task.
///
/// Date edits go through day-granular pickers; an end picked before the
/// start is clamped so the task never leaves the panel inverted.
pub fn show_task_editor(
    task: &mut Task,
    current_lot: Option<Uuid>,
    lots: &[(Uuid, String)],
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;

    ui.label(
        RichText::new("Task")
            .font(theme::font_header())
            .color(theme::TEXT_SECONDARY),
    );
    ui.add_space(4.0);

    egui::Grid::new("task_editor_grid")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
            if ui
                .add_sized([160.0, 22.0], egui::TextEdit::singleline(&mut task.title))
                .changed()
            {
                action = EditorAction::Changed;
            }
            ui.end_row();

            ui.label(RichText::new("Lot").color(theme::TEXT_SECONDARY));
            let current_title = lots
                .iter()
                .find(|(id, _)| Some(*id) == current_lot)
                .map(|(_, title)| title.as_str())
                .unwrap_or("—");
            egui::ComboBox::from_id_salt(("editor_lot", task.id))
                .selected_text(current_title)
                .show_ui(ui, |ui| {
                    for (lot_id, title) in lots {
                        let is_current = Some(*lot_id) == current_lot;
                        if ui.selectable_label(is_current, title).clicked() && !is_current {
                            action = EditorAction::MoveToLot(task.id, *lot_id);
                        }
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
            let mut start_date = task.start.date();
            let start_salt = format!("editor_dp_start_{}", task.id);
            if ui
                .add(
                    egui_extras::DatePickerButton::new(&mut start_date)
                        .id_salt(&start_salt),
                )
                .changed()
            {
                task.start = start_date.and_time(task.start.time());
                task.end = task.end.max(task.start);
                action = EditorAction::Changed;
            }
            ui.end_row();

            ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
            let mut end_date = task.end.date();
            let end_salt = format!("editor_dp_end_{}", task.id);
            if ui
                .add(
                    egui_extras::DatePickerButton::new(&mut end_date)
                        .id_salt(&end_salt),
                )
                .changed()
            {
                task.end = end_date.and_time(task.end.time()).max(task.start);
                action = EditorAction::Changed;
            }
            ui.end_row();

            ui.label(RichText::new("Progress").color(theme::TEXT_SECONDARY));
            if ui
                .add(egui::Slider::new(&mut task.progress, 0..=100).suffix("%"))
                .changed()
            {
                action = EditorAction::Changed;
            }
            ui.end_row();
        });

    ui.add_space(6.0);
    if ui
        .button(RichText::new("Delete Task").color(theme::TODAY_LINE))
        .clicked()
    {
        action = EditorAction::Delete(task.id);
    }

    action
}
