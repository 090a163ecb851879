use crate::layout::{
    compute_column_width, map_range_position, map_task_position, DragEngine, EditKind, LotSection,
    MonthBand, Reschedule, Surface,
};
use crate::model::Task;
use crate::ui::theme;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const LOT_ROW_HEIGHT: f32 = theme::LOT_ROW_HEIGHT;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;
const LABEL_WIDTH: f32 = theme::LABEL_COLUMN_WIDTH;

/// Result details from interactions in the planning chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A day-offset commit proposed by the drag engine this frame.
    pub reschedule: Option<Reschedule>,
}

/// Render the planning timeline (central panel): month/day header, lot
/// banner rows, draggable task bars.
pub fn show_planning_chart(
    sections: &[LotSection],
    grid: &[NaiveDate],
    bands: &[MonthBand],
    drag: &mut DragEngine,
    selected_task: &mut Option<Uuid>,
    today: NaiveDate,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();

    let surface = Surface::viewport(available.x, LABEL_WIDTH);
    let column_width = compute_column_width(grid.len(), &surface);
    let grid_width = grid.len() as f32 * column_width;
    let chart_width = (LABEL_WIDTH + grid_width).max(available.x);

    let body_height: f32 = sections
        .iter()
        .map(|s| LOT_ROW_HEIGHT + visible_tasks(s).count() as f32 * ROW_HEIGHT)
        .sum();
    let chart_height = HEADER_HEIGHT + body_height + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_weekend_tint(&painter, origin, grid, column_width, chart_height);
            draw_header(&painter, origin, grid, bands, column_width, chart_height);
            draw_today_line(&painter, origin, grid, column_width, today, chart_height);

            // Label column separator
            painter.line_segment(
                [
                    Pos2::new(origin.x + LABEL_WIDTH, origin.y),
                    Pos2::new(origin.x + LABEL_WIDTH, origin.y + chart_height),
                ],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );

            let mut y = origin.y + HEADER_HEIGHT;
            for section in sections {
                draw_lot_row(&painter, origin, section, grid, column_width, chart_width, y);
                y += LOT_ROW_HEIGHT;

                for task in visible_tasks(section) {
                    let is_selected = *selected_task == Some(task.id);
                    let accent = section.lot.accent.unwrap_or(theme::BORDER_ACCENT);
                    let bar_rect = draw_task_row(
                        &painter,
                        origin,
                        task,
                        grid,
                        column_width,
                        chart_width,
                        y,
                        accent,
                        is_selected,
                    );

                    if let Some(changed) = interact_task_bar(
                        ui,
                        &painter,
                        bar_rect,
                        task,
                        drag,
                        column_width,
                        selected_task,
                        &mut consumed_click,
                    ) {
                        interaction.reschedule = Some(changed);
                    }

                    y += ROW_HEIGHT;
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn visible_tasks(section: &LotSection) -> impl Iterator<Item = &Task> {
    section.tasks.iter().filter(|t| !t.is_header)
}

/// Wire up the three drag zones of a task bar (body, left handle, right
/// handle) to the drag engine and collect any emitted reschedule.
#[allow(clippy::too_many_arguments)]
fn interact_task_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    bar_rect: Rect,
    task: &Task,
    drag: &mut DragEngine,
    column_width: f32,
    selected_task: &mut Option<Uuid>,
    consumed_click: &mut bool,
) -> Option<Reschedule> {
    let bar_response = ui.interact(
        bar_rect,
        ui.make_persistent_id(("task-bar", task.id)),
        Sense::click_and_drag(),
    );
    let left_handle_rect = Rect::from_min_max(
        Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    );
    let right_handle_rect = Rect::from_min_max(
        Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    );
    let left_response = ui.interact(
        left_handle_rect.expand(4.0),
        ui.make_persistent_id(("task-resize-left", task.id)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle_rect.expand(4.0),
        ui.make_persistent_id(("task-resize-right", task.id)),
        Sense::drag(),
    );

    if bar_response.clicked() {
        *selected_task = Some(task.id);
        *consumed_click = true;
    }
    if bar_response.drag_started() || left_response.drag_started() || right_response.drag_started()
    {
        *selected_task = Some(task.id);
        *consumed_click = true;
    }

    let mut reschedule = None;
    let zones = [
        (&left_response, EditKind::ResizeStart),
        (&right_response, EditKind::ResizeEnd),
        (&bar_response, EditKind::Move),
    ];
    for (response, kind) in zones {
        if response.drag_started() {
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            drag.pointer_down(task, kind, ptr_x);
        }
        if response.dragged() && drag.active_task() == Some(task.id) {
            ui.ctx().set_cursor_icon(match kind {
                EditKind::Move => egui::CursorIcon::Grab,
                _ => egui::CursorIcon::ResizeHorizontal,
            });
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            if let Some(changed) = drag.pointer_move(ptr_x, column_width) {
                reschedule = Some(changed);
            }
        } else if response.dragged() && !drag.is_dragging() {
            // Re-arm after a committed offset: the engine reset to idle and
            // a fresh drag starts from the task's updated bounds.
            let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
            drag.pointer_down(task, kind, ptr_x);
        }
        if response.drag_stopped() && drag.active_task() == Some(task.id) {
            drag.pointer_up();
        }
    }

    // Handle affordances
    let hovered = bar_response.hovered() || left_response.hovered() || right_response.hovered();
    if *selected_task == Some(task.id) || left_response.hovered() || right_response.hovered() {
        if left_response.hovered() || right_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        } else if bar_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        let lh = Rect::from_min_size(
            Pos2::new(bar_rect.left() - 1.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        let rh = Rect::from_min_size(
            Pos2::new(bar_rect.right() - 2.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
        painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
    }

    if hovered {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("task-tip", task.id)),
            |ui| {
                ui.strong(&task.title);
                ui.label(format!(
                    "{} → {}",
                    task.start.format("%d/%m/%Y"),
                    task.end.format("%d/%m/%Y"),
                ));
                ui.label(format!("Progress: {}%", task.progress));
            },
        );
    }

    reschedule
}

fn draw_weekend_tint(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &[NaiveDate],
    column_width: f32,
    height: f32,
) {
    for (i, day) in grid.iter().enumerate() {
        if day.weekday().num_days_from_monday() >= 5 {
            let x = origin.x + LABEL_WIDTH + i as f32 * column_width;
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Vec2::new(column_width, height - HEADER_HEIGHT),
                ),
                0.0,
                theme::BG_WEEKEND,
            );
        }
    }
}

/// Two-row header: month bands on top, day numbers below.
fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &[NaiveDate],
    bands: &[MonthBand],
    column_width: f32,
    height: f32,
) {
    let width = LABEL_WIDTH + grid.len() as f32 * column_width;
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for band in bands {
        let x = origin.x + LABEL_WIDTH + band.start_day_index as f32 * column_width;
        let band_width = band.day_count as f32 * column_width;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if band_width > 44.0 {
            painter.text(
                Pos2::new(x + 4.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                &band.label,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }

    for (i, day) in grid.iter().enumerate() {
        let x = origin.x + LABEL_WIDTH + i as f32 * column_width;
        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if column_width >= 14.0 {
            let is_weekend = day.weekday().num_days_from_monday() >= 5;
            let day_color = if is_weekend {
                theme::TEXT_DIM
            } else {
                theme::TEXT_SECONDARY
            };
            painter.text(
                Pos2::new(x + column_width / 2.0, origin.y + 32.0),
                egui::Align2::CENTER_CENTER,
                day.format("%d").to_string(),
                theme::font_sub(),
                day_color,
            );
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &[NaiveDate],
    column_width: f32,
    today: NaiveDate,
    height: f32,
) {
    let Some(idx) = grid.iter().position(|d| *d == today) else {
        return;
    };
    let x = origin.x + LABEL_WIDTH + idx as f32 * column_width + column_width / 2.0;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Lot banner row: tinted background, lot title, and a thin aggregate bar
/// spanning the lot's children.
fn draw_lot_row(
    painter: &egui::Painter,
    origin: Pos2,
    section: &LotSection,
    grid: &[NaiveDate],
    column_width: f32,
    chart_width: f32,
    y: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(
            Pos2::new(origin.x, y),
            Vec2::new(chart_width, LOT_ROW_HEIGHT),
        ),
        0.0,
        theme::BG_LOT_ROW,
    );

    let accent = section.lot.accent.unwrap_or(theme::BORDER_ACCENT);
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(3.0, LOT_ROW_HEIGHT)),
        0.0,
        accent,
    );
    painter.text(
        Pos2::new(origin.x + 8.0, y + LOT_ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &section.lot.title,
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );

    let position = map_range_position(section.range, grid, column_width);
    if position.width > 0.0 {
        let bar_rect = Rect::from_min_size(
            Pos2::new(
                origin.x + LABEL_WIDTH + position.offset,
                y + LOT_ROW_HEIGHT / 2.0 - 3.0,
            ),
            Vec2::new(position.width, 6.0),
        );
        painter.rect_filled(bar_rect, Rounding::same(3.0), accent.gamma_multiply(0.6));
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_task_row(
    painter: &egui::Painter,
    origin: Pos2,
    task: &Task,
    grid: &[NaiveDate],
    column_width: f32,
    chart_width: f32,
    y: f32,
    accent: Color32,
    is_selected: bool,
) -> Rect {
    painter.line_segment(
        [
            Pos2::new(origin.x, y + ROW_HEIGHT),
            Pos2::new(origin.x + chart_width, y + ROW_HEIGHT),
        ],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    // Task title in the label column, clipped to it
    let label_clip = Rect::from_min_size(
        Pos2::new(origin.x, y),
        Vec2::new(LABEL_WIDTH - 6.0, ROW_HEIGHT),
    );
    let clipped = painter.with_clip_rect(label_clip);
    clipped.text(
        Pos2::new(origin.x + 16.0, y + ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &task.title,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    let position = map_task_position(task, grid, column_width);
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + LABEL_WIDTH + position.offset, y + inset),
        Vec2::new(position.width.max(6.0), ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, accent);

    // Progress fill (darkened overlay)
    if task.progress > 0 {
        let fraction = (task.progress.min(100) as f32) / 100.0;
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * fraction, bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
        if task.progress < 98 {
            let tick_x = bar_rect.left() + bar_rect.width() * fraction;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Duration label on the bar when there is room
    if bar_rect.width() > 34.0 {
        let days = task.duration_days() + 1;
        let clipped = painter.with_clip_rect(bar_rect);
        clipped.text(
            Pos2::new(bar_rect.left() + 6.0, bar_rect.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{}d", days),
            theme::font_small(),
            theme::TEXT_ON_BAR,
        );
    }

    bar_rect
}
