use chrono::{Duration, NaiveDateTime};
use uuid::Uuid;

use crate::model::Task;

/// Which part of a task bar a drag gesture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Bar body: shift both bounds, duration preserved.
    Move,
    /// Left handle: shift the start, clamped to the unshifted end.
    ResizeStart,
    /// Right handle: shift the end, clamped to the unshifted start.
    ResizeEnd,
}

/// Snapshot captured on pointer-down and consumed when a drag commits.
#[derive(Debug, Clone)]
pub struct DragState {
    pub task_id: Uuid,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub anchor_x: f32,
    pub kind: EditKind,
}

/// A proposed start/end pair for the owning collaborator to commit.
/// `new_start <= new_end` holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
    pub task_id: Uuid,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

/// Idle/dragging state machine converting pointer deltas into whole-day
/// reschedules.
///
/// At most one drag is active at a time. A committed non-zero day offset
/// resets the machine to idle immediately, so each emission is computed
/// from a fresh anchor rather than accumulating rounding error across
/// pointer events; the adapter re-arms on the next move.
#[derive(Debug, Default)]
pub struct DragEngine {
    state: Option<DragState>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn active_task(&self) -> Option<Uuid> {
        self.state.as_ref().map(|s| s.task_id)
    }

    /// idle -> dragging. Ignored while another drag is active.
    pub fn pointer_down(&mut self, task: &Task, kind: EditKind, pointer_x: f32) {
        if self.state.is_some() {
            return;
        }
        self.state = Some(DragState {
            task_id: task.id,
            original_start: task.start,
            original_end: task.end,
            anchor_x: pointer_x,
            kind,
        });
    }

    /// dragging -> dragging (sub-column jitter) or dragging -> idle with an
    /// emitted reschedule. Returns `None` while idle, while the rounded day
    /// offset is zero, or when the column width is degenerate.
    pub fn pointer_move(&mut self, pointer_x: f32, column_width: f32) -> Option<Reschedule> {
        let state = self.state.as_ref()?;
        if column_width <= 0.0 {
            return None;
        }
        let day_offset = ((pointer_x - state.anchor_x) / column_width).round() as i64;
        if day_offset == 0 {
            return None;
        }
        let shift = Duration::days(day_offset);
        let (new_start, new_end) = match state.kind {
            EditKind::Move => (state.original_start + shift, state.original_end + shift),
            EditKind::ResizeStart => {
                let candidate = state.original_start + shift;
                (candidate.min(state.original_end), state.original_end)
            }
            EditKind::ResizeEnd => {
                let candidate = state.original_end + shift;
                (state.original_start, candidate.max(state.original_start))
            }
        };
        let reschedule = Reschedule {
            task_id: state.task_id,
            new_start,
            new_end,
        };
        self.state = None;
        Some(reschedule)
    }

    /// dragging -> idle with no further action.
    pub fn pointer_up(&mut self) {
        self.state = None;
    }
}
