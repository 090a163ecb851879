use chrono::NaiveDateTime;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scheduled task on the planning timeline.
///
/// `start <= end` is an invariant: the drag engine never produces a violating
/// pair, and `Plan::sanitize` clamps anything loaded from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// The task-group this task belongs to (see [`Group`]).
    pub group_id: Uuid,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Progress from 0 (not started) to 100 (complete).
    pub progress: u8,
    /// Header tasks render as a lot banner row rather than a draggable bar.
    pub is_header: bool,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(
        group_id: Uuid,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            title: title.into(),
            start,
            end,
            progress: 0,
            is_header: false,
        }
    }

    /// Whole calendar days between start and end (0 for a single-day task).
    pub fn duration_days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days()
    }
}

/// A node in the two-level planning hierarchy.
///
/// A group with no `parent_id` is a **lot** (a trade or phase); a group whose
/// `parent_id` points at a lot is a task-group wrapping exactly one task.
/// No deeper nesting exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub parent_id: Option<Uuid>,
    /// Display color for the lot's bars (stored as RGBA).
    #[serde(with = "color_serde", default)]
    pub accent: Option<Color32>,
}

impl Group {
    /// Create a new top-level lot.
    pub fn new_lot(title: impl Into<String>, accent: Color32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            parent_id: None,
            accent: Some(accent),
        }
    }

    /// Create the task-group wrapper for one task under a lot.
    pub fn new_task_group(lot_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            parent_id: Some(lot_id),
            accent: None,
        }
    }

    pub fn is_lot(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Serde helper for `Option<Color32>`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        color
            .map(|c| [c.r(), c.g(), c.b(), c.a()])
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: Option<[u8; 4]> = Deserialize::deserialize(deserializer)?;
        Ok(rgba.map(|[r, g, b, a]| Color32::from_rgba_premultiplied(r, g, b, a)))
    }
}
