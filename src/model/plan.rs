use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{Group, Task};
use crate::layout::drag::Reschedule;

/// A planning document: lots, tasks, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub tasks: Vec<Task>,
    pub groups: Vec<Group>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            tasks: Vec::new(),
            groups: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn lot(&self, lot_id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == lot_id && g.is_lot())
    }

    pub fn lots(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.is_lot())
    }

    /// Add a task under a lot, creating its task-group wrapper.
    /// Returns the new task id.
    pub fn add_task(
        &mut self,
        lot_id: Uuid,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Uuid {
        let title = title.into();
        let wrapper = Group::new_task_group(lot_id, title.clone());
        let end = end.max(start);
        let task = Task::new(wrapper.id, title, start, end);
        let id = task.id;
        self.groups.push(wrapper);
        self.tasks.push(task);
        self.touch();
        id
    }

    /// Remove a task and its task-group wrapper. Lots are kept even when
    /// they become empty.
    pub fn delete_task(&mut self, task_id: Uuid) {
        let group_id = match self.tasks.iter().find(|t| t.id == task_id) {
            Some(t) => t.group_id,
            None => return,
        };
        self.tasks.retain(|t| t.id != task_id);
        self.groups.retain(|g| g.id != group_id);
        self.touch();
    }

    /// Commit a reschedule proposed by the drag engine.
    pub fn apply_reschedule(&mut self, reschedule: &Reschedule) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == reschedule.task_id) {
            task.start = reschedule.new_start;
            task.end = reschedule.new_end;
            self.touch();
        }
    }

    /// Clamp any task whose end precedes its start (bad data from an
    /// external file). Returns how many tasks were corrected.
    pub fn sanitize(&mut self) -> usize {
        let mut fixed = 0;
        for task in &mut self.tasks {
            if task.end < task.start {
                task.end = task.start;
                fixed += 1;
            }
        }
        if fixed > 0 {
            self.touch();
        }
        fixed
    }
}
