use chrono::NaiveDateTime;

use crate::model::{Group, Task};

/// One lot with its resolved tasks and aggregate time range, in the row
/// order the chart and export renderers draw.
#[derive(Debug, Clone)]
pub struct LotSection {
    pub lot: Group,
    pub tasks: Vec<Task>,
    /// `[min start, max end]` over the lot's tasks; `None` when the lot has
    /// no resolvable children.
    pub range: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Partition groups into lots and task-groups and resolve each lot's tasks.
///
/// Lots keep their input order; a lot whose task-groups resolve to nothing
/// still gets a section (with an empty range) so it keeps its header row.
/// Task-groups pointing at a missing lot are dropped, as are tasks whose
/// group is missing.
pub fn group_tasks_by_lot(tasks: &[Task], groups: &[Group]) -> Vec<LotSection> {
    let mut sections: Vec<LotSection> = groups
        .iter()
        .filter(|g| g.is_lot())
        .map(|lot| LotSection {
            lot: lot.clone(),
            tasks: Vec::new(),
            range: None,
        })
        .collect();

    for task in tasks {
        let lot_id = groups
            .iter()
            .find(|g| g.id == task.group_id)
            .and_then(|wrapper| wrapper.parent_id);
        let Some(lot_id) = lot_id else { continue };
        if let Some(section) = sections.iter_mut().find(|s| s.lot.id == lot_id) {
            section.tasks.push(task.clone());
        }
    }

    for section in &mut sections {
        let start = section.tasks.iter().map(|t| t.start).min();
        let end = section.tasks.iter().map(|t| t.end).max();
        section.range = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        };
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fixture() -> (Vec<Task>, Vec<Group>) {
        let shell = Group::new_lot("Structural Shell", egui::Color32::from_rgb(70, 120, 180));
        let roofing = Group::new_lot("Roofing", egui::Color32::from_rgb(180, 100, 50));
        let empty = Group::new_lot("Electrical", egui::Color32::from_rgb(52, 168, 83));

        let g1 = Group::new_task_group(shell.id, "Footings");
        let g2 = Group::new_task_group(shell.id, "Walls");
        let g3 = Group::new_task_group(roofing.id, "Trusses");

        let tasks = vec![
            Task::new(g1.id, "Footings", dt(2023, 6, 3), dt(2023, 6, 8)),
            Task::new(g2.id, "Walls", dt(2023, 6, 6), dt(2023, 6, 20)),
            Task::new(g3.id, "Trusses", dt(2023, 6, 18), dt(2023, 6, 25)),
        ];
        let groups = vec![shell, roofing, empty, g1, g2, g3];
        (tasks, groups)
    }

    #[test]
    fn lots_keep_input_order_and_collect_their_tasks() {
        let (tasks, groups) = fixture();
        let sections = group_tasks_by_lot(&tasks, &groups);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].lot.title, "Structural Shell");
        assert_eq!(sections[0].tasks.len(), 2);
        assert_eq!(sections[1].lot.title, "Roofing");
        assert_eq!(sections[1].tasks.len(), 1);
    }

    #[test]
    fn lot_range_spans_its_children() {
        let (tasks, groups) = fixture();
        let sections = group_tasks_by_lot(&tasks, &groups);
        let (start, end) = sections[0].range.unwrap();
        assert_eq!(start, dt(2023, 6, 3));
        assert_eq!(end, dt(2023, 6, 20));
    }

    #[test]
    fn childless_lot_has_empty_range_but_keeps_its_section() {
        let (tasks, groups) = fixture();
        let sections = group_tasks_by_lot(&tasks, &groups);
        assert_eq!(sections[2].lot.title, "Electrical");
        assert!(sections[2].tasks.is_empty());
        assert!(sections[2].range.is_none());
    }

    #[test]
    fn orphan_tasks_are_dropped() {
        let (mut tasks, groups) = fixture();
        tasks.push(Task::new(
            Uuid::new_v4(),
            "stray",
            dt(2023, 6, 1),
            dt(2023, 6, 2),
        ));
        let sections = group_tasks_by_lot(&tasks, &groups);
        let total: usize = sections.iter().map(|s| s.tasks.len()).sum();
        assert_eq!(total, 3);
    }
}
