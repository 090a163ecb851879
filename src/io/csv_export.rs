use crate::layout::LotSection;
use std::path::Path;

/// Map a progress percentage back to a human-readable status string.
fn progress_to_status(progress: u8) -> &'static str {
    if progress >= 100 {
        "Finished"
    } else if progress >= 50 {
        "In Progress"
    } else if progress >= 25 {
        "Released"
    } else {
        "Not Started"
    }
}

/// Export the plan's tasks to a semicolon-delimited CSV file, lot by lot.
///
/// Columns: Lot ; Task Label ; Start Date ; End Date ; Status
/// Dates are formatted as DD/MM/YYYY.
/// Returns the number of task rows written.
pub fn export_csv(sections: &[LotSection], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    // Write header
    wtr.write_record(["Lot", "Task Label", "Start Date", "End Date", "Status"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    let mut written = 0;
    for section in sections {
        for task in &section.tasks {
            wtr.write_record([
                &section.lot.title,
                &task.title,
                &task.start.format("%d/%m/%Y").to_string(),
                &task.end.format("%d/%m/%Y").to_string(),
                progress_to_status(task.progress),
            ])
            .map_err(|e| format!("Failed to write task '{}': {}", task.title, e))?;
            written += 1;
        }
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(written)
}
