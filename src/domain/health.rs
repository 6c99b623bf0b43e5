// Completion health scores
use super::dashboard::Row;
use super::error::{DashboardError, Result};

/// Percentage of the row's reported tasks that completed.
///
/// Scored against the tasks the build actually reported, not the full project
/// list. An empty row has no meaningful score and yields `DashboardError::Data`.
pub fn date_health(row: &Row) -> Result<u32> {
    if row.is_empty() {
        return Err(DashboardError::Data(
            "cannot score a build without reported tasks".to_string(),
        ));
    }

    let completed = row.values().filter(|t| t.is_completed()).count();
    Ok(percentage(completed, row.len()))
}

/// Percentage of all builds in which `project` completed.
///
/// A build that did not report the project counts as not completed.
pub fn project_health(project: &str, rows: &[Row]) -> u32 {
    if rows.is_empty() {
        return 0;
    }

    let completed = rows
        .iter()
        .filter(|row| row.get(project).is_some_and(|t| t.is_completed()))
        .count();
    percentage(completed, rows.len())
}

fn percentage(part: usize, total: usize) -> u32 {
    (100 * part / total) as u32
}
