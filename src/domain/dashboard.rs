// Dashboard domain model - the projects x build-dates matrix
use super::health::{date_health, project_health};
use super::task::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// Tasks reported by one build, keyed by task name
pub type Row = BTreeMap<String, Task>;

/// Read-only health matrix built once from a fixed list of builds.
///
/// Rows stay sparse: a project a build never scheduled has no entry in that
/// row, and [`task_or_undefined`] is the only place that absence is turned
/// into a task.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    projects: Vec<String>,
    dates: Vec<DateTime<Utc>>,
    rows: Vec<Row>,
    date_health: Vec<Option<u32>>,
    project_health: BTreeMap<String, u32>,
}

impl Dashboard {
    /// Build the matrix from `(build date, row)` entries in processing order
    pub fn from_entries(entries: Vec<(DateTime<Utc>, Row)>) -> Self {
        let (dates, rows): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let projects = sorted_projects(&rows);

        let date_health = dates
            .iter()
            .zip(&rows)
            .map(|(date, row)| match date_health(row) {
                Ok(health) => Some(health),
                Err(e) => {
                    tracing::warn!(%date, "No health for build: {}", e);
                    None
                }
            })
            .collect();

        let project_health = projects
            .iter()
            .map(|p| (p.clone(), project_health(p, &rows)))
            .collect();

        Self {
            projects,
            dates,
            rows,
            date_health,
            project_health,
        }
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn dates(&self) -> &[DateTime<Utc>] {
        &self.dates
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Date health per build, aligned with `dates()`. `None` means the build reported no tasks.
    pub fn date_health(&self) -> &[Option<u32>] {
        &self.date_health
    }

    pub fn project_health(&self) -> &BTreeMap<String, u32> {
        &self.project_health
    }

    /// Health of `project` across all builds, 0 for unknown projects
    pub fn health_for_project(&self, project: &str) -> u32 {
        self.project_health.get(project).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Look up `project` in a row, synthesizing an UNDEFINED task when the build did not report it
pub fn task_or_undefined<'a>(row: &'a Row, project: &str) -> Cow<'a, Task> {
    match row.get(project) {
        Some(task) => Cow::Borrowed(task),
        None => Cow::Owned(Task::undefined(project)),
    }
}

// Union of all row keys, sorted on the lower-cased name. Ties keep byte order.
fn sorted_projects(rows: &[Row]) -> Vec<String> {
    let names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut projects: Vec<String> = names.into_iter().map(str::to_string).collect();
    projects.sort_by_key(|p| p.to_lowercase());
    projects
}
