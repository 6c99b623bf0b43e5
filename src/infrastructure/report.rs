// HTML report generation and static asset installation
use crate::domain::dashboard::{task_or_undefined, Dashboard};
use crate::domain::status::{status_icon, status_title};
use anyhow::{Context, Result};
use askama::Template;
use std::fs;
use std::path::{Path, PathBuf};

/// Static files the report links to, written next to `index.html`
const ASSETS: &[(&str, &str)] = &[
    ("actions.js", include_str!("../../assets/actions.js")),
    ("dashboard.css", include_str!("../../assets/dashboard.css")),
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    projects: &'a [String],
    rows: Vec<RowView>,
    project_health: Vec<String>,
}

struct RowView {
    date: String,
    health: String,
    cells: Vec<CellView>,
}

struct CellView {
    icon: &'static str,
    title: String,
    status: String,
}

pub fn asset(name: &str) -> Option<&'static str> {
    ASSETS
        .iter()
        .find(|(asset, _)| *asset == name)
        .map(|(_, content)| *content)
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    title: String,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf, title: String) -> Self {
        Self { output_dir, title }
    }

    pub fn render(&self, dashboard: &Dashboard) -> Result<String, askama::Error> {
        let rows = dashboard
            .dates()
            .iter()
            .zip(dashboard.rows())
            .zip(dashboard.date_health())
            .map(|((date, row), health)| RowView {
                date: date.format("%Y-%m-%d %H:%M").to_string(),
                health: health.map_or_else(|| "no data".to_string(), |h| format!("{h}%")),
                cells: dashboard
                    .projects()
                    .iter()
                    .map(|project| {
                        let task = task_or_undefined(row, project);
                        CellView {
                            icon: status_icon(&task).css_class(),
                            title: status_title(&task),
                            status: format!("status-{}", task.status.as_str().to_lowercase()),
                        }
                    })
                    .collect(),
            })
            .collect();

        let project_health = dashboard
            .projects()
            .iter()
            .map(|p| format!("{}%", dashboard.health_for_project(p)))
            .collect();

        IndexTemplate {
            title: &self.title,
            projects: dashboard.projects(),
            rows,
            project_health,
        }
        .render()
    }

    /// Write `index.html` and any missing static assets into the output directory
    pub fn write(&self, dashboard: &Dashboard) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        tracing::info!("Generating index.html");
        let html = self.render(dashboard).context("Failed to render report")?;
        let index = self.output_dir.join("index.html");
        fs::write(&index, html).with_context(|| format!("Failed to write {}", index.display()))?;

        install_assets(&self.output_dir)?;
        Ok(index)
    }
}

// Existing files are left alone so local edits to them survive regeneration
fn install_assets(output_dir: &Path) -> Result<()> {
    for (name, content) in ASSETS {
        let target = output_dir.join(name);
        if target.exists() {
            continue;
        }

        tracing::info!("Installing {}", target.display());
        fs::write(&target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }
    Ok(())
}
