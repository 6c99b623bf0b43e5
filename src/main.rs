// Main entry point - Dependency injection and report generation
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::build_filter::BuildFilter;
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::infrastructure::cirrus_repository::CirrusRepository;
use crate::infrastructure::config::{load_settings, Credentials, Settings};
use crate::infrastructure::report::ReportWriter;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Cli;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings(&cli.config, &cli.overrides())?;

    let dashboard = match build_dashboard(&settings).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!(kind = e.kind(), "{}", e);
            return Err(e.into());
        }
    };

    if dashboard.is_empty() {
        tracing::warn!("No build matched '{}'", settings.query.pattern);
    }

    let writer = ReportWriter::new(
        settings.report.output_dir.clone(),
        format!("{} @ {}", settings.query.repository, settings.query.branch),
    );
    let index = writer.write(&dashboard)?;
    tracing::info!("Report written to {}", index.display());

    if let Some(addr) = cli.serve {
        let state = Arc::new(AppState {
            index_html: writer.render(&dashboard)?,
            dashboard,
        });

        tracing::info!("Serving report on http://{}", addr);
        axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;
    }

    Ok(())
}

async fn build_dashboard(settings: &Settings) -> Result<Dashboard, DashboardError> {
    // A bad pattern is reported before credentials are read or the API is contacted
    let filter = BuildFilter::new(&settings.query.pattern)?;
    let credentials = Credentials::from_env()?;
    let repository = Arc::new(CirrusRepository::connect(&settings.cirrus, credentials).await?);

    DashboardService::new(repository, settings.query.clone(), filter)
        .get_dashboard()
        .await
}
