// Dashboard service - Use case for building the health dashboard
use crate::application::build_filter::BuildFilter;
use crate::application::ci_repository::CiRepository;
use crate::application::matrix_builder::MatrixBuilder;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::Result;
use crate::infrastructure::config::QuerySettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn CiRepository>,
    query: QuerySettings,
    filter: BuildFilter,
}

impl DashboardService {
    /// `filter` is compiled by the caller so a bad pattern is reported before any request
    pub fn new(
        repository: Arc<dyn CiRepository>,
        query: QuerySettings,
        filter: BuildFilter,
    ) -> Self {
        Self { repository, query, filter }
    }

    pub async fn get_dashboard(&self) -> Result<Dashboard> {
        let builds = self
            .repository
            .get_builds(&self.query.repository, &self.query.branch, self.query.query_limit)
            .await?;
        let mut builds = self.filter.filter(builds);
        builds.truncate(self.query.limit);

        let dashboard = MatrixBuilder::new(self.repository.clone(), self.query.fetch_concurrency)
            .build(&builds)
            .await?;

        tracing::info!("Got {} entries", dashboard.len());
        for (project, health) in dashboard.project_health() {
            tracing::debug!("{}: {}%", project, health);
        }
        Ok(dashboard)
    }
}
