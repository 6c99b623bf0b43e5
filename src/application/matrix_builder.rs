// Matrix builder - Folds builds and their tasks into a Dashboard
use crate::application::ci_repository::CiRepository;
use crate::domain::build::Build;
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::error::Result;
use chrono::{DateTime, Utc};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;

#[derive(Clone)]
pub struct MatrixBuilder {
    repository: Arc<dyn CiRepository>,
    concurrency: usize,
}

impl MatrixBuilder {
    /// `concurrency` caps in-flight task fetches; 1 fetches strictly one build at a time
    pub fn new(repository: Arc<dyn CiRepository>, concurrency: usize) -> Self {
        Self {
            repository,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch the tasks of every build and assemble the matrix.
    ///
    /// Rows come out in the order of `builds` whatever the concurrency. The first
    /// failed fetch aborts the whole construction.
    pub async fn build(&self, builds: &[Build]) -> Result<Dashboard> {
        let entries: Vec<(DateTime<Utc>, Row)> = futures::stream::iter(builds)
            .map(|build| self.fetch_row(build))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        Ok(Dashboard::from_entries(entries))
    }

    async fn fetch_row(&self, build: &Build) -> Result<(DateTime<Utc>, Row)> {
        let date = build.created_at()?;

        tracing::info!("Querying {}", build.id);
        let tasks = self.repository.get_tasks(&build.id).await?;

        // a repeated task name in one build keeps the last occurrence
        let row = tasks.into_iter().map(|t| (t.name.clone(), t)).collect();
        Ok((date, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ci_repository::fake::FakeRepository;
    use crate::domain::error::DashboardError;
    use crate::domain::task::{Task, TaskStatus};

    fn build(id: &str, ms: i64) -> Build {
        Build::new(id.to_string(), format!("Cron {id}"), ms, "COMPLETED".to_string())
    }

    fn task(name: &str, status: TaskStatus) -> Task {
        Task::new(format!("t-{name}"), name.to_string(), status)
    }

    fn repository() -> FakeRepository {
        FakeRepository::default()
            .with_build(
                build("1", 1_000),
                vec![task("test", TaskStatus::Failed), task("build", TaskStatus::Completed)],
            )
            .with_build(build("2", 2_000), vec![task("Build", TaskStatus::Completed)])
            .with_build(build("3", 3_000), vec![task("build", TaskStatus::Executing)])
    }

    #[tokio::test]
    async fn test_build_matrix() {
        let repo = Arc::new(repository());
        let builder = MatrixBuilder::new(repo.clone(), 1);

        let dashboard = builder.build(&repo.builds).await.unwrap();

        assert_eq!(dashboard.projects(), ["Build", "build", "test"]);
        assert_eq!(dashboard.dates().len(), 3);
        assert_eq!(dashboard.rows().len(), 3);
        assert_eq!(dashboard.dates()[1].timestamp_millis(), 2_000);
        assert_eq!(dashboard.rows()[1].len(), 1);
        assert_eq!(dashboard.date_health(), [Some(50), Some(100), Some(0)]);
        assert_eq!(dashboard.health_for_project("build"), 33);
        assert_eq!(repo.task_calls(), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_concurrent_fetch_preserves_order() {
        let repo = Arc::new(repository());

        let sequential = MatrixBuilder::new(repo.clone(), 1).build(&repo.builds).await.unwrap();
        let concurrent = MatrixBuilder::new(repo.clone(), 8).build(&repo.builds).await.unwrap();

        assert_eq!(sequential.dates(), concurrent.dates());
        assert_eq!(sequential.rows(), concurrent.rows());
        assert_eq!(sequential.projects(), concurrent.projects());
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let repo = Arc::new(repository().failing_on("2"));
        let builder = MatrixBuilder::new(repo.clone(), 1);

        let result = builder.build(&repo.builds).await;

        assert!(matches!(result, Err(DashboardError::Upstream(_))));
        assert_eq!(repo.task_calls(), ["1", "2"]);
    }

    #[tokio::test]
    async fn test_duplicate_task_name_keeps_last() {
        let repo = Arc::new(FakeRepository::default().with_build(
            build("1", 1_000),
            vec![task("lint", TaskStatus::Failed), task("lint", TaskStatus::Completed)],
        ));

        let dashboard = MatrixBuilder::new(repo.clone(), 1).build(&repo.builds).await.unwrap();

        assert_eq!(dashboard.projects(), ["lint"]);
        assert_eq!(dashboard.rows()[0]["lint"].status, TaskStatus::Completed);
    }
}
