// Repository trait for CI build and task data
use crate::domain::build::Build;
use crate::domain::error::Result;
use crate::domain::task::Task;
use async_trait::async_trait;

#[async_trait]
pub trait CiRepository: Send + Sync {
    /// Most recent `limit` builds of `repository` on `branch`, oldest first
    async fn get_builds(
        &self,
        repository: &str,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<Build>>;

    /// Tasks of the latest task group of a build, in upstream order
    async fn get_tasks(&self, build_id: &str) -> Result<Vec<Task>>;
}
