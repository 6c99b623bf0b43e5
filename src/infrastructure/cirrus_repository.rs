// Cirrus CI repository implementation over the GraphQL API
use crate::application::ci_repository::CiRepository;
use crate::domain::build::Build;
use crate::domain::error::{DashboardError, Result};
use crate::domain::task::{FailedCommand, Task, TaskStatus};
use crate::infrastructure::config::{CirrusSettings, Credentials};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

const VIEWER_QUERY: &str = r#"
query {
    viewer {
        id
    }
}
"#;

const BUILDS_QUERY: &str = r#"
query OwnerRepositoryQuery($platform: String!, $owner: String!, $name: String!, $branch: String, $limit: Int!) {
    ownerRepository(platform: $platform, owner: $owner, name: $name) {
        builds(last: $limit, branch: $branch) {
            edges {
                node {
                    id
                    changeMessageTitle
                    status
                    buildCreatedTimestamp
                }
            }
        }
    }
}
"#;

const TASKS_QUERY: &str = r#"
query BuildByIdQuery($buildId: ID!) {
    build(id: $buildId) {
        latestGroupTasks {
            id
            name
            status
            notifications {
                message
            }
            firstFailedCommand {
                name
                status
                durationInSeconds
                logsTail
            }
        }
    }
}
"#;

#[derive(Debug, Clone)]
pub struct CirrusRepository {
    client: reqwest::Client,
    endpoint: String,
    platform: String,
    owner: String,
    credentials: Credentials,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    #[allow(dead_code)]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerRepositoryData {
    owner_repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    builds: BuildConnection,
}

#[derive(Debug, Deserialize)]
struct BuildConnection {
    edges: Vec<BuildEdge>,
}

#[derive(Debug, Deserialize)]
struct BuildEdge {
    node: BuildNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildNode {
    id: String,
    change_message_title: Option<String>,
    status: String,
    build_created_timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct BuildData {
    build: Option<BuildDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildDetails {
    latest_group_tasks: Vec<TaskNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskNode {
    id: String,
    name: String,
    status: String,
    #[serde(default)]
    notifications: Option<Vec<NotificationNode>>,
    first_failed_command: Option<CommandNode>,
}

#[derive(Debug, Deserialize)]
struct NotificationNode {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandNode {
    name: String,
    status: String,
    duration_in_seconds: Option<i64>,
    logs_tail: Option<Vec<String>>,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(DashboardError::Upstream(format!(
                "Cirrus CI query error: {}",
                messages.join("; ")
            )));
        }

        self.data
            .ok_or_else(|| DashboardError::Upstream("Cirrus CI returned no data".to_string()))
    }
}

impl From<BuildNode> for Build {
    fn from(node: BuildNode) -> Self {
        Build::new(
            node.id,
            node.change_message_title.unwrap_or_default(),
            node.build_created_timestamp,
            node.status,
        )
    }
}

impl TryFrom<TaskNode> for Task {
    type Error = DashboardError;

    fn try_from(node: TaskNode) -> Result<Self> {
        let status: TaskStatus = node.status.parse().map_err(|e| {
            DashboardError::Upstream(format!("task {} ({}): {}", node.name, node.id, e))
        })?;

        let mut task = Task::new(node.id, node.name, status);
        if let Some(command) = node.first_failed_command {
            task = task.with_failed_command(FailedCommand {
                name: command.name,
                status: command.status,
                duration_secs: command.duration_in_seconds,
                logs_tail: command.logs_tail.unwrap_or_default(),
            });
        }
        for notification in node.notifications.unwrap_or_default() {
            task = task.with_notification(&notification.message);
        }
        Ok(task)
    }
}

impl CirrusRepository {
    /// Create the client and check the API accepts our credentials
    pub async fn connect(settings: &CirrusSettings, credentials: Credentials) -> Result<Self> {
        let repository = Self {
            client: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            platform: settings.platform.clone(),
            owner: settings.owner.clone(),
            credentials,
        };

        match repository.execute::<ViewerData>(VIEWER_QUERY, json!({})).await {
            Ok(ViewerData { viewer: Some(_) }) => {
                tracing::info!("Connected to Cirrus CI API");
                Ok(repository)
            }
            Ok(ViewerData { viewer: None }) => Err(DashboardError::Connectivity(
                "Failed to connect to Cirrus CI API".to_string(),
            )),
            Err(e) => Err(DashboardError::Connectivity(format!(
                "Failed to connect to Cirrus CI API: {e}"
            ))),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let (header, value) = self.credentials.header();
        let response = self
            .client
            .post(&self.endpoint)
            .header(header, value)
            .header("Accept", "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Upstream(format!(
                "Cirrus CI query failed with status {status}: {body}"
            )));
        }

        response.json::<GraphQlResponse<T>>().await?.into_data()
    }
}

#[async_trait]
impl CiRepository for CirrusRepository {
    async fn get_builds(
        &self,
        repository: &str,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<Build>> {
        let variables = json!({
            "platform": self.platform,
            "owner": self.owner,
            "name": repository,
            "branch": branch,
            "limit": limit,
        });

        let data: OwnerRepositoryData = self.execute(BUILDS_QUERY, variables).await?;
        let repo = data.owner_repository.ok_or_else(|| {
            DashboardError::Upstream(format!("repository {}/{} not found", self.owner, repository))
        })?;

        let builds: Vec<Build> = repo.builds.edges.into_iter().map(|e| e.node.into()).collect();
        tracing::debug!("Got {} builds for {} on {}", builds.len(), repository, branch);
        Ok(builds)
    }

    async fn get_tasks(&self, build_id: &str) -> Result<Vec<Task>> {
        let data: BuildData = self
            .execute(TASKS_QUERY, json!({ "buildId": build_id }))
            .await?;
        let build = data
            .build
            .ok_or_else(|| DashboardError::Upstream(format!("build {build_id} not found")))?;

        build
            .latest_group_tasks
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<_>>()
            .map_err(|e| match e {
                DashboardError::Upstream(msg) => {
                    DashboardError::Upstream(format!("build {build_id}: {msg}"))
                }
                other => other,
            })
    }
}
