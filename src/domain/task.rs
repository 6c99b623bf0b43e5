// Task domain models
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Created,
    Scheduled,
    Executing,
    Completed,
    Failed,
    Aborted,
    Paused,
    /// Placeholder for a project a build did not report. Never parsed from upstream data.
    Undefined,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "CREATED",
            TaskStatus::Scheduled => "SCHEDULED",
            TaskStatus::Executing => "EXECUTING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Aborted => "ABORTED",
            TaskStatus::Paused => "PAUSED",
            TaskStatus::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status '{0}'")]
pub struct UnknownTaskStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownTaskStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(TaskStatus::Created),
            "SCHEDULED" => Ok(TaskStatus::Scheduled),
            "EXECUTING" => Ok(TaskStatus::Executing),
            "COMPLETED" => Ok(TaskStatus::Completed),
            "FAILED" => Ok(TaskStatus::Failed),
            "ABORTED" => Ok(TaskStatus::Aborted),
            "PAUSED" => Ok(TaskStatus::Paused),
            other => Err(UnknownTaskStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedCommand {
    pub name: String,
    pub status: String,
    pub duration_secs: Option<i64>,
    pub logs_tail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    pub first_failed_command: Option<FailedCommand>,
    pub notifications: Vec<Notification>,
}

impl Task {
    pub fn new(id: String, name: String, status: TaskStatus) -> Self {
        Self {
            id,
            name,
            status,
            first_failed_command: None,
            notifications: Vec::new(),
        }
    }

    /// Stand-in for a project that a build never scheduled
    pub fn undefined(name: &str) -> Self {
        Self::new(String::new(), name.to_string(), TaskStatus::Undefined)
    }

    pub fn with_failed_command(mut self, command: FailedCommand) -> Self {
        self.first_failed_command = Some(command);
        self
    }

    pub fn with_notification(mut self, message: &str) -> Self {
        self.notifications.push(Notification {
            message: message.to_string(),
        });
        self
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(|n| n.message.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("COMPLETED".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert_eq!("PAUSED".parse::<TaskStatus>(), Ok(TaskStatus::Paused));
        assert_eq!(TaskStatus::Executing.to_string(), "EXECUTING");
    }

    #[test]
    fn test_status_parse_rejects_undefined() {
        // UNDEFINED is only ever synthesized locally
        assert_eq!(
            "UNDEFINED".parse::<TaskStatus>(),
            Err(UnknownTaskStatus("UNDEFINED".to_string()))
        );
        assert!("SKIPPED".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_undefined_task() {
        let task = Task::undefined("lint");

        assert_eq!(task.name, "lint");
        assert_eq!(task.status, TaskStatus::Undefined);
        assert!(task.first_failed_command.is_none());
        assert!(task.notifications.is_empty());
        assert!(!task.is_completed());
    }
}
