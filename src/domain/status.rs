// Per-task display classification for the report
use super::task::Task;

const AGENT_DISCONNECTED: &str = "CI agent stopped responding!";
const CONTEXT_CANCELED: &str = "Context canceled!";
const TIMED_OUT: &str = "Timed out!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Git,
    Hammer,
    Bug,
    CloudUpload,
    Terminal,
    Gear,
    /// Failed command that has no dedicated icon
    List,
    Disconnected,
    Pending,
}

impl StatusIcon {
    /// Bootstrap Icons class used by the report
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusIcon::Git => "bi-git",
            StatusIcon::Hammer => "bi-hammer",
            StatusIcon::Bug => "bi-bug",
            StatusIcon::CloudUpload => "bi-cloud-upload",
            StatusIcon::Terminal => "bi-terminal",
            StatusIcon::Gear => "bi-gear",
            StatusIcon::List => "bi-list-ul",
            StatusIcon::Disconnected => "bi-plug",
            StatusIcon::Pending => "bi-search",
        }
    }

    fn for_command(name: &str) -> Option<Self> {
        match name {
            "clone" | "checkout" => Some(StatusIcon::Git),
            "build" => Some(StatusIcon::Hammer),
            "test" | "analyze" => Some(StatusIcon::Bug),
            "upload_caches" => Some(StatusIcon::CloudUpload),
            "main" => Some(StatusIcon::Terminal),
            "setup" => Some(StatusIcon::Gear),
            _ => None,
        }
    }
}

/// Icon for a task cell. A failed command always takes precedence over notifications.
pub fn status_icon(task: &Task) -> StatusIcon {
    if let Some(command) = &task.first_failed_command {
        return StatusIcon::for_command(&command.name).unwrap_or(StatusIcon::List);
    }

    match task.last_notification() {
        Some(AGENT_DISCONNECTED) => StatusIcon::Disconnected,
        _ => StatusIcon::Pending,
    }
}

/// Hover title for a task cell
pub fn status_title(task: &Task) -> String {
    let mut extra = task.last_notification().unwrap_or_default();

    match &task.first_failed_command {
        Some(command) => {
            let log_tail = command.logs_tail.last().map(String::as_str).unwrap_or_default();
            if log_tail == CONTEXT_CANCELED || log_tail == TIMED_OUT {
                extra = log_tail;
            }
            format!("{} {} {}", command.name, command.status, extra)
        }
        None => format!("{} {}", task.status, extra),
    }
}
