// Build domain model
use super::error::{DashboardError, Result};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub id: String,
    pub title: String,
    pub created_at_ms: i64,
    pub status: String,
}

impl Build {
    pub fn new(id: String, title: String, created_at_ms: i64, status: String) -> Self {
        Self {
            id,
            title,
            created_at_ms,
            status,
        }
    }

    /// Creation time as a UTC date
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at_ms).ok_or_else(|| {
            DashboardError::Data(format!(
                "build {} has an out of range timestamp {}",
                self.id, self.created_at_ms
            ))
        })
    }
}
