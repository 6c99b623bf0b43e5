// Error taxonomy shared by every layer

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Invalid build pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),
}

impl DashboardError {
    /// Short, stable name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Pattern(_) => "pattern",
            DashboardError::Upstream(_) => "upstream",
            DashboardError::Data(_) => "data",
            DashboardError::Configuration(_) => "configuration",
            DashboardError::Connectivity(_) => "connectivity",
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            DashboardError::Connectivity(err.to_string())
        } else {
            DashboardError::Upstream(err.to_string())
        }
    }
}
