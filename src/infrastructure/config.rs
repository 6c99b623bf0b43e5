use crate::domain::error::{DashboardError, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "config/dashboard";

const TOKEN_VAR: &str = "CIRRUS_API_TOKEN";
const COOKIE_VAR: &str = "CIRRUS_COOKIE_HEADER";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub cirrus: CirrusSettings,
    pub query: QuerySettings,
    pub report: ReportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CirrusSettings {
    pub endpoint: String,
    pub platform: String,
    pub owner: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuerySettings {
    pub repository: String,
    pub branch: String,
    /// Builds requested from upstream
    pub query_limit: u32,
    /// Builds kept once filtered
    pub limit: usize,
    pub pattern: String,
    pub fetch_concurrency: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
}

/// Load settings: defaults, then `file` (optional), then `DASHBOARD__*` variables,
/// then `overrides`.
///
/// Override keys use the dotted form, e.g. `query.branch`.
pub fn load_settings(file: &str, overrides: &[(&str, String)]) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder()
        .set_default("cirrus.endpoint", "https://api.cirrus-ci.com/graphql")?
        .set_default("cirrus.platform", "github")?
        .set_default("cirrus.owner", "SonarSource")?
        .set_default("query.repository", "peachee-cfamily")?
        .set_default("query.branch", "cirrusci")?
        .set_default("query.query_limit", 30)?
        .set_default("query.limit", 20)?
        .set_default("query.pattern", "Cron")?
        .set_default("query.fetch_concurrency", 1)?
        .set_default("report.output_dir", "/tmp/peachee_dashboard")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    for (key, value) in overrides {
        builder = builder.set_override(*key, value.as_str())?;
    }

    Ok(builder.build()?.try_deserialize()?)
}

/// How requests authenticate against the Cirrus API
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    Token(String),
    Cookies(Vec<(String, String)>),
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::var(TOKEN_VAR).ok(), std::env::var(COOKIE_VAR).ok())
    }

    /// A token wins over a cookie header when both are set
    pub fn from_vars(token: Option<String>, cookie_header: Option<String>) -> Result<Self> {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            tracing::info!("Using Cirrus CI API with token");
            return Ok(Credentials::Token(token.trim().to_string()));
        }

        if let Some(header) = cookie_header {
            tracing::info!("Using Cirrus CI API with cookies");
            return Ok(Credentials::Cookies(parse_cookies(&header)?));
        }

        Err(DashboardError::Configuration(format!(
            "{TOKEN_VAR} or {COOKIE_VAR} must be set on the environment"
        )))
    }

    /// Header name and value to attach to every request
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Credentials::Token(token) => ("Authorization", format!("Bearer {token}")),
            Credentials::Cookies(cookies) => {
                let value = cookies
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                ("Cookie", value)
            }
        }
    }
}

fn parse_cookies(header: &str) -> Result<Vec<(String, String)>> {
    let cookies = header
        .split(';')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(DashboardError::Configuration(format!(
                "malformed cookie '{}' in {COOKIE_VAR}",
                pair.trim()
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    if cookies.is_empty() {
        return Err(DashboardError::Configuration(format!("{COOKIE_VAR} is empty")));
    }
    Ok(cookies)
}
