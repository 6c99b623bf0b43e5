// Command line arguments
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ci-health-dashboard",
    version,
    about = "Render a health dashboard from Cirrus CI builds"
)]
pub struct Cli {
    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Settings file, without extension
    #[arg(long, default_value = crate::infrastructure::config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Cirrus CI API URL
    #[arg(long)]
    pub cirrus_api: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repository: Option<String>,

    /// Branch name
    #[arg(long)]
    pub branch: Option<String>,

    /// GraphQL query limit
    #[arg(long)]
    pub query_limit: Option<u32>,

    /// Number of builds to list
    #[arg(long)]
    pub limit: Option<usize>,

    /// Build title pattern, matched from the start of the title
    #[arg(long)]
    pub pattern: Option<String>,

    /// Maximum number of builds whose tasks are fetched at once
    #[arg(long)]
    pub fetch_concurrency: Option<usize>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Serve the generated report on this address once written
    #[arg(long, value_name = "ADDR")]
    pub serve: Option<SocketAddr>,
}

impl Cli {
    /// Settings keys explicitly given on the command line
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        let mut set = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                overrides.push((key, value));
            }
        };

        set("cirrus.endpoint", self.cirrus_api.clone());
        set("query.repository", self.repository.clone());
        set("query.branch", self.branch.clone());
        set("query.query_limit", self.query_limit.map(|v| v.to_string()));
        set("query.limit", self.limit.map(|v| v.to_string()));
        set("query.pattern", self.pattern.clone());
        set("query.fetch_concurrency", self.fetch_concurrency.map(|v| v.to_string()));
        set(
            "report.output_dir",
            self.output_dir.as_ref().map(|p| p.display().to_string()),
        );

        overrides
    }
}
