// Build filter - Keeps builds whose title matches a pattern
use crate::domain::build::Build;
use crate::domain::error::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct BuildFilter {
    pattern: Regex,
}

impl BuildFilter {
    /// Compile `pattern`. Fails with `DashboardError::Pattern` before anything is fetched.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// True when the pattern matches at the start of the title (not necessarily all of it)
    pub fn matches(&self, title: &str) -> bool {
        self.pattern.find(title).is_some_and(|m| m.start() == 0)
    }

    pub fn filter(&self, builds: Vec<Build>) -> Vec<Build> {
        builds
            .into_iter()
            .filter(|b| self.matches(&b.title))
            .inspect(|b| tracing::debug!("Found build {} ({})", b.title, b.status))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DashboardError;

    fn build(id: &str, title: &str) -> Build {
        Build::new(id.to_string(), title.to_string(), 0, "COMPLETED".to_string())
    }

    #[test]
    fn test_filter_keeps_matching_titles_in_order() {
        let filter = BuildFilter::new("^Cron").unwrap();
        let builds = vec![
            build("1", "Cron nightly"),
            build("2", "Nightly run"),
            build("3", "Cron weekly"),
        ];

        let kept: Vec<_> = filter.filter(builds).into_iter().map(|b| b.id).collect();
        assert_eq!(kept, ["1", "3"]);
    }

    #[test]
    fn test_match_is_anchored_at_start() {
        let filter = BuildFilter::new("Cron").unwrap();

        assert!(filter.matches("Cron nightly"));
        assert!(filter.matches("Cronjob"));
        assert!(!filter.matches("Nightly Cron"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(BuildFilter::new("Cron("), Err(DashboardError::Pattern(_))));
    }
}
