// Application state for HTTP handlers
use crate::domain::dashboard::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    /// Rendered once at startup; the dashboard never changes afterwards
    pub index_html: String,
}
