// HTTP request handlers for the report preview
use crate::infrastructure::report::asset;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/dashboard.json", get(dashboard_json))
        .route("/:file", get(static_file))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.clone())
}

pub async fn dashboard_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard.clone())
}

/// `index.html` or one of the embedded report assets
pub async fn static_file(Path(file): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    if file == "index.html" {
        return Html(state.index_html.clone()).into_response();
    }

    let content_type = if file.ends_with(".js") {
        "text/javascript"
    } else if file.ends_with(".css") {
        "text/css"
    } else {
        "application/octet-stream"
    };

    match asset(&file) {
        Some(content) => ([(header::CONTENT_TYPE, content_type)], content).into_response(),
        None => {
            tracing::debug!("Unknown asset requested: {}", file);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{Dashboard, Row};
    use crate::domain::task::{Task, TaskStatus};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::DateTime;
    use tower::ServiceExt;

    fn state() -> Arc<AppState> {
        let mut row = Row::new();
        row.insert(
            "build".to_string(),
            Task::new("1".to_string(), "build".to_string(), TaskStatus::Completed),
        );
        let dashboard =
            Dashboard::from_entries(vec![(DateTime::from_timestamp_millis(1_000).unwrap(), row)]);

        Arc::new(AppState {
            dashboard,
            index_html: "<html>report</html>".to_string(),
        })
    }

    async fn fetch(uri: &str) -> (StatusCode, String) {
        let response = router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(fetch("/healthz").await, (StatusCode::OK, "ok".to_string()));
    }

    #[tokio::test]
    async fn test_index() {
        assert_eq!(fetch("/").await.1, "<html>report</html>");
        assert_eq!(fetch("/index.html").await.1, "<html>report</html>");
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let (status, body) = fetch("/dashboard.json").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["projects"], serde_json::json!(["build"]));
        assert_eq!(json["project_health"]["build"], 100);
        assert_eq!(json["rows"][0]["build"]["status"], "COMPLETED");
    }

    #[tokio::test]
    async fn test_static_assets() {
        let (status, body) = fetch("/actions.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("set_theme"));

        assert_eq!(fetch("/missing.js").await.0, StatusCode::NOT_FOUND);
    }
}
