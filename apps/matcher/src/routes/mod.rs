pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/health", get(health::health_handler))
        .route("/api-info", get(handlers::handle_api_info))
        .route("/parse-resume", post(handlers::handle_parse_resume))
        .route(
            "/parse-job-description",
            post(handlers::handle_parse_job_description),
        )
        .route(
            "/extract-resume-text",
            post(handlers::handle_extract_resume_text),
        )
        .route(
            "/batch-parse-resumes",
            post(handlers::handle_batch_parse_resumes),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::pipeline::test_support::ScriptedBackend;
    use crate::pipeline::MatchingPipeline;
    use crate::scoring::config::ScoringConfig;

    const BOUNDARY: &str = "matcher-test-boundary";

    fn app(backend: Arc<ScriptedBackend>) -> Router {
        let config = Config::from_lookup(|key| match key {
            "LLM_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .unwrap();
        let pipeline = MatchingPipeline::new(backend, Arc::new(ScoringConfig::default()));
        build_router(AppState { pipeline, config })
    }

    /// (field name, file name, content); a `None` file name makes a text field.
    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Body {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(parts))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-matcher");
    }

    #[tokio::test]
    async fn test_api_info_lists_endpoints() {
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(Request::get("/api-info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert!(body["endpoints"]["/batch-parse-resumes"].is_string());
        assert_eq!(body["supported_formats"][0], "PDF");
    }

    #[tokio::test]
    async fn test_parse_job_description() {
        let backend = Arc::new(ScriptedBackend::happy());
        let request = Request::post("/parse-job-description")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"job_description": "Backend Engineer, Rust"}"#))
            .unwrap();
        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["job_info"]["skills_required"][0], "Rust");
        assert_eq!(body["job_info"]["experience_required"], "2+ years");
        assert_eq!(body["message"], "Job description parsed successfully");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_job_description_rejected() {
        let backend = Arc::new(ScriptedBackend::happy());
        let request = Request::post("/parse-job-description")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"job_description": "   "}"#))
            .unwrap();
        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_non_pdf() {
        let request = multipart_request(
            "/parse-resume",
            &[
                ("resume_file", Some("resume.docx"), "not a pdf"),
                ("job_description", None, "Backend Engineer"),
            ],
        );
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_parse_resume_requires_job_description() {
        let request = multipart_request(
            "/parse-resume",
            &[
                ("resume_file", Some("resume.pdf"), "%PDF-1.4"),
                ("job_description", None, ""),
            ],
        );
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_resume_requires_file() {
        let request = multipart_request(
            "/parse-resume",
            &[("job_description", None, "Backend Engineer")],
        );
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_reports_each_failure_in_order() {
        let backend = Arc::new(ScriptedBackend::happy());
        let request = multipart_request(
            "/batch-parse-resumes",
            &[
                ("resume_files", Some("first.txt"), "plain text"),
                ("resume_files", Some("second.pdf"), "garbage, not a pdf"),
                ("job_description", None, "Backend Engineer"),
            ],
        );
        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total_processed"], 2);
        assert_eq!(body["successful"], 0);
        assert_eq!(body["failed"], 2);
        assert_eq!(body["results"][0]["filename"], "first.txt");
        assert_eq!(body["results"][0]["success"], false);
        assert!(body["results"][0]["error"]
            .as_str()
            .unwrap()
            .contains("Only PDF files are supported"));
        assert_eq!(body["results"][1]["filename"], "second.pdf");
        assert_eq!(body["results"][1]["success"], false);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_without_files_rejected() {
        let request = multipart_request(
            "/batch-parse-resumes",
            &[("job_description", None, "Backend Engineer")],
        );
        let response = app(Arc::new(ScriptedBackend::happy()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
