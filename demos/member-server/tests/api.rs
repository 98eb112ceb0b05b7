//! Integration tests for the member server.
//!
//! Each test builds the full router (controllers behind the logging and
//! exception interceptors) and drives it with `oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use exhandler::config::ConfigService;
use exhandler::interceptor::X_REQUEST_ID;
use exhandler::resolver::ERROR_VIEW_HEADER;
use member_server::AppModule;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn app() -> Router {
    AppModule::router(&ConfigService::new()).unwrap()
}

async fn get(uri: &str, accept: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn view(response: &Response) -> &str {
    response
        .headers()
        .get(ERROR_VIEW_HEADER)
        .expect("missing x-error-view")
        .to_str()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[tokio::test]
async fn member_found() {
    let response = get("/api/members/spring", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(X_REQUEST_ID).is_some());
    assert_eq!(
        json_body(response).await,
        json!({"memberId": "spring", "name": "hello spring"})
    );
}

#[tokio::test]
async fn user_fault_json() {
    let response = get("/api/members/user-ex", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "USER-EX", "message": "사용자 에러"})
    );
}

#[tokio::test]
async fn invalid_argument_json() {
    let response = get("/api/members/bad", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "BAD", "message": "잘못 입력 값"})
    );
}

#[tokio::test]
async fn invalid_argument_without_accept_renders_page() {
    let response = get("/api/members/bad", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(view(&response), "error/4xx");
}

#[tokio::test]
async fn runtime_fault_json() {
    let response = get("/api/members/ex", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "EX", "message": "내부 오류"})
    );
}

#[tokio::test]
async fn html_accept_renders_page() {
    let response = get("/api/members/ex", Some("text/html")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(view(&response), "error/500");
}

#[tokio::test]
async fn head_request_has_no_body() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::HEAD)
                .uri("/api/members/user-ex")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

// ---------------------------------------------------------------------------
// Declared and explicit statuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn declared_status_with_reason() {
    let response = get("/api/response-status-ex1", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "BAD-REQUEST", "message": "bad request error!!"})
    );
}

#[tokio::test]
async fn explicit_status_with_message_code() {
    let response = get("/api/response-status-ex2", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "EX", "message": "잘못된 요청 오류입니다. 메시지 사용"})
    );
}

#[tokio::test]
async fn unrouted_path_is_resolved_as_not_found() {
    let response = get("/no-such-page", Some("text/html")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(view(&response), "error/404");

    let response = get("/no-such-page", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"kind": "NOT-FOUND", "message": "no route for /no-such-page"})
    );
}

#[tokio::test]
async fn type_mismatch_is_bad_request() {
    let response = get("/api/default-handler-ex?data=qqq", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "TYPE-MISMATCH");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn default_handler_ok() {
    let response = get("/api/default-handler-ex?data=10", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Error pages and configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_page_endpoint_names_view() {
    let response = get("/error-page/404", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(view(&response), "error-page/404");
}

// ---------------------------------------------------------------------------
// Error page forward
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

#[tokio::test]
async fn bare_status_is_forwarded_to_error_page() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/error-404")
                .header(X_REQUEST_ID, "forward-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(view(&response), "error-page/404");
    assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "forward-1");

    let response = get("/error-500", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(view(&response), "error-page/500");
}

#[tokio::test]
async fn forwarded_request_is_not_logged_again() {
    // Only client requests are logged, and no path is excluded, so the
    // dispatch type alone keeps the error page out of the log.
    let config = ConfigService::new();
    config.set("EXHANDLER_LOG_DISPATCH_TYPES", "REQUEST");
    config.set("EXHANDLER_LOG_EXCLUDE_PATHS", "/css/**");

    let captured = Captured::default();
    let _guard = captured.install();

    let response = AppModule::router(&config)
        .unwrap()
        .oneshot(Request::builder().uri("/error-404").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(view(&response), "error-page/404");

    let logs = captured.text();
    assert!(logs.contains("REQUEST GET /error-404"), "{logs}");
    assert!(logs.contains("forwarding to error page"), "{logs}");
    assert!(logs.contains("errorPage 404"), "{logs}");
    assert!(!logs.contains("REQUEST GET /error-page/404"), "{logs}");
}

#[tokio::test]
async fn configured_forwards_replace_defaults() {
    let config = ConfigService::new();
    config.set("EXHANDLER_ERROR_PAGE_FORWARDS", "500=/error-page/500");

    let response = AppModule::router(&config)
        .unwrap()
        .oneshot(Request::builder().uri("/error-404").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(ERROR_VIEW_HEADER).is_none());
}

#[tokio::test]
async fn configured_views_change_selection() {
    let config = ConfigService::new();
    config.set("EXHANDLER_ERROR_VIEWS", "error/500");

    let response = AppModule::router(&config)
        .unwrap()
        .oneshot(
            Request::builder()
                .uri("/api/members/bad")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(view(&response), "error");
}

#[tokio::test]
async fn configured_message_overrides_default() {
    let config = ConfigService::new();
    config.set("message.error.bad", "bad request message");

    let response = AppModule::router(&config)
        .unwrap()
        .oneshot(
            Request::builder()
                .uri("/api/response-status-ex2")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        json_body(response).await,
        json!({"kind": "EX", "message": "bad request message"})
    );
}

#[tokio::test]
async fn invalid_configuration_is_rejected() {
    let config = ConfigService::new();
    config.set("EXHANDLER_LOG_DISPATCH_TYPES", "ASYNC");
    assert!(AppModule::router(&config).is_err());
}
