//! Endpoints that raise exceptions with declared or explicit statuses, and
//! two that answer with a bare error status for the error page forward.

use axum::extract::rejection::QueryRejection;
use exhandler::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DataParam {
    pub data: i32,
}

pub struct StatusController;

impl StatusController {
    pub fn router() -> Router {
        Router::new()
            .route(
                "/api/response-status-ex1",
                axum::routing::get(Self::response_status_ex1),
            )
            .route(
                "/api/response-status-ex2",
                axum::routing::get(Self::response_status_ex2),
            )
            .route(
                "/api/default-handler-ex",
                axum::routing::get(Self::default_handler_ex),
            )
            .route("/error-ex", axum::routing::get(Self::error_ex))
            .route("/error-404", axum::routing::get(Self::error_404))
            .route("/error-500", axum::routing::get(Self::error_500))
    }

    async fn response_status_ex1() -> Result<String, Exception> {
        Err(Exception::bad_request())
    }

    async fn response_status_ex2() -> Result<String, Exception> {
        Err(Exception::with_status(StatusCode::NOT_FOUND, "error.bad")
            .caused_by(Exception::invalid_argument("")))
    }

    async fn default_handler_ex(
        query: Result<Query<DataParam>, QueryRejection>,
    ) -> Result<&'static str, Exception> {
        let Query(param) = query.map_err(|rejection| Exception::type_mismatch(rejection.body_text()))?;
        tracing::info!(data = param.data, "default handler param");
        Ok("ok")
    }

    async fn error_ex() -> Result<(), Exception> {
        Err(Exception::runtime("Exception 발생"))
    }

    async fn error_404() -> (StatusCode, &'static str) {
        (StatusCode::NOT_FOUND, "404 error!!")
    }

    async fn error_500() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
