//! Error page endpoints, the targets of an error-page re-dispatch.

use exhandler::interceptor::DispatchType;
use exhandler::page::ForwardedError;
use exhandler::prelude::*;

pub struct ErrorPageController;

impl ErrorPageController {
    pub fn router() -> Router {
        Router::new()
            .route("/error-page/404", axum::routing::get(Self::error_page_404))
            .route("/error-page/500", axum::routing::get(Self::error_page_500))
    }

    async fn error_page_404(request: axum::extract::Request) -> Response {
        Self::render(&request, StatusCode::NOT_FOUND, "error-page/404")
    }

    async fn error_page_500(request: axum::extract::Request) -> Response {
        Self::render(&request, StatusCode::INTERNAL_SERVER_ERROR, "error-page/500")
    }

    fn render(request: &axum::extract::Request, status: StatusCode, view: &str) -> Response {
        let forwarded = request.extensions().get::<ForwardedError>();
        tracing::info!(
            view,
            dispatch = %DispatchType::of(request),
            path = request.uri().path(),
            request_uri = forwarded.map(|f| f.request_uri.as_str()),
            error_status = forwarded.map(|f| f.status.as_u16()),
            "errorPage {}",
            status.as_u16()
        );
        ResolutionResult::Rendered {
            status,
            view: view.to_string(),
        }
        .into_response()
    }
}
