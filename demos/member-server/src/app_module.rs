use crate::modules::member::{MemberController, MemberService};
use crate::modules::page::ErrorPageController;
use crate::modules::status::StatusController;
use exhandler::prelude::*;
use tower::Layer;

/// Message for the `error.bad` code used by `/api/response-status-ex2`.
pub const ERROR_BAD_MESSAGE: &str = "잘못된 요청 오류입니다. 메시지 사용";

/// Error page forwards used when none are configured.
fn default_forwards() -> ErrorPageForwards {
    ErrorPageForwards::new()
        .forward(StatusCode::NOT_FOUND, "/error-page/404")
        .forward(StatusCode::INTERNAL_SERVER_ERROR, "/error-page/500")
}

async fn no_route(uri: axum::http::Uri) -> Exception {
    Exception::not_found(format!("no route for {}", uri.path()))
}

pub struct AppModule;

impl AppModule {
    /// Builds the application router: every controller, behind the logging
    /// and exception interceptors, wrapped by the error page forward.
    pub fn router(config: &ConfigService) -> exhandler::Result<Router> {
        let mut settings = ResolutionSettings::from_config(config)?;
        if !settings.messages.contains("error.bad") {
            settings.messages = settings.messages.with("error.bad", ERROR_BAD_MESSAGE);
        }

        let responder = ErrorResponder::from_settings(&settings);
        let chain = ResolverChain::standard(responder.clone(), ExceptionAdvice::standard());
        tracing::info!(resolvers = ?chain.names(), "exception resolvers registered");

        let mut forwards = settings.error_page_forwards();
        if forwards.is_empty() {
            forwards = default_forwards();
        }

        let member_controller = Arc::new(MemberController::new(Arc::new(MemberService::new())));

        let app = Router::new()
            .nest(
                MemberController::base_path(),
                MemberController::router(member_controller),
            )
            .merge(StatusController::router())
            .merge(ErrorPageController::router())
            .fallback(no_route)
            .layer(InterceptorLayer::new(vec![
                Box::new(LoggingInterceptor::from_settings(&settings)),
                Box::new(ExceptionInterceptor::new(ResolvingExceptionFilter::new(
                    chain, responder,
                ))),
            ]));

        // Outermost, so a forward goes through routing and the interceptors again.
        Ok(Router::new().fallback_service(ErrorPageLayer::new(forwards).layer(app)))
    }
}
