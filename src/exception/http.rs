use crate::common::ErrorResult;
use crate::exception::ExceptionFilter;
use crate::resolver::{ErrorResponder, Resolution, ResolutionRequest, ResolverChain};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The default exception filter: runs the resolver chain and falls back to a
/// 500 when nothing resolves the exception
pub struct ResolvingExceptionFilter {
    chain: ResolverChain,
    responder: ErrorResponder,
}

impl ResolvingExceptionFilter {
    pub fn new(chain: ResolverChain, responder: ErrorResponder) -> Self {
        Self { chain, responder }
    }

    fn fallback(&self, request: &ResolutionRequest) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = ErrorResult::new(
            request.exception().kind().label(),
            status.canonical_reason().unwrap_or("Internal Server Error"),
        );

        match self.responder.respond(request, status, &body) {
            Ok(Some(result)) => result.into_response(),
            Ok(None) => status.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

impl ExceptionFilter for ResolvingExceptionFilter {
    fn catch(&self, request: &ResolutionRequest) -> Response {
        match self.chain.resolve(request) {
            Ok(Resolution::Resolved { result, .. }) => result.into_response(),
            Ok(Resolution::Unresolved) => self.fallback(request),
            Err(e) => e.into_response(),
        }
    }
}
