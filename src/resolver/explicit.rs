use crate::common::ErrorResult;
use crate::resolver::{ErrorResponder, ResolutionRequest, ResolveResult, Resolver};

/// Answers for exceptions raised with an explicit status, see
/// [`Exception::with_status`](crate::exception::Exception::with_status).
pub struct ExplicitStatusResolver {
    responder: ErrorResponder,
}

impl ExplicitStatusResolver {
    pub fn new(responder: ErrorResponder) -> Self {
        Self { responder }
    }
}

impl Resolver for ExplicitStatusResolver {
    fn name(&self) -> &str {
        "ExplicitStatusResolver"
    }

    fn resolve(&self, request: &ResolutionRequest) -> ResolveResult {
        let exception = request.exception();
        let Some(status) = exception.status() else {
            return Ok(None);
        };

        let message = self.responder.message(exception.message());
        tracing::warn!(
            status = status.as_u16(),
            path = request.path(),
            causes = ?exception.cause_chain(),
            "resolved explicit status: {}",
            message
        );

        self.responder.respond(
            request,
            status,
            &ErrorResult::new(exception.kind().label(), message),
        )
    }
}
