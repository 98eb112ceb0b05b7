use crate::common::ErrorResult;
use crate::exception::{ErrorKind, Exception, most_specific};
use crate::resolver::{ErrorResponder, ResolutionRequest, ResolveResult, Resolver};
use axum::http::StatusCode;
use std::sync::Arc;

type HandlerFn = Arc<dyn Fn(&Exception) -> ErrorResult + Send + Sync>;

/// Status used when a handler is registered without one.
///
/// 400 for the invalid-argument family (and `BadRequest`), 404 for
/// `NotFound`, 500 for everything else.
pub fn default_status(kind: ErrorKind) -> StatusCode {
    kind.ancestors()
        .find_map(|k| match k {
            ErrorKind::InvalidArgument | ErrorKind::BadRequest => Some(StatusCode::BAD_REQUEST),
            ErrorKind::NotFound => Some(StatusCode::NOT_FOUND),
            _ => None,
        })
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A handler registered for one error kind
#[derive(Clone)]
pub struct ExceptionHandler {
    kind: ErrorKind,
    status: StatusCode,
    handler: HandlerFn,
}

impl ExceptionHandler {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn handle(&self, exception: &Exception) -> ErrorResult {
        (self.handler)(exception)
    }
}

impl std::fmt::Debug for ExceptionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionHandler")
            .field("kind", &self.kind)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Registry of exception handlers, one per kind.
///
/// Built once at startup and then only read.
///
/// # Example
/// ```
/// use exhandler::common::ErrorResult;
/// use exhandler::exception::ErrorKind;
/// use exhandler::resolver::ExceptionAdvice;
/// use axum::http::StatusCode;
///
/// let advice = ExceptionAdvice::new()
///     .handle(ErrorKind::InvalidArgument, |e| ErrorResult::new("BAD", e.message()))
///     .handle_with_status(ErrorKind::UserFault, StatusCode::BAD_REQUEST, |e| {
///         ErrorResult::new("USER-EX", e.message())
///     });
///
/// assert_eq!(advice.select(ErrorKind::TypeMismatch).unwrap().kind(), ErrorKind::InvalidArgument);
/// assert!(advice.select(ErrorKind::Generic).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExceptionAdvice {
    handlers: Vec<ExceptionHandler>,
}

impl ExceptionAdvice {
    pub fn new() -> Self {
        Self::default()
    }

    /// `InvalidArgument -> 400 BAD`, `UserFault -> 400 USER-EX` and the
    /// catch-all `Generic -> 500 EX` with a fixed message.
    pub fn standard() -> Self {
        Self::new()
            .handle(ErrorKind::InvalidArgument, |e| {
                ErrorResult::new("BAD", e.message())
            })
            .handle_with_status(
                ErrorKind::UserFault,
                StatusCode::BAD_REQUEST,
                ErrorResult::from_exception,
            )
            .handle(ErrorKind::Generic, |_| ErrorResult::new("EX", "내부 오류"))
    }

    /// Register `handler` for `kind` with [`default_status`].
    pub fn handle<F>(self, kind: ErrorKind, handler: F) -> Self
    where
        F: Fn(&Exception) -> ErrorResult + Send + Sync + 'static,
    {
        self.handle_with_status(kind, default_status(kind), handler)
    }

    /// Register `handler` for `kind`. A later registration for the same kind
    /// replaces the earlier one.
    pub fn handle_with_status<F>(mut self, kind: ErrorKind, status: StatusCode, handler: F) -> Self
    where
        F: Fn(&Exception) -> ErrorResult + Send + Sync + 'static,
    {
        let handler = ExceptionHandler {
            kind,
            status,
            handler: Arc::new(handler),
        };
        match self.handlers.iter_mut().find(|h| h.kind == kind) {
            Some(existing) => {
                tracing::warn!(kind = %kind, "replacing exception handler");
                *existing = handler;
            }
            None => self.handlers.push(handler),
        }
        self
    }

    /// Handler for the registered kind nearest to `kind`.
    pub fn select(&self, kind: ErrorKind) -> Option<&ExceptionHandler> {
        most_specific(kind, self.handlers.iter().map(|h| (h.kind, h))).map(|(_, h)| h)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Dispatches to the most specific handler in an [`ExceptionAdvice`].
pub struct TypedHandlerResolver {
    advice: ExceptionAdvice,
    responder: ErrorResponder,
}

impl TypedHandlerResolver {
    pub fn new(advice: ExceptionAdvice, responder: ErrorResponder) -> Self {
        Self { advice, responder }
    }
}

impl Resolver for TypedHandlerResolver {
    fn name(&self) -> &str {
        "TypedHandlerResolver"
    }

    fn resolve(&self, request: &ResolutionRequest) -> ResolveResult {
        let exception = request.exception();
        let Some(handler) = self.advice.select(exception.kind()) else {
            return Ok(None);
        };

        tracing::error!(
            kind = %exception.kind(),
            handler_kind = %handler.kind(),
            path = request.path(),
            causes = ?exception.cause_chain(),
            "[exceptionHandle] {}",
            exception
        );

        let body = handler.handle(exception);
        self.responder.respond(request, handler.status(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolutionResult;
    use serde_json::json;

    fn resolve(resolver: &TypedHandlerResolver, exception: Exception) -> Option<ResolutionResult> {
        let request =
            ResolutionRequest::new("/api/members/x", exception).with_accept("application/json");
        resolver.resolve(&request).unwrap()
    }

    #[test]
    fn test_default_status() {
        assert_eq!(default_status(ErrorKind::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(default_status(ErrorKind::TypeMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(default_status(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(default_status(ErrorKind::UserFault), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(default_status(ErrorKind::Generic), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_standard_advice() {
        let resolver = TypedHandlerResolver::new(ExceptionAdvice::standard(), ErrorResponder::default());

        assert_eq!(
            resolve(&resolver, Exception::invalid_argument("잘못 입력 값")),
            Some(ResolutionResult::Body {
                status: StatusCode::BAD_REQUEST,
                payload: json!({"kind": "BAD", "message": "잘못 입력 값"}),
            })
        );
        assert_eq!(
            resolve(&resolver, Exception::user("사용자 에러")),
            Some(ResolutionResult::Body {
                status: StatusCode::BAD_REQUEST,
                payload: json!({"kind": "USER-EX", "message": "사용자 에러"}),
            })
        );
        assert_eq!(
            resolve(&resolver, Exception::runtime("잘못된 사용자")),
            Some(ResolutionResult::Body {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                payload: json!({"kind": "EX", "message": "내부 오류"}),
            })
        );
    }

    #[test]
    fn test_specific_handler_beats_generic() {
        let advice = ExceptionAdvice::new()
            .handle(ErrorKind::Generic, |_| ErrorResult::new("EX", "generic"))
            .handle(ErrorKind::NotFound, |e| ErrorResult::new("MISSING", e.message()));
        let resolver = TypedHandlerResolver::new(advice, ErrorResponder::default());

        assert_eq!(
            resolve(&resolver, Exception::not_found("member")),
            Some(ResolutionResult::Body {
                status: StatusCode::NOT_FOUND,
                payload: json!({"kind": "MISSING", "message": "member"}),
            })
        );
    }

    #[test]
    fn test_ancestor_handler_used_for_child() {
        let resolver = TypedHandlerResolver::new(ExceptionAdvice::standard(), ErrorResponder::default());
        assert_eq!(
            resolve(&resolver, Exception::type_mismatch("data")),
            Some(ResolutionResult::Body {
                status: StatusCode::BAD_REQUEST,
                payload: json!({"kind": "BAD", "message": "data"}),
            })
        );
    }

    #[test]
    fn test_no_handler_is_unresolved() {
        let advice = ExceptionAdvice::new()
            .handle(ErrorKind::UserFault, |e| ErrorResult::new("USER-EX", e.message()));
        let resolver = TypedHandlerResolver::new(advice, ErrorResponder::default());
        assert!(resolve(&resolver, Exception::runtime("boom")).is_none());
    }

    #[test]
    fn test_reregistration_replaces_handler() {
        let advice = ExceptionAdvice::standard().handle_with_status(
            ErrorKind::UserFault,
            StatusCode::CONFLICT,
            |e| ErrorResult::new("USER", e.message()),
        );
        assert_eq!(advice.len(), 3);
        assert_eq!(advice.select(ErrorKind::UserFault).unwrap().status(), StatusCode::CONFLICT);
    }
}
