use crate::common::ErrorResult;
use crate::exception::{ErrorKind, most_specific};
use crate::resolver::{ErrorResponder, ResolutionRequest, ResolveResult, Resolver};
use axum::http::StatusCode;

/// Status (and optional reason) declared for an error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredStatus {
    pub status: StatusCode,
    pub reason: Option<String>,
}

/// Answers with the status declared for the exception's kind.
///
/// A declaration also covers every descendant kind, and the declaration for
/// the nearest kind wins. With `InvalidArgument -> 400` and
/// `TypeMismatch -> 422`, a `TypeMismatch` resolves to 422 while a plain
/// `InvalidArgument` resolves to 400.
pub struct DeclaredStatusResolver {
    declarations: Vec<(ErrorKind, DeclaredStatus)>,
    responder: ErrorResponder,
}

impl DeclaredStatusResolver {
    pub fn new(responder: ErrorResponder) -> Self {
        Self {
            declarations: Vec::new(),
            responder,
        }
    }

    /// `BadRequest -> 400 "bad request error!!"`, `NotFound -> 404` and
    /// `TypeMismatch -> 400`.
    pub fn standard(responder: ErrorResponder) -> Self {
        Self::new(responder)
            .declare(
                ErrorKind::BadRequest,
                StatusCode::BAD_REQUEST,
                Some("bad request error!!"),
            )
            .declare(ErrorKind::NotFound, StatusCode::NOT_FOUND, None)
            .declare(ErrorKind::TypeMismatch, StatusCode::BAD_REQUEST, None)
    }

    /// Declare (or redeclare) the status for `kind`.
    pub fn declare(mut self, kind: ErrorKind, status: StatusCode, reason: Option<&str>) -> Self {
        let declared = DeclaredStatus {
            status,
            reason: reason.map(str::to_string),
        };
        match self.declarations.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = declared,
            None => self.declarations.push((kind, declared)),
        }
        self
    }

    pub fn declared(&self, kind: ErrorKind) -> Option<&DeclaredStatus> {
        most_specific(kind, self.declarations.iter().map(|(k, d)| (*k, d))).map(|(_, d)| d)
    }
}

impl Resolver for DeclaredStatusResolver {
    fn name(&self) -> &str {
        "DeclaredStatusResolver"
    }

    fn resolve(&self, request: &ResolutionRequest) -> ResolveResult {
        let exception = request.exception();
        let Some(declared) = self.declared(exception.kind()) else {
            return Ok(None);
        };

        let message = match &declared.reason {
            Some(reason) => self.responder.message(reason),
            None => self.responder.message(exception.message()),
        };

        tracing::warn!(
            kind = %exception.kind(),
            status = declared.status.as_u16(),
            path = request.path(),
            "resolved declared status: {}",
            message
        );

        self.responder.respond(
            request,
            declared.status,
            &ErrorResult::new(exception.kind().label(), message),
        )
    }
}
