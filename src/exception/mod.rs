use crate::resolver::ResolutionRequest;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub mod http;
mod kind;

pub use kind::{ErrorKind, most_specific};

/// An error raised by a request handler.
///
/// Carries a [`ErrorKind`], a message and an optional cause. An exception may
/// also be raised with an explicit status, in which case the explicit-status
/// resolver answers with that status and message directly.
///
/// Returning an `Exception` from an axum handler does not produce the final
/// response by itself: the response is marked with a [`RaisedException`] and the
/// [`ExceptionInterceptor`](crate::interceptor::ExceptionInterceptor) resolves it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Exception {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    #[source]
    cause: Option<Box<Exception>>,
}

impl Exception {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            cause: None,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generic, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserFault, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn bad_request() -> Self {
        Self::new(ErrorKind::BadRequest, "")
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    /// A runtime fault raised together with the status the client should see.
    ///
    /// `reason` may be a message code, translated by the configured
    /// [`MessageSource`](crate::config::MessageSource).
    pub fn with_status(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::runtime(reason)
        }
    }

    pub fn caused_by(mut self, cause: Exception) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn cause(&self) -> Option<&Exception> {
        self.cause.as_deref()
    }

    /// Messages of the causes, nearest first.
    pub fn cause_chain(&self) -> Vec<String> {
        std::iter::successors(self.cause(), |e| e.cause())
            .map(|e| format!("{}: {}", e.kind, e.message))
            .collect()
    }
}

/// Response extension marking a response produced from a raised exception.
#[derive(Debug, Clone)]
pub struct RaisedException(pub Arc<Exception>);

impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        // Placeholder status until the exception interceptor resolves it.
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(RaisedException(Arc::new(self)));
        response
    }
}

/// The ExceptionFilter trait
///
/// Filters turn a raised exception, together with the request it was raised
/// in, into the response sent to the client. They must always return a
/// response.
pub trait ExceptionFilter: Send + Sync + 'static {
    fn catch(&self, request: &ResolutionRequest) -> Response;
}
