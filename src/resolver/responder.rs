use crate::common::ErrorResult;
use crate::config::{MessageSource, ResolutionSettings};
use crate::page::ErrorPages;
use crate::resolver::{ResolutionRequest, ResolutionResult, ResolveResult};
use axum::http::{Method, StatusCode};
use std::sync::Arc;

/// Shared by every resolver: turns a status and an error body into the
/// negotiated [`ResolutionResult`], and translates message codes.
///
/// Negotiation order:
/// - `HEAD` requests get [`ResolutionResult::Empty`];
/// - `Accept: application/json` gets [`ResolutionResult::Body`];
/// - anything else gets [`ResolutionResult::Rendered`] with the view picked by
///   [`ErrorPages`].
#[derive(Debug, Clone, Default)]
pub struct ErrorResponder {
    pages: Arc<ErrorPages>,
    messages: Arc<MessageSource>,
}

impl ErrorResponder {
    pub fn new(pages: ErrorPages, messages: MessageSource) -> Self {
        Self {
            pages: Arc::new(pages),
            messages: Arc::new(messages),
        }
    }

    pub fn from_settings(settings: &ResolutionSettings) -> Self {
        Self::new(settings.error_pages(), settings.messages.clone())
    }

    /// Text for a message code; unknown codes are returned unchanged.
    pub fn message(&self, code: &str) -> String {
        self.messages.resolve(code)
    }

    pub fn respond(
        &self,
        request: &ResolutionRequest,
        status: StatusCode,
        body: &ErrorResult,
    ) -> ResolveResult {
        if *request.method() == Method::HEAD {
            return Ok(Some(ResolutionResult::Empty { status }));
        }

        if request.wants_json() {
            let payload = serde_json::to_value(body)?;
            return Ok(Some(ResolutionResult::Body { status, payload }));
        }

        Ok(Some(ResolutionResult::Rendered {
            status,
            view: self.pages.select(status),
        }))
    }
}
