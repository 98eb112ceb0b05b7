//! Exception resolvers
//!
//! A [`Resolver`] looks at a [`ResolutionRequest`] and either produces a
//! [`ResolutionResult`] or declines with `Ok(None)`. The [`ResolverChain`] asks
//! its resolvers in order and stops at the first answer:
//!
//! ```text
//! 1. DeclaredStatusResolver   kind -> statically declared status
//! 2. ExplicitStatusResolver   exception raised with its own status
//! 3. TypedHandlerResolver     kind -> registered handler (ExceptionAdvice)
//! 4. Unresolved               host answers 500
//! ```

use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

mod chain;
mod declared;
mod explicit;
mod handler;
mod request;
mod responder;

pub use chain::{Resolution, ResolverChain, ResolverChainBuilder};
pub use declared::{DeclaredStatus, DeclaredStatusResolver};
pub use explicit::ExplicitStatusResolver;
pub use handler::{ExceptionAdvice, ExceptionHandler, TypedHandlerResolver, default_status};
pub use request::{APPLICATION_JSON, RequestContext, ResolutionRequest};
pub use responder::ErrorResponder;

/// Header naming the error view picked for a rendered result.
pub const ERROR_VIEW_HEADER: HeaderName = HeaderName::from_static("x-error-view");

/// Standard return type for resolvers.
/// `Ok(None)` means the resolver does not handle this exception.
pub type ResolveResult = crate::Result<Option<ResolutionResult>>;

/// Terminal outcome of a resolver
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionResult {
    /// Stop processing and send the status without a body.
    Empty { status: StatusCode },

    /// Show the named error view.
    Rendered { status: StatusCode, view: String },

    /// Send `payload` as JSON.
    Body {
        status: StatusCode,
        payload: serde_json::Value,
    },
}

impl ResolutionResult {
    pub fn status(&self) -> StatusCode {
        match self {
            ResolutionResult::Empty { status }
            | ResolutionResult::Rendered { status, .. }
            | ResolutionResult::Body { status, .. } => *status,
        }
    }
}

/// The result travels in the response extensions, so outer layers can tell a
/// resolved error from one the host produced itself.
impl IntoResponse for ResolutionResult {
    fn into_response(self) -> Response {
        let mut response = match self.clone() {
            ResolutionResult::Empty { status } => status.into_response(),
            ResolutionResult::Body { status, payload } => (status, Json(payload)).into_response(),
            ResolutionResult::Rendered { status, view } => {
                // Views are not rendered here; the page only names what would be shown.
                let page = format!(
                    "<!DOCTYPE html>\n<html><head><title>{status}</title></head>\
                     <body><h1>{status}</h1><p>{view}</p></body></html>"
                );
                let mut response = (status, Html(page)).into_response();
                if let Ok(value) = HeaderValue::from_str(&view) {
                    response.headers_mut().insert(ERROR_VIEW_HEADER, value);
                }
                response
            }
        };
        response.extensions_mut().insert(self);
        response
    }
}

/// The Resolver trait
///
/// Resolvers are stateless apart from their configuration and are shared
/// between requests, so `resolve` only gets `&self`.
pub trait Resolver: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn resolve(&self, request: &ResolutionRequest) -> ResolveResult;
}
