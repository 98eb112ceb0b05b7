use crate::exception::Exception;
use crate::interceptor::DispatchType;
use axum::{
    extract::MatchedPath,
    http::{Method, Request, header},
};
use std::sync::Arc;

pub const APPLICATION_JSON: &str = "application/json";

/// What the exception interceptor remembers about a request before handing it
/// down the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    path: String,
    accept: Option<String>,
    handler: Option<String>,
    dispatch: DispatchType,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            accept: None,
            handler: None,
            dispatch: DispatchType::Request,
        }
    }

    /// Snapshot the parts of `request` the resolvers look at.
    ///
    /// The handler identity is the matched route template, when routing has
    /// already happened.
    pub fn capture<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            accept: request
                .headers()
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            handler: request
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string()),
            dispatch: DispatchType::of(request),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchType) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn raise(self, exception: impl Into<Arc<Exception>>) -> ResolutionRequest {
        ResolutionRequest {
            context: self,
            exception: exception.into(),
        }
    }
}

/// Immutable input of every resolver: the request snapshot plus the raised
/// exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    context: RequestContext,
    exception: Arc<Exception>,
}

impl ResolutionRequest {
    pub fn new(path: impl Into<String>, exception: impl Into<Arc<Exception>>) -> Self {
        RequestContext::new(path).raise(exception)
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.context = self.context.with_accept(accept);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.context = self.context.with_method(method);
        self
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn method(&self) -> &Method {
        &self.context.method
    }

    pub fn path(&self) -> &str {
        &self.context.path
    }

    pub fn accept(&self) -> Option<&str> {
        self.context.accept.as_deref()
    }

    pub fn handler(&self) -> Option<&str> {
        self.context.handler.as_deref()
    }

    pub fn dispatch(&self) -> DispatchType {
        self.context.dispatch
    }

    pub fn exception(&self) -> &Exception {
        &self.exception
    }

    /// True only when the client asked for exactly `application/json`.
    pub fn wants_json(&self) -> bool {
        self.accept() == Some(APPLICATION_JSON)
    }
}
