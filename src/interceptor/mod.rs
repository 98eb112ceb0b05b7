use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use strum_macros::{Display, EnumString};

mod exception;
mod layer;
mod logging;

pub use exception::ExceptionInterceptor;
pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::{CorrelationId, LoggingInterceptor, X_REQUEST_ID, matches_path_pattern};

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Whether a request came from the client or is an internal re-dispatch to
/// render an error page.
///
/// Stored in the request extensions; a request without one is a client
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DispatchType {
    #[default]
    Request,
    Error,
}

impl DispatchType {
    pub fn of<B>(request: &Request<B>) -> Self {
        request
            .extensions()
            .get::<DispatchType>()
            .copied()
            .unwrap_or_default()
    }

    pub fn mark<B>(self, request: &mut Request<B>) {
        request.extensions_mut().insert(self);
    }
}

type BoxedChain =
    Box<dyn FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>> + Send>;

/// Represents the next handler in the chain
pub struct Next {
    pub(crate) run: BoxedChain,
}

impl Next {
    /// Create a new Next handler
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>>
            + Send
            + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect/modify the request before it reaches the handler,
/// and inspect/modify the response after the handler returns.
///
/// # Example
/// ```
/// use exhandler::interceptor::{Interceptor, InterceptorResult, Next};
/// use async_trait::async_trait;
/// use axum::{body::Body, http::Request};
///
/// struct PoweredBy;
///
/// #[async_trait]
/// impl Interceptor for PoweredBy {
///     async fn intercept(&self, req: Request<Body>, next: Next) -> InterceptorResult {
///         let mut res = next.run(req).await?;
///         res.headers_mut().insert("x-powered-by", "exhandler".parse().unwrap());
///         Ok(res)
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
