use crate::interceptor::{DispatchType, X_REQUEST_ID};
use crate::resolver::ResolutionResult;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

/// Error page endpoint per status.
///
/// An error response that did not come out of the resolver chain (a bare
/// status from a handler, an escalated 500, a host 405) is re-dispatched to
/// the endpoint registered for its status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPageForwards {
    targets: BTreeMap<u16, String>,
}

impl ErrorPageForwards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(mut self, status: StatusCode, path: impl Into<String>) -> Self {
        self.targets.insert(status.as_u16(), path.into());
        self
    }

    pub fn target(&self, status: StatusCode) -> Option<&str> {
        self.targets.get(&status.as_u16()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// What a forwarded request knows about the error that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedError {
    pub status: StatusCode,
    pub request_uri: String,
}

/// Tower Layer for error page forwarding
///
/// Must wrap the whole router, since the forward goes back through routing.
/// Forwarded requests are marked [`DispatchType::Error`] and keep the
/// original headers and correlation id.
#[derive(Clone)]
pub struct ErrorPageLayer {
    forwards: Arc<ErrorPageForwards>,
}

impl ErrorPageLayer {
    pub fn new(forwards: ErrorPageForwards) -> Self {
        Self {
            forwards: Arc::new(forwards),
        }
    }
}

impl<S> Layer<S> for ErrorPageLayer {
    type Service = ErrorPageService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorPageService {
            inner,
            forwards: self.forwards.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ErrorPageService<S> {
    inner: S,
    forwards: Arc<ErrorPageForwards>,
}

impl<S> Service<Request<Body>> for ErrorPageService<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let forwards = self.forwards.clone();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let dispatch = DispatchType::of(&request);
            let uri = request.uri().clone();
            let headers = request.headers().clone();

            let response = inner.call(request).await?;

            // Forwarded requests are never forwarded again.
            if dispatch == DispatchType::Error
                || response.extensions().get::<ResolutionResult>().is_some()
            {
                return Ok(response);
            }
            let status = response.status();
            let Some(target) = forwards.target(status).filter(|t| *t != uri.path()) else {
                return Ok(response);
            };

            let mut forward = match Request::builder()
                .method(Method::GET)
                .uri(target)
                .body(Body::empty())
            {
                Ok(forward) => forward,
                Err(e) => {
                    tracing::error!(error = %e, to = target, "cannot build error page request");
                    return Ok(response);
                }
            };
            *forward.headers_mut() = headers;
            forward.headers_mut().remove(header::CONTENT_LENGTH);
            if let Some(id) = response.headers().get(X_REQUEST_ID) {
                forward.headers_mut().insert(X_REQUEST_ID, id.clone());
            }
            DispatchType::Error.mark(&mut forward);
            forward.extensions_mut().insert(ForwardedError {
                status,
                request_uri: uri.path().to_string(),
            });

            tracing::info!(
                status = status.as_u16(),
                from = uri.path(),
                to = target,
                "forwarding to error page"
            );

            let mut page = inner.oneshot(forward).await?;
            *page.status_mut() = status;
            Ok(page)
        })
    }
}
