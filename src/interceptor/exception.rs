use crate::exception::{Exception, ExceptionFilter, RaisedException};
use crate::interceptor::{Interceptor, InterceptorResult, Next};
use crate::resolver::RequestContext;
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use std::sync::Arc;

/// Hands raised exceptions to an [`ExceptionFilter`].
///
/// The request is snapshotted before it goes down the chain. A response that
/// carries a [`RaisedException`], or a failure of the rest of the chain, is
/// replaced by whatever the filter produces for it.
#[derive(Clone)]
pub struct ExceptionInterceptor {
    filter: Arc<dyn ExceptionFilter>,
}

impl ExceptionInterceptor {
    pub fn new<F: ExceptionFilter>(filter: F) -> Self {
        Self {
            filter: Arc::new(filter),
        }
    }
}

#[async_trait]
impl Interceptor for ExceptionInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let context = RequestContext::capture(&request);

        match next.run(request).await {
            Ok(response) => {
                let raised = response.extensions().get::<RaisedException>().cloned();
                match raised {
                    Some(RaisedException(exception)) => {
                        Ok(self.filter.catch(&context.raise(exception)))
                    }
                    None => Ok(response),
                }
            }
            Err(e) => {
                let exception = Exception::runtime(e.to_string());
                Ok(self.filter.catch(&context.raise(exception)))
            }
        }
    }
}
