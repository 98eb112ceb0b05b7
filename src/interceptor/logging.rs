use crate::config::ResolutionSettings;
use crate::interceptor::{DispatchType, Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
};
use chrono::Utc;
use std::time::Instant;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of the current request, stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

/// Path pattern match with `/prefix/**` (prefix and everything below it),
/// `/*suffix` (one segment ending in `suffix`) and exact paths.
pub fn matches_path_pattern(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/**") {
        return path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'));
    }
    if let Some(suffix) = pattern.strip_prefix("/*") {
        return path
            .strip_prefix('/')
            .is_some_and(|segment| !segment.contains('/') && segment.ends_with(suffix));
    }
    pattern == path
}

/// An interceptor that logs request timing and status
///
/// Every request gets a correlation id (the incoming `x-request-id`, or a new
/// UUID) which is echoed back on the response. Requests whose dispatch type is
/// not configured, or whose path matches an excluded pattern, are passed
/// through without log lines, so an error-page re-dispatch is not logged twice.
#[derive(Clone, Debug)]
pub struct LoggingInterceptor {
    dispatch_types: Vec<DispatchType>,
    exclude_paths: Vec<String>,
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::from_settings(&ResolutionSettings::default())
    }
}

impl LoggingInterceptor {
    pub fn new(dispatch_types: Vec<DispatchType>, exclude_paths: Vec<String>) -> Self {
        Self {
            dispatch_types,
            exclude_paths,
        }
    }

    pub fn from_settings(settings: &ResolutionSettings) -> Self {
        Self::new(
            settings.log_dispatch_types.clone(),
            settings.log_exclude_paths.clone(),
        )
    }

    pub fn should_log(&self, dispatch: DispatchType, path: &str) -> bool {
        self.dispatch_types.contains(&dispatch)
            && !self
                .exclude_paths
                .iter()
                .any(|pattern| matches_path_pattern(pattern, path))
    }
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, mut request: Request<Body>, next: Next) -> InterceptorResult {
        let correlation_id = request
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        request
            .extensions_mut()
            .insert(CorrelationId(correlation_id.clone()));

        let dispatch = DispatchType::of(&request);
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let enabled = self.should_log(dispatch, &path);
        let start = Instant::now();

        if enabled {
            tracing::info!(
                correlation_id = %correlation_id,
                dispatch = %dispatch,
                started_at = %Utc::now().to_rfc3339(),
                "REQUEST {} {}",
                method,
                path
            );
        }

        match next.run(request).await {
            Ok(mut response) => {
                if enabled {
                    tracing::info!(
                        correlation_id = %correlation_id,
                        dispatch = %dispatch,
                        status = response.status().as_u16(),
                        finished_at = %Utc::now().to_rfc3339(),
                        elapsed = ?start.elapsed(),
                        "RESPONSE {} {}",
                        method,
                        path
                    );
                }
                if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                    response.headers_mut().insert(X_REQUEST_ID, value);
                }
                Ok(response)
            }
            Err(e) => {
                if enabled {
                    tracing::error!(
                        correlation_id = %correlation_id,
                        dispatch = %dispatch,
                        elapsed = ?start.elapsed(),
                        "RESPONSE {} {} failed: {}",
                        method,
                        path,
                        e
                    );
                }
                Err(e)
            }
        }
    }
}
