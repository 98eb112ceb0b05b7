use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExhandlerError>;

#[derive(Debug, Error)]
pub enum ExhandlerError {
    #[error("Failed to serialize error body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid HTTP status code: {code}")]
    InvalidStatus { code: u16 },

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    #[error("Resolver {resolver} failed: {message}")]
    ResolverFailed { resolver: String, message: String },
}

impl ExhandlerError {
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn resolver_failed(resolver: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResolverFailed {
            resolver: resolver.into(),
            message: message.into(),
        }
    }
}

// Escalation surface: whatever went wrong while resolving becomes a bare 500.
// The detail stays in the log.
impl axum::response::IntoResponse for ExhandlerError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "exception resolution escalated");
        let status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_escalated_error_hides_detail() {
        let response =
            ExhandlerError::resolver_failed("DeclaredStatusResolver", "writer closed").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Internal Server Error");
    }

    #[test]
    fn test_invalid_status_message() {
        let err = ExhandlerError::InvalidStatus { code: 42 };
        assert_eq!(err.to_string(), "Invalid HTTP status code: 42");
    }

    #[test]
    fn test_config_error_message() {
        let err = ExhandlerError::config("EXHANDLER_ERROR_VIEWS", "empty view name");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for EXHANDLER_ERROR_VIEWS: empty view name"
        );
    }
}
