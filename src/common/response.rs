use crate::exception::Exception;
use serde::{Deserialize, Serialize};

/// JSON error body
///
/// Serializes as `{"kind": ..., "message": ...}`.
///
/// # Example
/// ```
/// use exhandler::common::ErrorResult;
///
/// let body = ErrorResult::new("USER-EX", "사용자 에러");
/// let json = serde_json::to_string(&body).unwrap();
/// assert_eq!(json, r#"{"kind":"USER-EX","message":"사용자 에러"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub kind: String,
    pub message: String,
}

impl ErrorResult {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Body labelled with the exception's own kind and message.
    pub fn from_exception(exception: &Exception) -> Self {
        Self::new(exception.kind().label(), exception.message())
    }
}
