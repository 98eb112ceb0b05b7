//! Error view selection
//!
//! Picks the name of the page that should be shown for an error status. The
//! lookup goes from the exact code to the code class and finally to the
//! generic view:
//!
//! ```text
//! 404 -> error/404   (if registered)
//!     -> error/4xx   (if registered)
//!     -> error
//! ```
//!
//! Error responses the resolvers never saw can be re-dispatched to an error
//! page endpoint with [`ErrorPageLayer`].

use axum::http::StatusCode;
use std::collections::BTreeSet;

mod forward;

pub use forward::{ErrorPageForwards, ErrorPageLayer, ErrorPageService, ForwardedError};

const DEFAULT_PREFIX: &str = "error";
const DEFAULT_VIEWS: [&str; 4] = ["error/404", "error/4xx", "error/500", "error/5xx"];

/// Registry of available error views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPages {
    prefix: String,
    generic: String,
    views: BTreeSet<String>,
}

impl Default for ErrorPages {
    fn default() -> Self {
        DEFAULT_VIEWS
            .into_iter()
            .fold(Self::new(DEFAULT_PREFIX, DEFAULT_PREFIX), ErrorPages::register)
    }
}

impl ErrorPages {
    /// An empty registry: every status maps to `generic`.
    pub fn new(prefix: impl Into<String>, generic: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            generic: generic.into(),
            views: BTreeSet::new(),
        }
    }

    pub fn register(mut self, view: impl Into<String>) -> Self {
        self.views.insert(view.into());
        self
    }

    /// Most specific registered view for `status`.
    pub fn select(&self, status: StatusCode) -> String {
        let code = status.as_u16();
        let exact = format!("{}/{}", self.prefix, code);
        if self.views.contains(&exact) {
            return exact;
        }

        let class = format!("{}/{}xx", self.prefix, code / 100);
        if self.views.contains(&class) {
            return class;
        }

        self.generic.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_code_wins() {
        let pages = ErrorPages::default();
        assert_eq!(pages.select(StatusCode::NOT_FOUND), "error/404");
        assert_eq!(pages.select(StatusCode::INTERNAL_SERVER_ERROR), "error/500");
    }

    #[test]
    fn test_class_wildcard() {
        let pages = ErrorPages::default();
        assert_eq!(pages.select(StatusCode::BAD_REQUEST), "error/4xx");
        assert_eq!(pages.select(StatusCode::SERVICE_UNAVAILABLE), "error/5xx");
    }

    #[test]
    fn test_generic_fallback() {
        let pages = ErrorPages::new("error", "error").register("error/404");
        assert_eq!(pages.select(StatusCode::BAD_REQUEST), "error");
        assert_eq!(pages.select(StatusCode::IM_A_TEAPOT), "error");
        assert_eq!(pages.select(StatusCode::NOT_FOUND), "error/404");
    }

    #[test]
    fn test_custom_prefix() {
        let pages = ErrorPages::new("error-page", "error-page/generic").register("error-page/500");
        assert_eq!(pages.select(StatusCode::INTERNAL_SERVER_ERROR), "error-page/500");
        assert_eq!(pages.select(StatusCode::BAD_GATEWAY), "error-page/generic");
    }
}
