//! # exhandler
//!
//! Exception resolution for axum applications.
//!
//! Handlers return an [`Exception`] instead of building error responses
//! themselves. An ordered chain of resolvers decides what the client sees:
//! a JSON error body, the name of an error page, or an empty response. When no
//! resolver answers, the request falls back to a 500.
//!
//! ## Features
//!
//! - **Kind hierarchy**: error kinds with an explicit parent relation; the most
//!   specific mapping always wins
//! - **Resolver chain**: declared statuses, explicitly raised statuses and typed
//!   handlers, tried in a fixed order
//! - **Content negotiation**: `Accept: application/json` gets
//!   `{"kind", "message"}`, everything else gets an error view picked by status
//! - **Interceptors**: tower layer with request logging (correlation ids,
//!   dispatch-type filtering) and exception resolution
//! - **Error page forward**: error responses the resolvers never saw are
//!   re-dispatched to an error page endpoint
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exhandler::prelude::*;
//!
//! async fn get_member(Path(id): Path<String>) -> Result<String, Exception> {
//!     if id == "bad" {
//!         return Err(Exception::invalid_argument("잘못 입력 값"));
//!     }
//!     Ok(format!("hello {id}"))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = ResolutionSettings::default();
//!     let responder = ErrorResponder::from_settings(&settings);
//!     let chain = ResolverChain::standard(responder.clone(), ExceptionAdvice::standard());
//!
//!     let app: Router = Router::new()
//!         .route("/api/members/{id}", axum::routing::get(get_member))
//!         .layer(InterceptorLayer::new(vec![
//!             Box::new(LoggingInterceptor::from_settings(&settings)),
//!             Box::new(ExceptionInterceptor::new(ResolvingExceptionFilter::new(chain, responder))),
//!         ]));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod interceptor;
pub mod page;
pub mod resolver;

// Re-export core types
pub use common::ErrorResult;
pub use error::{ExhandlerError, Result};
pub use exception::{ErrorKind, Exception};
pub use resolver::{Resolution, ResolutionRequest, ResolutionResult, Resolver, ResolverChain};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use exhandler::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::ErrorResult;
    pub use crate::config::{ConfigService, MessageSource, ResolutionSettings};
    pub use crate::error::ExhandlerError;
    pub use crate::exception::http::ResolvingExceptionFilter;
    pub use crate::exception::{ErrorKind, Exception, ExceptionFilter};
    pub use crate::interceptor::{
        DispatchType, ExceptionInterceptor, Interceptor, InterceptorLayer, InterceptorResult,
        LoggingInterceptor, Next,
    };
    pub use crate::page::{ErrorPageForwards, ErrorPageLayer, ErrorPages};
    pub use crate::resolver::{
        ErrorResponder, ExceptionAdvice, Resolution, ResolutionRequest, ResolutionResult,
        Resolver, ResolverChain,
    };
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
