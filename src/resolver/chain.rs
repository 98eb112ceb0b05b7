use crate::error::Result;
use crate::resolver::{
    DeclaredStatusResolver, ErrorResponder, ExceptionAdvice, ExplicitStatusResolver,
    ResolutionRequest, ResolutionResult, Resolver, TypedHandlerResolver,
};
use std::sync::Arc;

/// Outcome of running the whole chain
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        resolver: String,
        result: ResolutionResult,
    },
    /// No resolver answered; the host falls back to 500.
    Unresolved,
}

impl Resolution {
    pub fn result(&self) -> Option<&ResolutionResult> {
        match self {
            Resolution::Resolved { result, .. } => Some(result),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_result(self) -> Option<ResolutionResult> {
        match self {
            Resolution::Resolved { result, .. } => Some(result),
            Resolution::Unresolved => None,
        }
    }
}

/// Ordered chain of resolvers; the first resolver that answers wins.
///
/// Cloning is cheap and every clone shares the same resolvers.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Arc<Vec<Box<dyn Resolver>>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self {
            resolvers: Arc::new(resolvers),
        }
    }

    pub fn builder() -> ResolverChainBuilder {
        ResolverChainBuilder::default()
    }

    /// Declared status, then explicit status, then the handlers in `advice`.
    pub fn standard(responder: ErrorResponder, advice: ExceptionAdvice) -> Self {
        Self::builder()
            .with(DeclaredStatusResolver::standard(responder.clone()))
            .with(ExplicitStatusResolver::new(responder.clone()))
            .with(TypedHandlerResolver::new(advice, responder))
            .build()
    }

    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Run the resolvers in order.
    ///
    /// A resolver error stops the chain and is returned as is; it is never
    /// treated as "unresolved".
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let exception = request.exception();

        for resolver in self.resolvers.iter() {
            if let Some(result) = resolver.resolve(request)? {
                tracing::info!(
                    resolver = resolver.name(),
                    kind = %exception.kind(),
                    status = result.status().as_u16(),
                    path = request.path(),
                    handler = request.handler().unwrap_or("-"),
                    "exception resolved"
                );
                return Ok(Resolution::Resolved {
                    resolver: resolver.name().to_string(),
                    result,
                });
            }
        }

        tracing::error!(
            kind = %exception.kind(),
            path = request.path(),
            causes = ?exception.cause_chain(),
            "unresolved exception: {}",
            exception
        );
        Ok(Resolution::Unresolved)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names())
            .finish()
    }
}

#[derive(Default)]
pub struct ResolverChainBuilder {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChainBuilder {
    /// Append a resolver; it runs after every resolver added before it.
    pub fn with<R: Resolver>(mut self, resolver: R) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn build(self) -> ResolverChain {
        ResolverChain::new(self.resolvers)
    }
}
