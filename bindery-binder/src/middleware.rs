//! Middleware around descriptor invocation.
//!
//! Same shape as axum's `from_fn`: each middleware receives a [`Next`] it
//! can run to continue the chain, or skip to short-circuit. The end of the
//! chain is [`ServiceDescriptor::invoke`].

use std::sync::Arc;

use bindery_types::{FieldValue, InvocationContext, InvokeError};
use futures::future::BoxFuture;

use crate::descriptor::ServiceDescriptor;

/// One request in flight through a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Caller-chosen request identifier, used for logging.
    pub id: String,
    /// One raw JSON value per input slot.
    pub inputs: Vec<serde_json::Value>,
}

impl InvocationRequest {
    /// A request with the given id and inputs.
    pub fn new(id: impl Into<String>, inputs: Vec<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            inputs,
        }
    }
}

/// Middleware that wraps invocation.
///
/// Implementations may inspect the request, short-circuit without calling
/// `next.run()`, or rewrite the outputs after the handler returns.
pub trait InvokeMiddleware: Send + Sync {
    /// Process a request, optionally delegating to the rest of the chain.
    fn process<'a>(
        &'a self,
        request: &'a InvocationRequest,
        ctx: &'a InvocationContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>>;
}

/// The remaining middleware plus the descriptor at the end of the chain.
///
/// Consumed on run so the handler is reached at most once.
pub struct Next<'a> {
    descriptor: &'a ServiceDescriptor,
    middleware: &'a [Arc<dyn InvokeMiddleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        descriptor: &'a ServiceDescriptor,
        middleware: &'a [Arc<dyn InvokeMiddleware>],
    ) -> Self {
        Self {
            descriptor,
            middleware,
        }
    }

    /// The descriptor being invoked.
    pub fn descriptor(&self) -> &'a ServiceDescriptor {
        self.descriptor
    }

    /// Continue the chain, eventually invoking the descriptor.
    pub async fn run(
        self,
        request: &'a InvocationRequest,
        ctx: &'a InvocationContext,
    ) -> Result<Vec<FieldValue>, InvokeError> {
        match self.middleware.split_first() {
            Some((head, tail)) => {
                let next = Next::new(self.descriptor, tail);
                head.process(request, ctx, next).await
            }
            None => self.descriptor.invoke(request.inputs.clone(), ctx).await,
        }
    }
}

struct MiddlewareFn<F> {
    f: F,
}

impl<F> InvokeMiddleware for MiddlewareFn<F>
where
    F: for<'a> Fn(
            &'a InvocationRequest,
            &'a InvocationContext,
            Next<'a>,
        ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>>
        + Send
        + Sync,
{
    fn process<'a>(
        &'a self,
        request: &'a InvocationRequest,
        ctx: &'a InvocationContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>> {
        (self.f)(request, ctx, next)
    }
}

/// Create middleware from a closure returning `Box::pin(async move { .. })`.
///
/// ```
/// use bindery_binder::*;
///
/// let audit = middleware_fn(|request, ctx, next| {
///     Box::pin(async move {
///         tracing::info!(request_id = %request.id, "invoking");
///         next.run(request, ctx).await
///     })
/// });
/// # let _ = audit;
/// ```
#[must_use]
pub fn middleware_fn<F>(f: F) -> impl InvokeMiddleware
where
    F: for<'a> Fn(
            &'a InvocationRequest,
            &'a InvocationContext,
            Next<'a>,
        ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>>
        + Send
        + Sync,
{
    MiddlewareFn { f }
}

/// A descriptor plus an ordered middleware chain.
///
/// Middleware runs in registration order on the way in and reverse order
/// on the way out.
#[derive(Clone)]
pub struct Pipeline {
    descriptor: ServiceDescriptor,
    middleware: Vec<Arc<dyn InvokeMiddleware>>,
}

impl Pipeline {
    /// A pipeline with no middleware.
    pub fn new(descriptor: ServiceDescriptor) -> Self {
        Self {
            descriptor,
            middleware: Vec::new(),
        }
    }

    /// Append middleware to the chain.
    pub fn add_middleware(&mut self, middleware: impl InvokeMiddleware + 'static) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Builder form of [`add_middleware`](Self::add_middleware).
    #[must_use]
    pub fn with_middleware(mut self, middleware: impl InvokeMiddleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// The wrapped descriptor.
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Number of middleware in the chain.
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Run one request through the chain.
    pub async fn handle(
        &self,
        request: &InvocationRequest,
        ctx: &InvocationContext,
    ) -> Result<Vec<FieldValue>, InvokeError> {
        Next::new(&self.descriptor, &self.middleware)
            .run(request, ctx)
            .await
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("descriptor", &self.descriptor)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
