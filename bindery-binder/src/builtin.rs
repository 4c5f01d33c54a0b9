//! Built-in middleware.

use std::time::Instant;

use bindery_types::{FieldKind, FieldValue, InvocationContext, InvokeError};
use futures::future::BoxFuture;
use tracing::Instrument;

use crate::middleware::{InvocationRequest, InvokeMiddleware, Next};

/// Middleware that caps text outputs at a maximum character count.
///
/// Only values in text output slots are touched; dropdown and label values
/// pass through so they stay valid for their slots.
pub struct TextTruncator {
    max_chars: usize,
}

impl TextTruncator {
    /// Create a truncator with the given character limit.
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    fn truncate(&self, text: String) -> String {
        match text.char_indices().nth(self.max_chars) {
            Some((boundary, _)) => {
                let total = text.chars().count();
                format!("{}... [truncated, {total} chars total]", &text[..boundary])
            }
            None => text,
        }
    }
}

impl InvokeMiddleware for TextTruncator {
    fn process<'a>(
        &'a self,
        request: &'a InvocationRequest,
        ctx: &'a InvocationContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>> {
        Box::pin(async move {
            let descriptor = next.descriptor();
            let outputs = next.run(request, ctx).await?;
            Ok(outputs
                .into_iter()
                .zip(descriptor.outputs())
                .map(|(value, spec)| match (value, &spec.kind) {
                    (FieldValue::Text(text), FieldKind::Text) => {
                        FieldValue::Text(self.truncate(text))
                    }
                    (other, _) => other,
                })
                .collect())
        })
    }
}

/// Middleware that wraps each request in a tracing span and logs its outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

impl RequestLogger {
    /// Create a request logger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InvokeMiddleware for RequestLogger {
    fn process<'a>(
        &'a self,
        request: &'a InvocationRequest,
        ctx: &'a InvocationContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, InvokeError>> {
        let span = tracing::info_span!(
            "bindery.invoke",
            request_id = %request.id,
            session_id = %ctx.session_id,
            inputs = request.inputs.len(),
        );
        Box::pin(
            async move {
                let started = Instant::now();
                tracing::debug!("request started");
                let result = next.run(request, ctx).await;
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &result {
                    Ok(outputs) => {
                        tracing::info!(outputs = outputs.len(), elapsed_ms, "request completed");
                    }
                    Err(err) => tracing::warn!(error = %err, elapsed_ms, "request failed"),
                }
                result
            }
            .instrument(span),
        )
    }
}
