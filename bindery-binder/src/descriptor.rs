//! The bound, immutable interface and its per-request invocation.

use std::fmt;
use std::sync::Arc;

use bindery_types::{
    Arity, FieldSpec, FieldValue, HandlerDyn, HandlerError, InvocationContext, InvokeError,
};
use serde::{Deserialize, Serialize};

use crate::bind::Metadata;

/// A handler bound to its input and output field specs.
///
/// Produced by [`bind`](crate::bind()); immutable afterwards. Cloning is
/// cheap and shares the handler. Equality compares the arity, field specs,
/// and metadata, never the handler itself.
#[derive(Clone)]
pub struct ServiceDescriptor {
    handler: Arc<dyn HandlerDyn>,
    arity: Arity,
    inputs: Vec<FieldSpec>,
    outputs: Vec<FieldSpec>,
    metadata: Metadata,
}

/// The presentable part of a descriptor: metadata and slot specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Title, description, and article.
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Input slots, in handler argument order.
    pub inputs: Vec<FieldSpec>,
    /// Output slots, in handler return order.
    pub outputs: Vec<FieldSpec>,
}

impl ServiceDescriptor {
    pub(crate) fn new(
        handler: Arc<dyn HandlerDyn>,
        arity: Arity,
        inputs: Vec<FieldSpec>,
        outputs: Vec<FieldSpec>,
        metadata: Metadata,
    ) -> Self {
        Self {
            handler,
            arity,
            inputs,
            outputs,
            metadata,
        }
    }

    /// The handler's declared arity.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Input specs, in argument order.
    pub fn inputs(&self) -> &[FieldSpec] {
        &self.inputs
    }

    /// Output specs, in return order.
    pub fn outputs(&self) -> &[FieldSpec] {
        &self.outputs
    }

    /// Descriptive metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The bound handler.
    pub fn handler(&self) -> &Arc<dyn HandlerDyn> {
        &self.handler
    }

    /// Render the serializable interface configuration.
    pub fn config(&self) -> InterfaceConfig {
        InterfaceConfig {
            metadata: self.metadata.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }
    }

    /// Coerce one request's raw values against the input specs, in order.
    pub fn coerce_inputs(
        &self,
        raw_inputs: Vec<serde_json::Value>,
    ) -> Result<Vec<FieldValue>, InvokeError> {
        if raw_inputs.len() != self.inputs.len() {
            return Err(InvokeError::InputCount {
                expected: self.inputs.len(),
                actual: raw_inputs.len(),
            });
        }
        self.inputs
            .iter()
            .zip(raw_inputs)
            .enumerate()
            .map(|(index, (spec, raw))| {
                spec.coerce_input(raw)
                    .map_err(|source| InvokeError::InvalidInput { index, source })
            })
            .collect()
    }

    /// Fit the handler's returned values to the output specs, in order.
    pub fn normalize_outputs(
        &self,
        values: Vec<FieldValue>,
    ) -> Result<Vec<FieldValue>, InvokeError> {
        if values.len() != self.outputs.len() {
            return Err(InvokeError::OutputCount {
                expected: self.outputs.len(),
                actual: values.len(),
            });
        }
        self.outputs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (spec, value))| {
                spec.normalize_output(value)
                    .map_err(|source| InvokeError::InvalidOutput { index, source })
            })
            .collect()
    }

    /// Run one request: coerce inputs, call the handler, check outputs.
    ///
    /// Cancelling `ctx.cancellation_token` abandons the handler future and
    /// returns [`InvokeError::Cancelled`].
    pub async fn invoke(
        &self,
        raw_inputs: Vec<serde_json::Value>,
        ctx: &InvocationContext,
    ) -> Result<Vec<FieldValue>, InvokeError> {
        let values = self.coerce_inputs(raw_inputs)?;

        let result = tokio::select! {
            biased;
            () = ctx.cancellation_token.cancelled() => return Err(InvokeError::Cancelled),
            result = self.handler.call_dyn(values, ctx) => result,
        };

        let returned = match result {
            Ok(returned) => returned,
            Err(HandlerError::Cancelled) => return Err(InvokeError::Cancelled),
            Err(err) => {
                tracing::warn!(session_id = %ctx.session_id, error = %err, "handler failed");
                return Err(InvokeError::Handler(err));
            }
        };

        self.normalize_outputs(returned)
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("arity", &self.arity)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ServiceDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.metadata == other.metadata
    }
}
