//! Error types for binding and invocation.

use std::fmt;

use thiserror::Error;

/// Which side of an interface a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSide {
    /// The handler's arguments.
    Inputs,
    /// The handler's return values.
    Outputs,
}

impl fmt::Display for FieldSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs => f.write_str("inputs"),
            Self::Outputs => f.write_str("outputs"),
        }
    }
}

/// Errors raised synchronously while building a service descriptor.
///
/// None of these are retryable: they describe a programming or configuration
/// mistake and are surfaced to the caller immediately.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// A symbolic component name outside the closed set.
    #[error("unknown component kind: {0:?}")]
    UnknownComponentKind(String),

    /// The number of declared slots disagrees with the handler's arity.
    #[error("arity mismatch on {side}: handler declares {expected}, got {actual} field specs")]
    ArityMismatch {
        /// Which side disagreed.
        side: FieldSide,
        /// The count the handler declares.
        expected: usize,
        /// The count of field specs supplied.
        actual: usize,
    },

    /// A field option that is out of range or does not apply to the kind.
    #[error("invalid {kind} option: {reason}")]
    InvalidFieldOption {
        /// Canonical name of the field kind.
        kind: &'static str,
        /// What was wrong.
        reason: String,
    },
}

impl BindError {
    pub(crate) fn option(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldOption {
            kind,
            reason: reason.into(),
        }
    }
}

/// A value that does not fit the slot it was offered to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} field: {reason}")]
pub struct ValueError {
    /// Canonical name of the field kind.
    pub kind: &'static str,
    /// What was wrong.
    pub reason: String,
}

impl ValueError {
    pub(crate) fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors returned by a handler.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HandlerError {
    /// An argument could not be converted to the handler's parameter type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The handler's own work failed.
    #[error("handler failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The handler observed cancellation and stopped.
    #[error("cancelled")]
    Cancelled,
}

impl HandlerError {
    /// Wrap any error (or message) as a handler failure.
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }
}

impl From<std::convert::Infallible> for HandlerError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Errors from invoking a bound interface with one request.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The request carried the wrong number of input values.
    #[error("expected {expected} input values, got {actual}")]
    InputCount {
        /// Number of input slots.
        expected: usize,
        /// Number of values in the request.
        actual: usize,
    },

    /// An input value failed coercion against its slot.
    #[error("input {index}: {source}")]
    InvalidInput {
        /// Zero-based input position.
        index: usize,
        /// Why the value was rejected.
        #[source]
        source: ValueError,
    },

    /// The handler returned the wrong number of values.
    #[error("handler returned {actual} values, expected {expected}")]
    OutputCount {
        /// Number of output slots.
        expected: usize,
        /// Number of values returned.
        actual: usize,
    },

    /// A returned value does not fit its output slot.
    #[error("output {index}: {source}")]
    InvalidOutput {
        /// Zero-based output position.
        index: usize,
        /// Why the value was rejected.
        #[source]
        source: ValueError,
    },

    /// The handler itself failed.
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    /// The request was cancelled before the handler finished.
    #[error("cancelled")]
    Cancelled,
}
