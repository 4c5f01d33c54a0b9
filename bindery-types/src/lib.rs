//! # bindery-types: vocabulary for declarative interface binding
//!
//! A bound interface is a handler plus an ordered list of input slots and an
//! ordered list of output slots. This crate defines the pieces every other
//! bindery crate speaks in:
//!
//! | Piece | Types | What it is |
//! |-------|-------|------------|
//! | Slots | [`FieldKind`], [`FieldSpec`], [`FieldOptions`] | The typed description of one input or output |
//! | Values | [`FieldValue`], [`MediaSource`], [`Table`], [`LabelValue`] | What flows through a slot at request time |
//! | Handlers | [`Handler`], [`HandlerDyn`], [`Arity`] | The unit of work, with a statically declared arity |
//! | Context | [`InvocationContext`], [`HubCredentials`] | Per-request state passed explicitly to handlers |
//! | Errors | [`BindError`], [`InvokeError`], [`HandlerError`], [`ValueError`] | Bind-time and request-time failures |
//!
//! Handler arity is never inspected at runtime. Typed handlers declare it
//! through their argument and output tuple types; type-erased handlers
//! declare it with an explicit [`Arity`].

#![deny(missing_docs)]

pub mod context;
pub mod error;
pub mod field;
pub mod handler;
pub mod value;

pub use context::{HubCredentials, InvocationContext};
pub use error::{BindError, FieldSide, HandlerError, InvokeError, ValueError};
pub use field::{FieldKind, FieldOptions, FieldSpec};
pub use handler::{
    Arity, DynFnHandler, FnHandler, FromArgs, Handler, HandlerDyn, IntoOutputs, TryFnHandler,
    dyn_handler_fn, handler_fn, try_handler_fn,
};
pub use value::{Confidence, FieldValue, FromFieldValue, IntoFieldValue, LabelValue, MediaSource, Table};
