#![deny(missing_docs)]
//! Bind a handler to typed input and output field specs.
//!
//! [`bind`] takes a handler plus input and output components (symbolic
//! names, [`ComponentKind`]s, or fully-built [`FieldSpec`]s, alone or in
//! sequences), resolves them through a [`ComponentRegistry`], checks them
//! against the handler's declared arity, and returns an immutable
//! [`ServiceDescriptor`]. Nothing is started: a runtime takes the
//! descriptor, presents [`ServiceDescriptor::config`], and calls
//! [`ServiceDescriptor::invoke`] once per request, optionally through a
//! [`Pipeline`] of [`InvokeMiddleware`].
//!
//! ```
//! use bindery_binder::*;
//!
//! let greet = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
//! let descriptor = bind(greet, "text", "text", None).unwrap();
//! assert_eq!(descriptor.inputs(), [FieldSpec::text().with_lines(1)]);
//! ```

pub mod bind;
pub mod builtin;
pub mod config;
pub mod descriptor;
pub mod middleware;

pub use bind::*;
pub use builtin::*;
pub use config::*;
pub use descriptor::*;
pub use middleware::*;

pub use bindery_registry::{ComponentKind, ComponentRef, ComponentRegistry};
pub use bindery_types::{
    Arity, BindError, Confidence, FieldKind, FieldOptions, FieldSide, FieldSpec, FieldValue,
    FromFieldValue, Handler, HandlerDyn, HandlerError, HubCredentials, IntoFieldValue,
    InvocationContext, InvokeError, LabelValue, MediaSource, Table, ValueError, dyn_handler_fn,
    handler_fn, try_handler_fn,
};
