//! Handler traits: the unit of work behind a bound interface.
//!
//! [`Handler`] is the strongly-typed form: arguments are a tuple of
//! [`FromFieldValue`] types and the output is a value or tuple of
//! [`IntoFieldValue`] types, so arity is fixed by the types themselves.
//! [`HandlerDyn`] is the type-erased form a descriptor stores; every
//! `Handler` gets it through a blanket impl.

use std::future::Future;
use std::marker::PhantomData;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::context::InvocationContext;
use crate::error::HandlerError;
use crate::value::{FieldValue, FromFieldValue, IntoFieldValue, LabelValue, MediaSource, Table};

/// Declared input and output counts of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arity {
    /// Number of positional arguments.
    pub inputs: usize,
    /// Number of returned values.
    pub outputs: usize,
}

impl Arity {
    /// Create an arity.
    pub const fn new(inputs: usize, outputs: usize) -> Self {
        Self { inputs, outputs }
    }
}

/// A positional argument list built from slot values.
pub trait FromArgs: Sized + Send {
    /// Number of arguments.
    const ARITY: usize;

    /// Convert the values, in order.
    fn from_args(values: Vec<FieldValue>) -> Result<Self, HandlerError>;
}

/// A return value spread positionally over output slots.
pub trait IntoOutputs {
    /// Number of returned values.
    const ARITY: usize;

    /// Convert into one value per output slot, in order.
    fn into_outputs(self) -> Vec<FieldValue>;
}

impl FromArgs for () {
    const ARITY: usize = 0;

    fn from_args(values: Vec<FieldValue>) -> Result<Self, HandlerError> {
        if values.is_empty() {
            Ok(())
        } else {
            Err(HandlerError::InvalidArgument(format!(
                "expected 0 arguments, got {}",
                values.len()
            )))
        }
    }
}

macro_rules! impl_tuple_arity {
    ($len:expr; $($name:ident),+) => {
        impl<$($name: FromFieldValue + Send),+> FromArgs for ($($name,)+) {
            const ARITY: usize = $len;

            fn from_args(values: Vec<FieldValue>) -> Result<Self, HandlerError> {
                if values.len() != $len {
                    return Err(HandlerError::InvalidArgument(format!(
                        "expected {} arguments, got {}",
                        $len,
                        values.len()
                    )));
                }
                let mut values = values.into_iter();
                Ok(($(
                    <$name as FromFieldValue>::from_field_value(values.next().ok_or_else(
                        || HandlerError::InvalidArgument("argument list ended early".into()),
                    )?)?,
                )+))
            }
        }

        #[allow(non_snake_case)]
        impl<$($name: IntoFieldValue),+> IntoOutputs for ($($name,)+) {
            const ARITY: usize = $len;

            fn into_outputs(self) -> Vec<FieldValue> {
                let ($($name,)+) = self;
                vec![$($name.into_field_value()),+]
            }
        }
    };
}

impl_tuple_arity!(1; A);
impl_tuple_arity!(2; A, B);
impl_tuple_arity!(3; A, B, C);
impl_tuple_arity!(4; A, B, C, D);
impl_tuple_arity!(5; A, B, C, D, E);
impl_tuple_arity!(6; A, B, C, D, E, F);

// Bare values count as a single output.
macro_rules! impl_single_output {
    ($($ty:ty),+ $(,)?) => {$(
        impl IntoOutputs for $ty {
            const ARITY: usize = 1;

            fn into_outputs(self) -> Vec<FieldValue> {
                vec![self.into_field_value()]
            }
        }
    )+};
}

impl_single_output!(
    FieldValue,
    String,
    f64,
    i64,
    bool,
    MediaSource,
    Table,
    LabelValue,
    serde_json::Value,
);

/// A strongly-typed handler. Implement this for units of work with a fixed
/// signature; the blanket impl of [`HandlerDyn`] takes care of converting
/// slot values in and out.
///
/// # Example
///
/// ```
/// use bindery_types::*;
///
/// struct Greet;
///
/// impl Handler for Greet {
///     type Args = (String,);
///     type Output = String;
///     type Error = HandlerError;
///
///     async fn call(&self, (name,): (String,), _ctx: &InvocationContext) -> Result<String, HandlerError> {
///         Ok(format!("Hello, {name}!"))
///     }
/// }
///
/// assert_eq!(Greet.arity(), Arity::new(1, 1));
/// ```
pub trait Handler: Send + Sync {
    /// The positional arguments.
    type Args: FromArgs;
    /// The value or tuple of values returned.
    type Output: IntoOutputs + Send;
    /// The handler-specific error type.
    type Error: Into<HandlerError> + Send;

    /// Run the handler once.
    fn call(
        &self,
        args: Self::Args,
        ctx: &InvocationContext,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

/// Type-erased handler for dynamic dispatch. Blanket-implemented for every
/// [`Handler`].
pub trait HandlerDyn: Send + Sync {
    /// The declared arity.
    fn arity(&self) -> Arity;

    /// Run the handler with one value per input slot, returning one value
    /// per output slot.
    fn call_dyn<'a>(
        &'a self,
        inputs: Vec<FieldValue>,
        ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, HandlerError>>;
}

impl<T: Handler> HandlerDyn for T {
    fn arity(&self) -> Arity {
        Arity::new(T::Args::ARITY, T::Output::ARITY)
    }

    fn call_dyn<'a>(
        &'a self,
        inputs: Vec<FieldValue>,
        ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, HandlerError>> {
        Box::pin(async move {
            let args = T::Args::from_args(inputs)?;
            let output = self.call(args, ctx).await.map_err(Into::into)?;
            Ok(output.into_outputs())
        })
    }
}

/// Handler backed by an infallible synchronous closure. See [`handler_fn`].
pub struct FnHandler<F, A, O> {
    f: F,
    _marker: PhantomData<fn(A) -> O>,
}

impl<F: Clone, A, O> Clone for FnHandler<F, A, O> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F, A, O> Handler for FnHandler<F, A, O>
where
    F: Fn(A) -> O + Send + Sync,
    A: FromArgs,
    O: IntoOutputs + Send,
{
    type Args = A;
    type Output = O;
    type Error = std::convert::Infallible;

    fn call(
        &self,
        args: A,
        _ctx: &InvocationContext,
    ) -> impl Future<Output = Result<O, Self::Error>> + Send {
        let output = (self.f)(args);
        async move { Ok(output) }
    }
}

/// Wrap a synchronous closure taking an argument tuple.
///
/// ```
/// use bindery_types::*;
///
/// let greet = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
/// assert_eq!(greet.arity(), Arity::new(1, 1));
/// ```
#[must_use]
pub fn handler_fn<F, A, O>(f: F) -> FnHandler<F, A, O>
where
    F: Fn(A) -> O + Send + Sync,
    A: FromArgs,
    O: IntoOutputs + Send,
{
    FnHandler {
        f,
        _marker: PhantomData,
    }
}

/// Handler backed by a fallible synchronous closure. See [`try_handler_fn`].
pub struct TryFnHandler<F, A, O, E> {
    f: F,
    _marker: PhantomData<fn(A) -> Result<O, E>>,
}

impl<F: Clone, A, O, E> Clone for TryFnHandler<F, A, O, E> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F, A, O, E> Handler for TryFnHandler<F, A, O, E>
where
    F: Fn(A) -> Result<O, E> + Send + Sync,
    A: FromArgs,
    O: IntoOutputs + Send,
    E: Into<HandlerError> + Send,
{
    type Args = A;
    type Output = O;
    type Error = E;

    fn call(
        &self,
        args: A,
        _ctx: &InvocationContext,
    ) -> impl Future<Output = Result<O, E>> + Send {
        let result = (self.f)(args);
        async move { result }
    }
}

/// Wrap a synchronous closure that may fail.
#[must_use]
pub fn try_handler_fn<F, A, O, E>(f: F) -> TryFnHandler<F, A, O, E>
where
    F: Fn(A) -> Result<O, E> + Send + Sync,
    A: FromArgs,
    O: IntoOutputs + Send,
    E: Into<HandlerError> + Send,
{
    TryFnHandler {
        f,
        _marker: PhantomData,
    }
}

/// Handler over raw slot values with an explicitly declared arity.
/// See [`dyn_handler_fn`].
#[derive(Clone)]
pub struct DynFnHandler<F> {
    arity: Arity,
    f: F,
}

impl<F> HandlerDyn for DynFnHandler<F>
where
    F: Fn(Vec<FieldValue>) -> Result<Vec<FieldValue>, HandlerError> + Send + Sync,
{
    fn arity(&self) -> Arity {
        self.arity
    }

    fn call_dyn<'a>(
        &'a self,
        inputs: Vec<FieldValue>,
        _ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<Vec<FieldValue>, HandlerError>> {
        let result = (self.f)(inputs);
        Box::pin(async move { result })
    }
}

/// Wrap a closure over raw values. The closure is trusted to honor `arity`;
/// the descriptor checks returned counts at invocation time.
#[must_use]
pub fn dyn_handler_fn<F>(arity: Arity, f: F) -> DynFnHandler<F>
where
    F: Fn(Vec<FieldValue>) -> Result<Vec<FieldValue>, HandlerError> + Send + Sync,
{
    DynFnHandler { arity, f }
}
