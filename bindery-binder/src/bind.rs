//! Turning a handler and component references into a descriptor.

use std::sync::Arc;

use bindery_registry::{ComponentKind, ComponentRef, ComponentRegistry};
use bindery_types::{BindError, FieldSide, FieldSpec, HandlerDyn};
use serde::{Deserialize, Serialize};

use crate::descriptor::ServiceDescriptor;

/// One component or an ordered sequence of them.
///
/// A single value becomes a one-element sequence; `()` is the empty one.
pub trait IntoComponents {
    /// Flatten into an ordered list of references.
    fn into_components(self) -> Vec<ComponentRef>;
}

macro_rules! impl_single_component {
    ($($ty:ty),+ $(,)?) => {$(
        impl IntoComponents for $ty {
            fn into_components(self) -> Vec<ComponentRef> {
                vec![self.into()]
            }
        }
    )+};
}

impl_single_component!(&str, String, FieldSpec, ComponentKind, ComponentRef);

impl IntoComponents for () {
    fn into_components(self) -> Vec<ComponentRef> {
        Vec::new()
    }
}

impl<T: Into<ComponentRef>> IntoComponents for Vec<T> {
    fn into_components(self) -> Vec<ComponentRef> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<ComponentRef>, const N: usize> IntoComponents for [T; N] {
    fn into_components(self) -> Vec<ComponentRef> {
        self.into_iter().map(Into::into).collect()
    }
}

/// Descriptive text a runtime may show around an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Interface title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description shown above the interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Longer text shown below the interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl Metadata {
    /// Metadata with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the article.
    #[must_use]
    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.article = Some(article.into());
        self
    }
}

/// Binds handlers against a component registry.
///
/// `Binder::default()` uses the built-in component defaults; build one from
/// a customized [`ComponentRegistry`] to resolve names against your own.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    registry: ComponentRegistry,
}

impl Binder {
    /// A binder over the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder over the given registry.
    pub fn with_registry(registry: ComponentRegistry) -> Self {
        Self { registry }
    }

    /// The registry names are resolved against.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Bind `handler` to the given input and output components.
    ///
    /// Every component is resolved and validated, then each side's count is
    /// checked against the handler's arity. Errors surface immediately and
    /// the handler is never run.
    pub fn bind<H>(
        &self,
        handler: H,
        inputs: impl IntoComponents,
        outputs: impl IntoComponents,
        metadata: impl Into<Option<Metadata>>,
    ) -> Result<ServiceDescriptor, BindError>
    where
        H: HandlerDyn + 'static,
    {
        self.bind_shared(Arc::new(handler), inputs, outputs, metadata)
    }

    /// Bind an already-shared handler.
    pub fn bind_shared(
        &self,
        handler: Arc<dyn HandlerDyn>,
        inputs: impl IntoComponents,
        outputs: impl IntoComponents,
        metadata: impl Into<Option<Metadata>>,
    ) -> Result<ServiceDescriptor, BindError> {
        let arity = handler.arity();
        let inputs = self.resolve_side(FieldSide::Inputs, inputs, arity.inputs)?;
        let outputs = self.resolve_side(FieldSide::Outputs, outputs, arity.outputs)?;
        let metadata = metadata.into().unwrap_or_default();
        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            title = metadata.title.as_deref().unwrap_or(""),
            "bound interface"
        );
        Ok(ServiceDescriptor::new(handler, arity, inputs, outputs, metadata))
    }

    fn resolve_side(
        &self,
        side: FieldSide,
        components: impl IntoComponents,
        expected: usize,
    ) -> Result<Vec<FieldSpec>, BindError> {
        let specs = components
            .into_components()
            .into_iter()
            .map(|component| {
                let spec = self.registry.resolve_ref(component)?;
                spec.validate()?;
                Ok(spec)
            })
            .collect::<Result<Vec<_>, BindError>>()?;
        if specs.len() != expected {
            return Err(BindError::ArityMismatch {
                side,
                expected,
                actual: specs.len(),
            });
        }
        Ok(specs)
    }
}

/// Bind against the built-in component defaults.
///
/// Shorthand for `Binder::new().bind(..)`.
pub fn bind<H>(
    handler: H,
    inputs: impl IntoComponents,
    outputs: impl IntoComponents,
    metadata: impl Into<Option<Metadata>>,
) -> Result<ServiceDescriptor, BindError>
where
    H: HandlerDyn + 'static,
{
    Binder::new().bind(handler, inputs, outputs, metadata)
}
