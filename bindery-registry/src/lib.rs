#![deny(missing_docs)]
//! Component registry: symbolic names to default field specs.
//!
//! Interfaces can name their slots with short strings (`"text"`,
//! `"number"`, `"slider"`, …) instead of building a [`FieldSpec`] by hand.
//! The [`ComponentRegistry`] turns those names into specs with sensible
//! defaults and passes already-built specs through unchanged. Names map onto
//! the closed [`ComponentKind`] enum, so the default table is an exhaustive
//! match rather than a string lookup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bindery_types::{BindError, FieldKind, FieldSpec};

/// The closed set of component kinds, without kind-specific configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Text box.
    Text,
    /// Number entry.
    Number,
    /// Ranged slider.
    Slider,
    /// Checkbox.
    Checkbox,
    /// Dropdown.
    Dropdown,
    /// Image.
    Image,
    /// Audio.
    Audio,
    /// File.
    File,
    /// Table.
    DataFrame,
    /// JSON.
    Json,
    /// Classification label.
    Label,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 11] = [
        Self::Text,
        Self::Number,
        Self::Slider,
        Self::Checkbox,
        Self::Dropdown,
        Self::Image,
        Self::Audio,
        Self::File,
        Self::DataFrame,
        Self::Json,
        Self::Label,
    ];

    /// Canonical symbolic name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Slider => "slider",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::File => "file",
            Self::DataFrame => "dataframe",
            Self::Json => "json",
            Self::Label => "label",
        }
    }

    /// The component kind of a configured field kind.
    pub fn of(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text,
            FieldKind::Number => Self::Number,
            FieldKind::Slider { .. } => Self::Slider,
            FieldKind::Checkbox => Self::Checkbox,
            FieldKind::Dropdown { .. } => Self::Dropdown,
            FieldKind::Image => Self::Image,
            FieldKind::Audio => Self::Audio,
            FieldKind::File => Self::File,
            FieldKind::DataFrame => Self::DataFrame,
            FieldKind::Json => Self::Json,
            FieldKind::Label => Self::Label,
        }
    }

    /// The built-in default spec.
    ///
    /// The dropdown default has no choices and will not pass validation;
    /// register a configured dropdown with
    /// [`ComponentRegistry::set_default`] to bind it by name.
    pub fn builtin_default(self) -> FieldSpec {
        match self {
            Self::Text => FieldSpec::text().with_lines(1),
            Self::Number => FieldSpec::number(),
            Self::Slider => FieldSpec::from(FieldKind::Slider {
                minimum: 0.0,
                maximum: 100.0,
            })
            .with_step(1.0),
            Self::Checkbox => FieldSpec::checkbox().with_default(false),
            Self::Dropdown => FieldSpec::from(FieldKind::Dropdown {
                choices: Vec::new(),
            }),
            Self::Image => FieldSpec::image(),
            Self::Audio => FieldSpec::audio(),
            Self::File => FieldSpec::file(),
            Self::DataFrame => FieldSpec::dataframe(),
            Self::Json => FieldSpec::json(),
            Self::Label => FieldSpec::label(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = BindError;

    /// Case-insensitive, surrounding whitespace ignored. `"textbox"` and
    /// `"data_frame"` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "text" | "textbox" => Self::Text,
            "number" => Self::Number,
            "slider" => Self::Slider,
            "checkbox" => Self::Checkbox,
            "dropdown" => Self::Dropdown,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "file" => Self::File,
            "dataframe" | "data_frame" => Self::DataFrame,
            "json" => Self::Json,
            "label" => Self::Label,
            _ => return Err(BindError::UnknownComponentKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// A reference to a component: a symbolic name, a bare kind, or a built spec.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentRef {
    /// A symbolic name, resolved through the registry.
    Named(String),
    /// A kind, resolved to its current default.
    Kind(ComponentKind),
    /// A fully-built spec, passed through unchanged.
    Spec(FieldSpec),
}

impl From<&str> for ComponentRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ComponentRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<ComponentKind> for ComponentRef {
    fn from(kind: ComponentKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<FieldSpec> for ComponentRef {
    fn from(spec: FieldSpec) -> Self {
        Self::Spec(spec)
    }
}

/// Default specs per component kind.
///
/// Starts from the built-in table; [`set_default`](Self::set_default)
/// overrides individual kinds.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    overrides: HashMap<ComponentKind, FieldSpec>,
}

impl ComponentRegistry {
    /// A registry using only the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a symbolic name to its default spec.
    pub fn resolve(&self, name: &str) -> Result<FieldSpec, BindError> {
        let kind: ComponentKind = name.parse()?;
        tracing::trace!(component = name, kind = %kind, "resolved component name");
        Ok(self.default_for(kind))
    }

    /// Resolve any component reference. Specs pass through unchanged.
    pub fn resolve_ref(&self, component: ComponentRef) -> Result<FieldSpec, BindError> {
        match component {
            ComponentRef::Named(name) => self.resolve(&name),
            ComponentRef::Kind(kind) => Ok(self.default_for(kind)),
            ComponentRef::Spec(spec) => Ok(spec),
        }
    }

    /// The current default spec for a kind.
    pub fn default_for(&self, kind: ComponentKind) -> FieldSpec {
        self.overrides
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.builtin_default())
    }

    /// Replace the default for the spec's kind. The spec is validated first.
    pub fn set_default(&mut self, spec: FieldSpec) -> Result<&mut Self, BindError> {
        spec.validate()?;
        let kind = ComponentKind::of(&spec.kind);
        tracing::debug!(kind = %kind, "overriding component default");
        self.overrides.insert(kind, spec);
        Ok(self)
    }

    /// Canonical names of every kind, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        ComponentKind::ALL.into_iter().map(ComponentKind::name)
    }
}
