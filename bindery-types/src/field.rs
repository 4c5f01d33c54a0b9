//! Field kinds and specs: the typed description of one input or output slot.
//!
//! A [`FieldSpec`] is a [`FieldKind`] plus [`FieldOptions`]. The kind fixes
//! which [`FieldValue`] variant may flow through the slot; the options carry
//! display configuration and a default. Specs are validated at bind time via
//! [`FieldSpec::validate`], and request values are checked against them with
//! [`FieldSpec::coerce_input`] and [`FieldSpec::normalize_output`].

use serde::{Deserialize, Serialize};

use crate::error::{BindError, ValueError};
use crate::value::{FieldValue, LabelValue, MediaSource, Table};

/// The closed set of slot kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single or multi-line text.
    Text,
    /// Free numeric entry.
    Number,
    /// Numeric entry within an inclusive range.
    Slider {
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
    },
    /// A boolean toggle.
    Checkbox,
    /// One choice from an ordered set of labels.
    Dropdown {
        /// The choice labels, in display order.
        choices: Vec<String>,
    },
    /// An image reference.
    Image,
    /// An audio reference.
    Audio,
    /// A file reference.
    File,
    /// Tabular data.
    #[serde(rename = "dataframe")]
    DataFrame,
    /// Arbitrary JSON.
    Json,
    /// A classification label with optional scores.
    Label,
}

impl FieldKind {
    /// Canonical symbolic name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Slider { .. } => "slider",
            Self::Checkbox => "checkbox",
            Self::Dropdown { .. } => "dropdown",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::File => "file",
            Self::DataFrame => "dataframe",
            Self::Json => "json",
            Self::Label => "label",
        }
    }
}

/// Display and default configuration shared by all kinds.
///
/// Not every option applies to every kind; [`FieldSpec::validate`] rejects
/// the ones that don't.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Caption shown with the component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Hint text for an empty text box. Text only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Visible line count. Text only, at least 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    /// Value used when a request leaves the slot empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    /// Increment between selectable values. Slider only, positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// How many scored classes to keep. Label only, at least 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_top_classes: Option<usize>,
}

/// A typed description of one input or output slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The slot kind.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Kind-specific configuration.
    #[serde(default)]
    pub options: FieldOptions,
}

impl From<FieldKind> for FieldSpec {
    fn from(kind: FieldKind) -> Self {
        Self {
            kind,
            options: FieldOptions::default(),
        }
    }
}

impl FieldSpec {
    /// A text box.
    pub fn text() -> Self {
        FieldKind::Text.into()
    }

    /// A number entry.
    pub fn number() -> Self {
        FieldKind::Number.into()
    }

    /// A slider over `[minimum, maximum]`.
    ///
    /// Fails with [`BindError::InvalidFieldOption`] when the bounds are not
    /// finite or `minimum > maximum`.
    pub fn slider(minimum: f64, maximum: f64) -> Result<Self, BindError> {
        check_bounds(minimum, maximum)?;
        Ok(FieldKind::Slider { minimum, maximum }.into())
    }

    /// A checkbox.
    pub fn checkbox() -> Self {
        FieldKind::Checkbox.into()
    }

    /// A dropdown over the given choices.
    ///
    /// Fails with [`BindError::InvalidFieldOption`] when the choice set is
    /// empty or repeats a label.
    pub fn dropdown<I, S>(choices: I) -> Result<Self, BindError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        check_choices(&choices)?;
        Ok(FieldKind::Dropdown { choices }.into())
    }

    /// An image slot.
    pub fn image() -> Self {
        FieldKind::Image.into()
    }

    /// An audio slot.
    pub fn audio() -> Self {
        FieldKind::Audio.into()
    }

    /// A file slot.
    pub fn file() -> Self {
        FieldKind::File.into()
    }

    /// A table slot.
    pub fn dataframe() -> Self {
        FieldKind::DataFrame.into()
    }

    /// A JSON slot.
    pub fn json() -> Self {
        FieldKind::Json.into()
    }

    /// A classification label slot.
    pub fn label() -> Self {
        FieldKind::Label.into()
    }

    /// Set the caption.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.options.label = Some(label.into());
        self
    }

    /// Set the placeholder hint.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = Some(placeholder.into());
        self
    }

    /// Set the visible line count.
    #[must_use]
    pub fn with_lines(mut self, lines: u32) -> Self {
        self.options.lines = Some(lines);
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    /// Set the slider step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.options.step = Some(step);
        self
    }

    /// Set how many scored classes a label keeps.
    #[must_use]
    pub fn with_num_top_classes(mut self, n: usize) -> Self {
        self.options.num_top_classes = Some(n);
        self
    }

    /// Check every option against the kind.
    pub fn validate(&self) -> Result<(), BindError> {
        let kind = self.kind.name();
        match &self.kind {
            FieldKind::Slider { minimum, maximum } => check_bounds(*minimum, *maximum)?,
            FieldKind::Dropdown { choices } => check_choices(choices)?,
            _ => {}
        }

        let opts = &self.options;
        if !matches!(self.kind, FieldKind::Text) {
            if opts.placeholder.is_some() {
                return Err(BindError::option(kind, "placeholder applies to text only"));
            }
            if opts.lines.is_some() {
                return Err(BindError::option(kind, "lines applies to text only"));
            }
        }
        if opts.lines == Some(0) {
            return Err(BindError::option(kind, "lines must be at least 1"));
        }
        match opts.step {
            Some(_) if !matches!(self.kind, FieldKind::Slider { .. }) => {
                return Err(BindError::option(kind, "step applies to slider only"));
            }
            Some(step) if !(step.is_finite() && step > 0.0) => {
                return Err(BindError::option(kind, format!("step must be positive, got {step}")));
            }
            _ => {}
        }
        match opts.num_top_classes {
            Some(_) if !matches!(self.kind, FieldKind::Label) => {
                return Err(BindError::option(kind, "num_top_classes applies to label only"));
            }
            Some(0) => {
                return Err(BindError::option(kind, "num_top_classes must be at least 1"));
            }
            _ => {}
        }
        if let Some(default) = &opts.default {
            self.check_value(default)
                .map_err(|e| BindError::option(kind, format!("default: {}", e.reason)))?;
        }
        Ok(())
    }

    /// Check that a value may occupy this slot as-is.
    pub fn check_value(&self, value: &FieldValue) -> Result<(), ValueError> {
        let kind = self.kind.name();
        match (&self.kind, value) {
            (FieldKind::Text, FieldValue::Text(_))
            | (FieldKind::Checkbox, FieldValue::Bool(_))
            | (FieldKind::Image, FieldValue::Image(_))
            | (FieldKind::Audio, FieldValue::Audio(_))
            | (FieldKind::File, FieldValue::File(_))
            | (FieldKind::Json, FieldValue::Json(_))
            | (FieldKind::Label, FieldValue::Label(_)) => Ok(()),
            (FieldKind::Number, FieldValue::Number(n)) => check_finite(kind, *n),
            (FieldKind::Slider { minimum, maximum }, FieldValue::Number(n)) => {
                check_finite(kind, *n)?;
                if *n < *minimum || *n > *maximum {
                    return Err(ValueError::new(
                        kind,
                        format!("{n} is outside [{minimum}, {maximum}]"),
                    ));
                }
                Ok(())
            }
            (FieldKind::Dropdown { choices }, FieldValue::Text(choice)) => {
                if choices.iter().any(|c| c == choice) {
                    Ok(())
                } else {
                    Err(ValueError::new(kind, format!("{choice:?} is not one of the choices")))
                }
            }
            (FieldKind::DataFrame, FieldValue::DataFrame(table)) => {
                table.check_shape().map_err(|reason| ValueError::new(kind, reason))
            }
            (_, other) => Err(ValueError::new(
                kind,
                format!("cannot hold a {} value", other.type_name()),
            )),
        }
    }

    /// Turn one raw request value into a checked slot value.
    ///
    /// `null` takes the slot's default, and is an error when there is none.
    /// Numbers also accept numeric strings; media accept either a tagged
    /// [`MediaSource`] object or a bare path/URL string.
    pub fn coerce_input(&self, raw: serde_json::Value) -> Result<FieldValue, ValueError> {
        use serde_json::Value;

        let kind = self.kind.name();
        if raw.is_null() {
            return self
                .options
                .default
                .clone()
                .ok_or_else(|| ValueError::new(kind, "missing value and no default"));
        }

        let value = match (&self.kind, raw) {
            (FieldKind::Text | FieldKind::Dropdown { .. }, Value::String(s)) => FieldValue::Text(s),
            (FieldKind::Number | FieldKind::Slider { .. }, Value::Number(n)) => FieldValue::Number(
                n.as_f64()
                    .ok_or_else(|| ValueError::new(kind, format!("{n} is not representable")))?,
            ),
            (FieldKind::Number | FieldKind::Slider { .. }, Value::String(s)) => {
                FieldValue::Number(s.trim().parse::<f64>().map_err(|_| {
                    ValueError::new(kind, format!("{s:?} is not a number"))
                })?)
            }
            (FieldKind::Checkbox, Value::Bool(b)) => FieldValue::Bool(b),
            (FieldKind::Image | FieldKind::Audio | FieldKind::File, raw) => {
                let media = match raw {
                    Value::String(s) => MediaSource::from_reference(&s),
                    other => serde_json::from_value(other)
                        .map_err(|e| ValueError::new(kind, e.to_string()))?,
                };
                match self.kind {
                    FieldKind::Image => FieldValue::Image(media),
                    FieldKind::Audio => FieldValue::Audio(media),
                    _ => FieldValue::File(media),
                }
            }
            (FieldKind::DataFrame, raw) => FieldValue::DataFrame(
                serde_json::from_value::<Table>(raw)
                    .map_err(|e| ValueError::new(kind, e.to_string()))?,
            ),
            (FieldKind::Json, raw) => FieldValue::Json(raw),
            (FieldKind::Label, Value::String(s)) => FieldValue::Label(LabelValue::new(s)),
            (FieldKind::Label, raw @ Value::Object(_)) => FieldValue::Label(
                serde_json::from_value(raw).map_err(|e| ValueError::new(kind, e.to_string()))?,
            ),
            (_, other) => {
                return Err(ValueError::new(
                    kind,
                    format!("cannot coerce {} from JSON", json_type_name(&other)),
                ));
            }
        };
        self.check_value(&value)?;
        Ok(value)
    }

    /// Fit one handler return value into this output slot.
    ///
    /// Text slots stringify numbers and booleans and label slots accept
    /// plain text. Media slots retag any media value; JSON slots wrap
    /// anything. Label scores are sorted highest first and cut to
    /// `num_top_classes`.
    pub fn normalize_output(&self, value: FieldValue) -> Result<FieldValue, ValueError> {
        let value = match (&self.kind, value) {
            (FieldKind::Text, FieldValue::Number(n)) => FieldValue::Text(n.to_string()),
            (FieldKind::Text, FieldValue::Bool(b)) => FieldValue::Text(b.to_string()),
            (FieldKind::Label, FieldValue::Text(s)) => FieldValue::Label(LabelValue::new(s)),
            (FieldKind::Label, FieldValue::Label(mut l)) => {
                l.confidences
                    .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
                if let Some(n) = self.options.num_top_classes {
                    l.confidences.truncate(n);
                }
                FieldValue::Label(l)
            }
            (
                FieldKind::Image | FieldKind::Audio | FieldKind::File,
                FieldValue::Image(m) | FieldValue::Audio(m) | FieldValue::File(m),
            ) => match self.kind {
                FieldKind::Image => FieldValue::Image(m),
                FieldKind::Audio => FieldValue::Audio(m),
                _ => FieldValue::File(m),
            },
            (FieldKind::Json, FieldValue::Json(v)) => FieldValue::Json(v),
            (FieldKind::Json, other) => FieldValue::Json(other.to_json()),
            (_, other) => other,
        };
        self.check_value(&value)?;
        Ok(value)
    }
}

fn check_bounds(minimum: f64, maximum: f64) -> Result<(), BindError> {
    if !minimum.is_finite() || !maximum.is_finite() {
        return Err(BindError::option("slider", "bounds must be finite"));
    }
    if minimum > maximum {
        return Err(BindError::option(
            "slider",
            format!("minimum {minimum} exceeds maximum {maximum}"),
        ));
    }
    Ok(())
}

fn check_choices(choices: &[String]) -> Result<(), BindError> {
    if choices.is_empty() {
        return Err(BindError::option("dropdown", "choices must not be empty"));
    }
    for (i, choice) in choices.iter().enumerate() {
        if choices[..i].contains(choice) {
            return Err(BindError::option(
                "dropdown",
                format!("duplicate choice {choice:?}"),
            ));
        }
    }
    Ok(())
}

fn check_finite(kind: &'static str, n: f64) -> Result<(), ValueError> {
    if n.is_finite() {
        Ok(())
    } else {
        Err(ValueError::new(kind, format!("{n} is not finite")))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
