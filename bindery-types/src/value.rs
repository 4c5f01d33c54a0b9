//! Runtime values that flow through input and output slots.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Where a media payload lives. Media are passed by reference; nothing here
/// decodes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaSource {
    /// A file on the local filesystem.
    Path {
        /// Path to the file.
        path: PathBuf,
    },
    /// A remote resource.
    Url {
        /// The resource URL.
        url: String,
    },
    /// Inline base64-encoded bytes.
    Base64 {
        /// MIME type (e.g. "image/png").
        media_type: String,
        /// Base64-encoded data.
        data: String,
    },
}

impl MediaSource {
    /// Interpret a bare string: `http://` and `https://` prefixes are URLs,
    /// anything else is a filesystem path.
    pub fn from_reference(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            Self::Url {
                url: reference.to_string(),
            }
        } else {
            Self::Path {
                path: PathBuf::from(reference),
            }
        }
    }
}

/// Tabular data: a header row and rows of JSON cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names. May be empty for headerless data.
    #[serde(default)]
    pub headers: Vec<String>,
    /// Row-major cell values.
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    /// Check that every row has one cell per header.
    ///
    /// Headerless tables only require all rows to share a width.
    pub fn check_shape(&self) -> Result<(), String> {
        let width = if self.headers.is_empty() {
            match self.rows.first() {
                Some(row) => row.len(),
                None => return Ok(()),
            }
        } else {
            self.headers.len()
        };
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(format!("row {i} has {} cells, expected {width}", row.len()));
            }
        }
        Ok(())
    }
}

/// One class and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    /// Class name.
    pub label: String,
    /// Score, typically in `[0, 1]`.
    pub confidence: f64,
}

/// A classification result: the winning label plus optional per-class scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelValue {
    /// The label to display.
    pub label: String,
    /// Per-class scores, highest first once normalized by a label slot.
    #[serde(default)]
    pub confidences: Vec<Confidence>,
}

impl LabelValue {
    /// A bare label with no scores.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidences: Vec::new(),
        }
    }

    /// Build from `(class, score)` pairs. The top-scoring class becomes the label.
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut confidences: Vec<Confidence> = scores
            .into_iter()
            .map(|(label, confidence)| Confidence {
                label: label.into(),
                confidence,
            })
            .collect();
        confidences.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let label = confidences
            .first()
            .map(|c| c.label.clone())
            .unwrap_or_default();
        Self { label, confidences }
    }
}

/// A value at one input or output position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Text, for text and dropdown slots.
    Text(String),
    /// A number, for number and slider slots.
    Number(f64),
    /// A boolean, for checkbox slots.
    Bool(bool),
    /// An image reference.
    Image(MediaSource),
    /// An audio reference.
    Audio(MediaSource),
    /// A file reference.
    File(MediaSource),
    /// Tabular data.
    #[serde(rename = "dataframe")]
    DataFrame(Table),
    /// Arbitrary JSON.
    Json(serde_json::Value),
    /// A classification label.
    Label(LabelValue),
}

impl FieldValue {
    /// Short name of the value's variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Image(_) => "image",
            Self::Audio(_) => "audio",
            Self::File(_) => "file",
            Self::DataFrame(_) => "dataframe",
            Self::Json(_) => "json",
            Self::Label(_) => "label",
        }
    }

    /// The plain JSON form a runtime would put on the wire.
    ///
    /// Non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Bool(b) => Value::Bool(*b),
            Self::Image(m) | Self::Audio(m) | Self::File(m) => {
                serde_json::to_value(m).unwrap_or(Value::Null)
            }
            Self::DataFrame(t) => serde_json::to_value(t).unwrap_or(Value::Null),
            Self::Json(v) => v.clone(),
            Self::Label(l) => serde_json::to_value(l).unwrap_or(Value::Null),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<LabelValue> for FieldValue {
    fn from(l: LabelValue) -> Self {
        Self::Label(l)
    }
}

impl From<Table> for FieldValue {
    fn from(t: Table) -> Self {
        Self::DataFrame(t)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

/// Conversion from a slot value into a handler parameter type.
pub trait FromFieldValue: Sized {
    /// Convert, failing with [`HandlerError::InvalidArgument`] on a type mismatch.
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError>;
}

/// Conversion from a handler return type into a slot value.
pub trait IntoFieldValue {
    /// Convert into a [`FieldValue`].
    fn into_field_value(self) -> FieldValue;
}

fn mismatch(expected: &str, got: &FieldValue) -> HandlerError {
    HandlerError::InvalidArgument(format!("expected {expected}, got {}", got.type_name()))
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        Ok(value)
    }
}

impl IntoFieldValue for FieldValue {
    fn into_field_value(self) -> FieldValue {
        self
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Label(l) => Ok(l.label),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self)
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Number(n) => Ok(n),
            other => Err(mismatch("number", &other)),
        }
    }
}

impl IntoFieldValue for f64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Number(self)
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Number(n)
                if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 =>
            {
                Ok(n as i64)
            }
            FieldValue::Number(n) => Err(HandlerError::InvalidArgument(format!(
                "expected an integer, got {n}"
            ))),
            other => Err(mismatch("number", &other)),
        }
    }
}

impl IntoFieldValue for i64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Number(self as f64)
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }
}

/// Accepts image, audio, and file values alike; returns an image.
impl FromFieldValue for MediaSource {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Image(m) | FieldValue::Audio(m) | FieldValue::File(m) => Ok(m),
            other => Err(mismatch("media", &other)),
        }
    }
}

impl IntoFieldValue for MediaSource {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Image(self)
    }
}

impl FromFieldValue for Table {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::DataFrame(t) => Ok(t),
            other => Err(mismatch("dataframe", &other)),
        }
    }
}

impl IntoFieldValue for Table {
    fn into_field_value(self) -> FieldValue {
        FieldValue::DataFrame(self)
    }
}

impl FromFieldValue for LabelValue {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Label(l) => Ok(l),
            FieldValue::Text(s) => Ok(LabelValue::new(s)),
            other => Err(mismatch("label", &other)),
        }
    }
}

impl IntoFieldValue for LabelValue {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Label(self)
    }
}

/// Any value converts to its JSON form.
impl FromFieldValue for serde_json::Value {
    fn from_field_value(value: FieldValue) -> Result<Self, HandlerError> {
        match value {
            FieldValue::Json(v) => Ok(v),
            other => Ok(other.to_json()),
        }
    }
}

impl IntoFieldValue for serde_json::Value {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_with_scheme_is_url() {
        assert!(matches!(
            MediaSource::from_reference("https://example.com/cat.png"),
            MediaSource::Url { .. }
        ));
        assert!(matches!(
            MediaSource::from_reference("/tmp/cat.png"),
            MediaSource::Path { .. }
        ));
    }

    #[test]
    fn scores_sorted_highest_first() {
        let label = LabelValue::from_scores([("cat", 0.2), ("dog", 0.7), ("fox", 0.1)]);
        assert_eq!(label.label, "dog");
        assert_eq!(label.confidences[1].label, "cat");
    }

    #[test]
    fn non_finite_number_is_null_json() {
        assert_eq!(FieldValue::Number(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
