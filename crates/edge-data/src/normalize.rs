//! Firestore tagged value normalization.
//!
//! The Firestore REST API encodes every field as a single-key object naming
//! its type (`{"stringValue": "x"}`, `{"mapValue": {"fields": {...}}}`).
//! [`TaggedValue`] is the closed decoding of that shape and
//! [`normalize_value`] flattens it into plain JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Recognized value tags, in dispatch priority order.
///
/// When a malformed value carries several tags, the lowest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tag {
    String,
    Integer,
    Double,
    Boolean,
    Map,
    Array,
}

impl Tag {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "stringValue" => Some(Self::String),
            "integerValue" => Some(Self::Integer),
            "doubleValue" => Some(Self::Double),
            "booleanValue" => Some(Self::Boolean),
            "mapValue" => Some(Self::Map),
            "arrayValue" => Some(Self::Array),
            _ => None,
        }
    }
}

/// A decoded Firestore value.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    String(String),
    /// Parsed payload; `None` when the payload is not numeric.
    Integer(Option<Number>),
    /// Parsed payload; `None` when the payload is not a finite number.
    Double(Option<Number>),
    Boolean(bool),
    /// Fields in upstream order.
    Map(Vec<(String, TaggedValue)>),
    Array(Vec<TaggedValue>),
    /// A string or boolean tag whose payload has another kind, kept as is.
    Verbatim(Value),
    /// Null, `nullValue`, or no supported tag.
    Unrecognized,
}

impl TaggedValue {
    /// Decode a raw JSON value.
    pub fn from_json(raw: &Value) -> Self {
        let Value::Object(tags) = raw else {
            return Self::Unrecognized;
        };

        let first = tags
            .iter()
            .filter_map(|(key, payload)| Tag::parse(key).map(|tag| (tag, payload)))
            .min_by_key(|(tag, _)| *tag);

        let Some((tag, payload)) = first else {
            return Self::Unrecognized;
        };

        match (tag, payload) {
            (Tag::String, Value::String(s)) => Self::String(s.clone()),
            (Tag::Boolean, Value::Bool(b)) => Self::Boolean(*b),
            (Tag::String | Tag::Boolean, other) => Self::Verbatim(other.clone()),
            (Tag::Integer, payload) => Self::Integer(parse_integer(payload)),
            (Tag::Double, payload) => Self::Double(parse_number(payload)),
            (Tag::Map, payload) => Self::Map(match payload.get("fields") {
                Some(Value::Object(fields)) => fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Self::from_json(value)))
                    .collect(),
                _ => Vec::new(),
            }),
            (Tag::Array, payload) => Self::Array(match payload.get("values") {
                Some(Value::Array(values)) => values.iter().map(Self::from_json).collect(),
                _ => Vec::new(),
            }),
        }
    }
}

impl From<&Value> for TaggedValue {
    fn from(raw: &Value) -> Self {
        Self::from_json(raw)
    }
}

impl<'de> Deserialize<'de> for TaggedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&raw))
    }
}

/// Like [`parse_number`], but integral values such as `"1e3"` come back as integers.
fn parse_integer(payload: &Value) -> Option<Number> {
    let number = parse_number(payload)?;
    match number.as_f64() {
        Some(f) if !number.is_i64() && !number.is_u64() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            Some(Number::from(f as i64))
        }
        _ => Some(number),
    }
}

/// Numeric payloads arrive as decimal strings (`"42"`) or JSON numbers.
///
/// Null reads as zero and booleans as zero or one.
fn parse_number(payload: &Value) -> Option<Number> {
    match payload {
        Value::Number(n) => Some(n.clone()),
        Value::Null => Some(Number::from(0)),
        Value::Bool(b) => Some(Number::from(i64::from(*b))),
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                Some(Number::from(0))
            } else if let Ok(i) = text.parse::<i64>() {
                Some(Number::from(i))
            } else {
                text.parse::<f64>().ok().and_then(Number::from_f64)
            }
        }
        _ => None,
    }
}

/// Flatten a decoded value into plain JSON.
pub fn normalize_value(value: &TaggedValue) -> Value {
    match value {
        TaggedValue::String(s) => Value::String(s.clone()),
        TaggedValue::Integer(n) | TaggedValue::Double(n) => {
            n.clone().map(Value::Number).unwrap_or(Value::Null)
        }
        TaggedValue::Boolean(b) => Value::Bool(*b),
        TaggedValue::Map(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), normalize_value(field)))
                .collect(),
        ),
        TaggedValue::Array(values) => Value::Array(values.iter().map(normalize_value).collect()),
        TaggedValue::Verbatim(payload) => payload.clone(),
        TaggedValue::Unrecognized => Value::Null,
    }
}

/// Normalize a raw, possibly absent, Firestore value.
pub fn normalize_raw(raw: Option<&Value>) -> Value {
    raw.map(|value| normalize_value(&TaggedValue::from_json(value)))
        .unwrap_or(Value::Null)
}

/// A document as returned by the Firestore REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    /// Full resource name, e.g. `projects/p/databases/(default)/documents/c/abc`.
    pub name: String,
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

/// A normalized document: `id` first, then each field in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// The document id.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Look up a normalized field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field names in output order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Convert a raw document into a [`Document`].
///
/// A source field literally named `id` replaces the derived id value.
pub fn convert_document(doc: &RawDocument) -> Document {
    let id = doc.name.rsplit('/').next().unwrap_or_default();

    let mut out = Map::new();
    out.insert("id".to_string(), Value::String(id.to_string()));

    if let Some(fields) = &doc.fields {
        for (name, raw) in fields {
            out.insert(name.clone(), normalize_raw(Some(raw)));
        }
    }

    Document(out)
}
