use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categorical or numeric key carried by a datum field.
///
/// Keys are hashable so they can index partitions and running totals.
/// Equality is exact: `Key::Number(1.0)` and `Key::Text("1")` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl Key {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Numeric view of the key; numeric strings are coerced.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.0),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Converts a loose JSON value into a key. Objects, arrays and null have no key.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_f64().map(Self::number),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Bool(flag) => Some(Self::Text(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(value) => serde_json::Number::from_f64(value.0)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value.0),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::number(f64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Named accessor for a datum field.
///
/// The well-known record schema gets dedicated variants; every other name
/// resolves against [`DataPoint::extra`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    Name,
    Value,
    Group,
    Order,
    Min,
    Max,
    Target,
    Actual,
    Size,
    Extra(String),
}

impl Field {
    #[must_use]
    pub fn extra(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Value => "value",
            Self::Group => "group",
            Self::Order => "order",
            Self::Min => "min",
            Self::Max => "max",
            Self::Target => "target",
            Self::Actual => "actual",
            Self::Size => "size",
            Self::Extra(name) => name,
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "value" => Self::Value,
            "group" => Self::Group,
            "order" => Self::Order,
            "min" => Self::Min,
            "max" => Self::Max,
            "target" => Self::Target,
            "actual" => Self::Actual,
            "size" => Self::Size,
            other => Self::Extra(other.to_owned()),
        }
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Field> for String {
    fn from(value: Field) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chart record.
///
/// `name`/`value` are the categorical key and magnitude every chart reads.
/// Multi-series charts add `group`, grouped layouts recover identity through
/// `order`, range charts use `min`/`max`/`target`/`actual`, and hierarchical
/// charts nest `children` weighted by `size`. Unknown JSON fields survive in
/// `extra` in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub name: Key,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DataPoint>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl DataPoint {
    #[must_use]
    pub fn new(name: impl Into<Key>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<Key>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: f64, actual: f64) -> Self {
        self.target = Some(target);
        self.actual = Some(actual);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<DataPoint>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Reads a field as a key. Absent optional fields yield `None`.
    #[must_use]
    pub fn field(&self, field: &Field) -> Option<Key> {
        match field {
            Field::Name => Some(self.name.clone()),
            Field::Value => Some(Key::number(self.value)),
            Field::Group => self.group.clone(),
            Field::Order => self.order.map(|order| Key::number(order as f64)),
            Field::Min => self.min.map(Key::number),
            Field::Max => self.max.map(Key::number),
            Field::Target => self.target.map(Key::number),
            Field::Actual => self.actual.map(Key::number),
            Field::Size => self.size.map(Key::number),
            Field::Extra(name) => self.extra.get(name).and_then(Key::from_json),
        }
    }

    #[must_use]
    pub fn field_f64(&self, field: &Field) -> Option<f64> {
        self.field(field).and_then(|key| key.as_f64())
    }

    /// Writes a field from a key. Numeric fields ignore keys that are not numbers.
    pub fn set_field(&mut self, field: &Field, key: Key) {
        match field {
            Field::Name => self.name = key,
            Field::Value => {
                if let Some(value) = key.as_f64() {
                    self.value = value;
                }
            }
            Field::Group => self.group = Some(key),
            Field::Order => {
                self.order = key
                    .as_f64()
                    .filter(|v| *v >= 0.0 && v.fract() == 0.0)
                    .map(|v| v as usize);
            }
            Field::Min => self.min = key.as_f64(),
            Field::Max => self.max = key.as_f64(),
            Field::Target => self.target = key.as_f64(),
            Field::Actual => self.actual = key.as_f64(),
            Field::Size => self.size = key.as_f64(),
            Field::Extra(name) => {
                self.extra.insert(name.clone(), key.to_json());
            }
        }
    }
}
