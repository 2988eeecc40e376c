//! Attribute values attached to nodes and edges.
//!
//! Attributes are free-form `name -> value` bags. Values are a small closed set of scalars; the
//! temporal variants exist so callers can carry dates through the pipeline, but they are not
//! accepted from JSON and must be converted before charting (see `combograph_core::sanitize`).

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Insertion-ordered attribute bag.
pub type Attrs = IndexMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    #[serde(skip_deserializing)]
    DateTime(NaiveDateTime),
    #[serde(skip_deserializing, serialize_with = "serialize_time_delta")]
    Duration(TimeDelta),
}

fn serialize_time_delta<S>(d: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(d)
}

impl AttrValue {
    /// `Null` and NaN floats count as missing, everything else is present.
    pub fn is_missing(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            AttrValue::Date(_) | AttrValue::DateTime(_) | AttrValue::Duration(_)
        )
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) if !v.is_nan() => Some(*v),
            AttrValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Stable textual key for the value, used wherever a value has to become an identifier
    /// (node ids from edge-table cells, combo group values). Missing values have no key.
    pub fn to_key(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(match self {
            AttrValue::Str(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(v) => write!(f, "{v}"),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Str(v) => f.write_str(v),
            AttrValue::Date(v) => write!(f, "{v}"),
            AttrValue::DateTime(v) => write!(f, "{v}"),
            AttrValue::Duration(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<NaiveDate> for AttrValue {
    fn from(value: NaiveDate) -> Self {
        AttrValue::Date(value)
    }
}

impl From<NaiveDateTime> for AttrValue {
    fn from(value: NaiveDateTime) -> Self {
        AttrValue::DateTime(value)
    }
}

impl From<TimeDelta> for AttrValue {
    fn from(value: TimeDelta) -> Self {
        AttrValue::Duration(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttrValue::Null)
    }
}

/// Builds an [`Attrs`] bag from `(name, value)` pairs.
pub fn attrs<I, K, V>(pairs: I) -> Attrs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttrValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
