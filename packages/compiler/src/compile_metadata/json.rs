//! JSON helpers shared by every metadata class.
//!
//! Encoded metadata is a `serde_json::Value` tree. Scalars pass through
//! untouched, arrays are walked element by element and every other object
//! is an encoded metadata node that goes back through
//! [`metadata_from_json`].

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use super::{metadata_from_json, CompileMetadata};
use crate::core::SerializedEnum;
use crate::error::{MetadataError, Result};

pub type JsonMap = Map<String, Value>;

static NULL: Value = Value::Null;

/// Encoding half of the metadata JSON protocol.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

/// An opaque value carried by metadata: a scalar, a nested metadata node or
/// a list of those.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MetadataValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<MetadataValue>),
    Node(Box<CompileMetadata>),
}

impl MetadataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&CompileMetadata> {
        match self {
            MetadataValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => MetadataValue::Null,
            Value::Bool(b) => MetadataValue::Bool(*b),
            Value::Number(n) => MetadataValue::Number(n.clone()),
            Value::String(s) => MetadataValue::String(s.clone()),
            Value::Array(items) => MetadataValue::Array(
                items
                    .iter()
                    .map(MetadataValue::from_json)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(_) => MetadataValue::Node(Box::new(metadata_from_json(value)?)),
        })
    }
}

impl ToJson for MetadataValue {
    fn to_json(&self) -> Value {
        match self {
            MetadataValue::Null => Value::Null,
            MetadataValue::Bool(b) => Value::Bool(*b),
            MetadataValue::Number(n) => Value::Number(n.clone()),
            MetadataValue::String(s) => Value::String(s.clone()),
            MetadataValue::Array(items) => items.to_json(),
            MetadataValue::Node(node) => node.to_json(),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(value.into())
    }
}

impl From<CompileMetadata> for MetadataValue {
    fn from(value: CompileMetadata) -> Self {
        MetadataValue::Node(Box::new(value))
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(value: Vec<MetadataValue>) -> Self {
        MetadataValue::Array(value)
    }
}

pub(crate) fn as_object<'a>(value: &'a Value, field: &'static str) -> Result<&'a JsonMap> {
    value.as_object().ok_or(MetadataError::InvalidField {
        field,
        expected: "an object",
    })
}

/// `data[key]`, with a missing key read as `null`.
pub(crate) fn field<'a>(data: &'a JsonMap, key: &str) -> &'a Value {
    data.get(key).unwrap_or(&NULL)
}

pub(crate) fn deserialize_field<T: DeserializeOwned>(
    data: &JsonMap,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>> {
    match field(data, key) {
        Value::Null => Ok(None),
        value => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| MetadataError::InvalidField {
                field: key,
                expected,
            }),
    }
}

pub(crate) fn opt_string(data: &JsonMap, key: &'static str) -> Result<Option<String>> {
    deserialize_field(data, key, "a string")
}

/// Absent flags read as `false`.
pub(crate) fn bool_field(data: &JsonMap, key: &'static str) -> Result<bool> {
    Ok(deserialize_field(data, key, "a boolean")?.unwrap_or(false))
}

pub(crate) fn string_list(data: &JsonMap, key: &'static str) -> Result<Vec<String>> {
    Ok(deserialize_field(data, key, "a list of strings")?.unwrap_or_default())
}

pub(crate) fn string_map(data: &JsonMap, key: &'static str) -> Result<IndexMap<String, String>> {
    Ok(deserialize_field(data, key, "a map of strings")?.unwrap_or_default())
}

pub(crate) fn enum_field<E: SerializedEnum>(data: &JsonMap, key: &str) -> Result<Option<E>> {
    match field(data, key) {
        Value::Null => Ok(None),
        value => E::deserialize_enum(value).map(Some),
    }
}

/// Decode every element of a JSON array; `null` stays absent.
pub(crate) fn array_from_json<T>(
    value: &Value,
    field: &'static str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Option<Vec<T>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items.iter().map(decode).collect::<Result<_>>().map(Some),
        _ => Err(MetadataError::InvalidField {
            field,
            expected: "an array",
        }),
    }
}

/// Like [`array_from_json`], with `null` read as an empty list.
pub(crate) fn list_from_json<T>(
    value: &Value,
    field: &'static str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    Ok(array_from_json(value, field, decode)?.unwrap_or_default())
}

pub(crate) fn obj_from_json<T>(
    value: &Value,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        value => decode(value).map(Some),
    }
}

/// Decode a tagged node and narrow it to the class the field expects.
pub(crate) fn decode_node<T>(value: &Value) -> Result<T>
where
    T: TryFrom<CompileMetadata, Error = MetadataError>,
{
    T::try_from(metadata_from_json(value)?)
}

pub(crate) fn decode_nodes<T>(value: &Value, field: &'static str) -> Result<Vec<T>>
where
    T: TryFrom<CompileMetadata, Error = MetadataError>,
{
    list_from_json(value, field, decode_node::<T>)
}

/// Like [`decode_nodes`], with nested arrays flattened in order.
pub(crate) fn decode_flattened_nodes<T>(value: &Value, field: &'static str) -> Result<Vec<T>>
where
    T: TryFrom<CompileMetadata, Error = MetadataError>,
{
    let mut nodes = Vec::new();
    flatten_nodes_into(value, field, &mut nodes)?;
    Ok(nodes)
}

fn flatten_nodes_into<T>(value: &Value, field: &'static str, out: &mut Vec<T>) -> Result<()>
where
    T: TryFrom<CompileMetadata, Error = MetadataError>,
{
    let items = match value {
        Value::Null => return Ok(()),
        Value::Array(items) => items,
        _ => {
            return Err(MetadataError::InvalidField {
                field,
                expected: "an array",
            })
        }
    };
    for item in items {
        if item.is_array() {
            flatten_nodes_into(item, field, out)?;
        } else {
            out.push(decode_node::<T>(item)?);
        }
    }
    Ok(())
}

pub(crate) fn strings_to_json(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

pub(crate) fn string_map_to_json(map: &IndexMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

pub(crate) fn opt_enum_to_json<E: SerializedEnum>(value: Option<E>) -> Value {
    value.map_or(Value::Null, E::serialize_enum)
}
