use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::json::{as_object, field, opt_string, JsonMap, MetadataValue, ToJson};
use super::type_meta::TypeMetadata;
use crate::error::Result;

/// A live object from the running application (a class, a function, an
/// `OpaqueToken` instance).
///
/// Handles compare by identity and are never serialized: a value that went
/// through JSON comes back without its handle.
#[derive(Clone)]
pub struct RuntimeHandle(Rc<dyn Any>);

impl RuntimeHandle {
    pub fn new<T: Any>(value: T) -> Self {
        RuntimeHandle(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Identity of the underlying allocation.
    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for RuntimeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for RuntimeHandle {}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeHandle({:#x})", self.address())
    }
}

/// A named symbol that generated code can import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentifierMetadata {
    pub runtime: Option<RuntimeHandle>,
    pub name: Option<String>,
    pub module_url: Option<String>,
    pub prefix: Option<String>,
    pub value: MetadataValue,
}

impl IdentifierMetadata {
    pub fn new(name: impl Into<String>, module_url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            module_url: Some(module_url.into()),
            ..Default::default()
        }
    }

    pub fn with_runtime(mut self, runtime: RuntimeHandle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "identifier")?;
        Self::from_json_map(data)
    }

    pub(crate) fn from_json_map(data: &JsonMap) -> Result<Self> {
        Ok(Self {
            runtime: None,
            name: opt_string(data, "name")?,
            module_url: opt_string(data, "moduleUrl")?,
            prefix: opt_string(data, "prefix")?,
            value: MetadataValue::from_json(field(data, "value"))?,
        })
    }
}

impl ToJson for IdentifierMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "Identifier",
            "name": self.name,
            "moduleUrl": self.module_url,
            "prefix": self.prefix,
            "value": self.value.to_json(),
        })
    }
}

/// Metadata that can be referred to by an identifier.
pub trait CompileMetadataWithIdentifier {
    fn identifier(&self) -> Option<&IdentifierMetadata>;
}

/// Metadata describing a compiled class.
pub trait CompileMetadataWithType: CompileMetadataWithIdentifier {
    fn type_meta(&self) -> Option<&TypeMetadata>;
}

impl CompileMetadataWithIdentifier for IdentifierMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        Some(self)
    }
}

/// A symbol reference produced by static analysis instead of a live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSymbol {
    pub name: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

impl StaticSymbol {
    pub fn from_json(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Whether `value` is a `{name, filePath}` static symbol.
pub fn is_static_symbol(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        !field(map, "name").is_null() && !field(map, "filePath").is_null()
    })
}
