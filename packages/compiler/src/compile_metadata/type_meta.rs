use serde_json::{json, Value};

use super::di::DiDependencyMetadata;
use super::identifier::{
    CompileMetadataWithIdentifier, CompileMetadataWithType, IdentifierMetadata,
};
use super::json::{as_object, bool_field, field, list_from_json, ToJson};
use super::CompileMetadata;
use crate::error::{MetadataError, Result};

/// Metadata regarding compilation of a type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMetadata {
    pub identifier: IdentifierMetadata,
    pub is_host: bool,
    /// Dependencies of the constructor.
    pub di_deps: Vec<DiDependencyMetadata>,
}

impl TypeMetadata {
    pub fn new(identifier: IdentifierMetadata) -> Self {
        Self {
            identifier,
            ..Default::default()
        }
    }

    pub fn with_deps(mut self, di_deps: Vec<DiDependencyMetadata>) -> Self {
        self.di_deps = di_deps;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.identifier.name.as_deref()
    }

    pub fn module_url(&self) -> Option<&str> {
        self.identifier.module_url.as_deref()
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "type")?;
        Ok(Self {
            identifier: IdentifierMetadata::from_json_map(data)?,
            is_host: bool_field(data, "isHost")?,
            di_deps: list_from_json(
                field(data, "diDeps"),
                "diDeps",
                DiDependencyMetadata::from_json,
            )?,
        })
    }
}

impl ToJson for TypeMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "Type",
            "name": self.identifier.name,
            "moduleUrl": self.identifier.module_url,
            "prefix": self.identifier.prefix,
            "isHost": self.is_host,
            "value": self.identifier.value.to_json(),
            "diDeps": self.di_deps.to_json(),
        })
    }
}

impl CompileMetadataWithIdentifier for TypeMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        Some(&self.identifier)
    }
}

impl CompileMetadataWithType for TypeMetadata {
    fn type_meta(&self) -> Option<&TypeMetadata> {
        Some(self)
    }
}

impl TryFrom<CompileMetadata> for TypeMetadata {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::Type(type_meta) => Ok(type_meta),
            other => Err(other.unexpected("Type")),
        }
    }
}
