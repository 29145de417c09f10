use serde_json::{json, Value};

use super::di::ProviderEntry;
use super::identifier::{
    CompileMetadataWithIdentifier, CompileMetadataWithType, IdentifierMetadata,
};
use super::json::{
    as_object, bool_field, decode_nodes, field, list_from_json, obj_from_json, opt_string, ToJson,
};
use super::type_meta::TypeMetadata;
use crate::core::{LifecycleHooks, SerializedEnum};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeMetadata {
    pub type_: Option<TypeMetadata>,
    pub name: Option<String>,
    pub pure: bool,
    pub lifecycle_hooks: Vec<LifecycleHooks>,
}

impl PipeMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "pipe")?;
        Ok(Self {
            type_: obj_from_json(field(data, "type"), TypeMetadata::from_json)?,
            name: opt_string(data, "name")?,
            pure: bool_field(data, "pure")?,
            lifecycle_hooks: list_from_json(
                field(data, "lifecycleHooks"),
                "lifecycleHooks",
                LifecycleHooks::deserialize_enum,
            )?,
        })
    }
}

impl ToJson for PipeMetadata {
    fn to_json(&self) -> Value {
        let lifecycle_hooks: Vec<Value> = self
            .lifecycle_hooks
            .iter()
            .map(|hook| hook.serialize_enum())
            .collect();
        json!({
            "class": "Pipe",
            "type": self.type_.to_json(),
            "name": self.name,
            "pure": self.pure,
            "lifecycleHooks": lifecycle_hooks,
        })
    }
}

impl CompileMetadataWithIdentifier for PipeMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        self.type_.as_ref().map(|type_meta| &type_meta.identifier)
    }
}

impl CompileMetadataWithType for PipeMetadata {
    fn type_meta(&self) -> Option<&TypeMetadata> {
        self.type_.as_ref()
    }
}

/// Metadata regarding compilation of an application module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppModuleMetadata {
    pub type_: Option<TypeMetadata>,
    pub providers: Vec<ProviderEntry>,
    pub directives: Vec<TypeMetadata>,
    pub pipes: Vec<TypeMetadata>,
    pub precompile: Vec<TypeMetadata>,
    /// Imported modules.
    pub modules: Vec<TypeMetadata>,
}

impl AppModuleMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "appModule")?;
        Ok(Self {
            type_: obj_from_json(field(data, "type"), TypeMetadata::from_json)?,
            providers: list_from_json(
                field(data, "providers"),
                "providers",
                ProviderEntry::from_json,
            )?,
            directives: decode_nodes(field(data, "directives"), "directives")?,
            pipes: decode_nodes(field(data, "pipes"), "pipes")?,
            precompile: list_from_json(
                field(data, "precompile"),
                "precompile",
                TypeMetadata::from_json,
            )?,
            modules: list_from_json(field(data, "modules"), "modules", TypeMetadata::from_json)?,
        })
    }
}

impl ToJson for AppModuleMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AppModule",
            "type": self.type_.to_json(),
            "providers": self.providers.to_json(),
            "directives": self.directives.to_json(),
            "pipes": self.pipes.to_json(),
            "precompile": self.precompile.to_json(),
            "modules": self.modules.to_json(),
        })
    }
}

impl CompileMetadataWithIdentifier for AppModuleMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        self.type_.as_ref().map(|type_meta| &type_meta.identifier)
    }
}

impl CompileMetadataWithType for AppModuleMetadata {
    fn type_meta(&self) -> Option<&TypeMetadata> {
        self.type_.as_ref()
    }
}
