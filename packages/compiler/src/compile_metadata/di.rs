//! Dependency injection metadata: dependencies, queries, providers and
//! factories.

use bitflags::bitflags;
use serde_json::{json, Value};

use super::identifier::{CompileMetadataWithIdentifier, IdentifierMetadata};
use super::json::{
    array_from_json, as_object, bool_field, decode_node, field, list_from_json, obj_from_json,
    opt_string, MetadataValue, ToJson,
};
use super::token::TokenMetadata;
use super::type_meta::TypeMetadata;
use super::CompileMetadata;
use crate::error::{MetadataError, Result};

bitflags! {
    /// Resolution qualifiers of a dependency.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DiFlags: u8 {
        const ATTRIBUTE = 1 << 0;
        const SELF = 1 << 1;
        const HOST = 1 << 2;
        const SKIP_SELF = 1 << 3;
        const OPTIONAL = 1 << 4;
        const VALUE = 1 << 5;
    }
}

const FLAG_FIELDS: [(&str, DiFlags); 6] = [
    ("isAttribute", DiFlags::ATTRIBUTE),
    ("isSelf", DiFlags::SELF),
    ("isHost", DiFlags::HOST),
    ("isSkipSelf", DiFlags::SKIP_SELF),
    ("isOptional", DiFlags::OPTIONAL),
    ("isValue", DiFlags::VALUE),
];

/// Construction record for [`DiDependencyMetadata`]. Every flag defaults to `false`.
#[derive(Debug, Clone, Default)]
pub struct DiDependencyConfig {
    pub is_attribute: bool,
    pub is_self: bool,
    pub is_host: bool,
    pub is_skip_self: bool,
    pub is_optional: bool,
    pub is_value: bool,
    pub query: Option<QueryMetadata>,
    pub view_query: Option<QueryMetadata>,
    pub token: Option<TokenMetadata>,
    pub value: MetadataValue,
}

/// A single constructor or factory dependency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiDependencyMetadata {
    pub flags: DiFlags,
    pub query: Option<QueryMetadata>,
    pub view_query: Option<QueryMetadata>,
    pub token: Option<TokenMetadata>,
    pub value: MetadataValue,
}

impl DiDependencyMetadata {
    pub fn new(config: DiDependencyConfig) -> Self {
        let mut flags = DiFlags::empty();
        flags.set(DiFlags::ATTRIBUTE, config.is_attribute);
        flags.set(DiFlags::SELF, config.is_self);
        flags.set(DiFlags::HOST, config.is_host);
        flags.set(DiFlags::SKIP_SELF, config.is_skip_self);
        flags.set(DiFlags::OPTIONAL, config.is_optional);
        flags.set(DiFlags::VALUE, config.is_value);
        Self {
            flags,
            query: config.query,
            view_query: config.view_query,
            token: config.token,
            value: config.value,
        }
    }

    /// A plain dependency on `token`.
    pub fn on(token: TokenMetadata) -> Self {
        Self {
            token: Some(token),
            ..Default::default()
        }
    }

    pub fn is_attribute(&self) -> bool {
        self.flags.contains(DiFlags::ATTRIBUTE)
    }

    pub fn is_self(&self) -> bool {
        self.flags.contains(DiFlags::SELF)
    }

    pub fn is_host(&self) -> bool {
        self.flags.contains(DiFlags::HOST)
    }

    pub fn is_skip_self(&self) -> bool {
        self.flags.contains(DiFlags::SKIP_SELF)
    }

    pub fn is_optional(&self) -> bool {
        self.flags.contains(DiFlags::OPTIONAL)
    }

    pub fn is_value(&self) -> bool {
        self.flags.contains(DiFlags::VALUE)
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "diDeps")?;
        let mut flags = DiFlags::empty();
        for (key, flag) in FLAG_FIELDS {
            flags.set(flag, bool_field(data, key)?);
        }
        Ok(Self {
            flags,
            token: obj_from_json(field(data, "token"), TokenMetadata::from_json)?,
            query: obj_from_json(field(data, "query"), QueryMetadata::from_json)?,
            view_query: obj_from_json(field(data, "viewQuery"), QueryMetadata::from_json)?,
            value: MetadataValue::from_json(field(data, "value"))?,
        })
    }
}

impl ToJson for DiDependencyMetadata {
    fn to_json(&self) -> Value {
        let mut data = json!({
            "token": self.token.to_json(),
            "query": self.query.to_json(),
            "viewQuery": self.view_query.to_json(),
            "value": self.value.to_json(),
        });
        if let Value::Object(map) = &mut data {
            for (key, flag) in FLAG_FIELDS {
                map.insert(key.to_string(), Value::Bool(self.flags.contains(flag)));
            }
        }
        data
    }
}

/// A content or view query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMetadata {
    pub selectors: Vec<TokenMetadata>,
    pub descendants: bool,
    pub first: bool,
    pub property_name: Option<String>,
    pub read: Option<TokenMetadata>,
}

impl QueryMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "query")?;
        Ok(Self {
            selectors: list_from_json(
                field(data, "selectors"),
                "selectors",
                TokenMetadata::from_json,
            )?,
            descendants: bool_field(data, "descendants")?,
            first: bool_field(data, "first")?,
            property_name: opt_string(data, "propertyName")?,
            read: obj_from_json(field(data, "read"), TokenMetadata::from_json)?,
        })
    }
}

impl ToJson for QueryMetadata {
    fn to_json(&self) -> Value {
        json!({
            "selectors": self.selectors.to_json(),
            "descendants": self.descendants,
            "first": self.first,
            "propertyName": self.property_name,
            "read": self.read.to_json(),
        })
    }
}

/// A factory function and the dependencies it is invoked with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryMetadata {
    pub identifier: IdentifierMetadata,
    pub di_deps: Vec<DiDependencyMetadata>,
}

impl FactoryMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "useFactory")?;
        Ok(Self {
            identifier: IdentifierMetadata::from_json_map(data)?,
            di_deps: list_from_json(
                field(data, "diDeps"),
                "diDeps",
                DiDependencyMetadata::from_json,
            )?,
        })
    }
}

impl ToJson for FactoryMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "Factory",
            "name": self.identifier.name,
            "prefix": self.identifier.prefix,
            "moduleUrl": self.identifier.module_url,
            "value": self.identifier.value.to_json(),
            "diDeps": self.di_deps.to_json(),
        })
    }
}

impl CompileMetadataWithIdentifier for FactoryMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        Some(&self.identifier)
    }
}

/// How a provider produces its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderStrategy {
    Class(TypeMetadata),
    Value(MetadataValue),
    Existing(TokenMetadata),
    Factory(FactoryMetadata),
}

/// Construction record for [`ProviderMetadata`]; exactly one `use_*` must be set.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub token: Option<TokenMetadata>,
    pub use_class: Option<TypeMetadata>,
    pub use_value: Option<MetadataValue>,
    pub use_existing: Option<TokenMetadata>,
    pub use_factory: Option<FactoryMetadata>,
    pub deps: Option<Vec<DiDependencyMetadata>>,
    pub multi: bool,
}

/// A binding from a token to the strategy producing its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderMetadata {
    pub token: Option<TokenMetadata>,
    pub strategy: ProviderStrategy,
    /// `None` means the dependencies of the strategy itself are used.
    pub deps: Option<Vec<DiDependencyMetadata>>,
    pub multi: bool,
}

impl ProviderMetadata {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let ProviderConfig {
            token,
            use_class,
            use_value,
            use_existing,
            use_factory,
            deps,
            multi,
        } = config;
        let mut strategies: Vec<ProviderStrategy> = [
            use_class.map(ProviderStrategy::Class),
            use_value.map(ProviderStrategy::Value),
            use_existing.map(ProviderStrategy::Existing),
            use_factory.map(ProviderStrategy::Factory),
        ]
        .into_iter()
        .flatten()
        .collect();
        if strategies.len() != 1 {
            return Err(MetadataError::ProviderStrategy {
                count: strategies.len(),
            });
        }
        Ok(Self {
            token,
            strategy: strategies.remove(0),
            deps,
            multi,
        })
    }

    pub fn use_class(&self) -> Option<&TypeMetadata> {
        match &self.strategy {
            ProviderStrategy::Class(type_meta) => Some(type_meta),
            _ => None,
        }
    }

    pub fn use_value(&self) -> Option<&MetadataValue> {
        match &self.strategy {
            ProviderStrategy::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn use_existing(&self) -> Option<&TokenMetadata> {
        match &self.strategy {
            ProviderStrategy::Existing(token) => Some(token),
            _ => None,
        }
    }

    pub fn use_factory(&self) -> Option<&FactoryMetadata> {
        match &self.strategy {
            ProviderStrategy::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// A `null` `useValue` cannot be told apart from a missing one on the
    /// wire, so a node without any strategy restores as `useValue: null`.
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "provider")?;
        let use_value = match field(data, "useValue") {
            Value::Null => None,
            value => Some(MetadataValue::from_json(value)?),
        };
        let mut config = ProviderConfig {
            token: obj_from_json(field(data, "token"), TokenMetadata::from_json)?,
            use_class: obj_from_json(field(data, "useClass"), TypeMetadata::from_json)?,
            use_value,
            use_existing: obj_from_json(field(data, "useExisting"), TokenMetadata::from_json)?,
            use_factory: obj_from_json(field(data, "useFactory"), FactoryMetadata::from_json)?,
            deps: array_from_json(field(data, "deps"), "deps", DiDependencyMetadata::from_json)?,
            multi: bool_field(data, "multi")?,
        };
        if config.use_class.is_none()
            && config.use_value.is_none()
            && config.use_existing.is_none()
            && config.use_factory.is_none()
        {
            config.use_value = Some(MetadataValue::Null);
        }
        Self::new(config)
    }
}

impl ToJson for ProviderMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "Provider",
            "token": self.token.to_json(),
            "useClass": self.use_class().to_json(),
            "useExisting": self.use_existing().to_json(),
            "useValue": self.use_value().to_json(),
            "useFactory": self.use_factory().to_json(),
            "multi": self.multi,
            "deps": self.deps.as_deref().to_json(),
        })
    }
}

/// An entry of a `providers` list: a full provider, a bare class or
/// identifier, or a nested list of entries.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEntry {
    Provider(ProviderMetadata),
    Type(TypeMetadata),
    Identifier(IdentifierMetadata),
    List(Vec<ProviderEntry>),
}

impl ProviderEntry {
    pub fn from_json(data: &Value) -> Result<Self> {
        match data {
            Value::Array(_) => Ok(ProviderEntry::List(list_from_json(
                data,
                "providers",
                ProviderEntry::from_json,
            )?)),
            Value::Object(_) => decode_node(data),
            _ => Err(MetadataError::InvalidField {
                field: "providers",
                expected: "a provider, type, identifier or list",
            }),
        }
    }
}

impl ToJson for ProviderEntry {
    fn to_json(&self) -> Value {
        match self {
            ProviderEntry::Provider(provider) => provider.to_json(),
            ProviderEntry::Type(type_meta) => type_meta.to_json(),
            ProviderEntry::Identifier(identifier) => identifier.to_json(),
            ProviderEntry::List(entries) => entries.to_json(),
        }
    }
}

impl TryFrom<CompileMetadata> for ProviderEntry {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::Provider(provider) => Ok(ProviderEntry::Provider(provider)),
            CompileMetadata::Type(type_meta) => Ok(ProviderEntry::Type(type_meta)),
            CompileMetadata::Identifier(identifier) => Ok(ProviderEntry::Identifier(identifier)),
            other => Err(other.unexpected("Provider")),
        }
    }
}

impl From<ProviderMetadata> for ProviderEntry {
    fn from(provider: ProviderMetadata) -> Self {
        ProviderEntry::Provider(provider)
    }
}

impl From<TypeMetadata> for ProviderEntry {
    fn from(type_meta: TypeMetadata) -> Self {
        ProviderEntry::Type(type_meta)
    }
}
