//! Dependency injection tokens and the token keyed map.
//!
//! A token has up to two identities. The runtime key is the live handle of
//! its identifier (or its literal value) and only exists while compiling
//! next to a running application. The asset key is built from the
//! identifier's name and import URI so tokens produced by static analysis
//! still find each other. Two tokens are equal when either key matches.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;
use serde_json::{json, Value};

use super::identifier::{CompileMetadataWithIdentifier, IdentifierMetadata};
use super::json::{as_object, bool_field, field, obj_from_json, MetadataValue, ToJson};
use crate::error::{MetadataError, Result};
use crate::reflector::reflector;
use crate::url_resolver::get_url_scheme;
use crate::util::sanitize_identifier;

/// Identity of a token while a live runtime is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeKey {
    /// Address of the identifier's runtime handle.
    Handle(usize),
    /// Canonical JSON text of a literal token value.
    Literal(String),
}

#[derive(Debug, Clone, Default)]
pub struct TokenMetadata {
    value: MetadataValue,
    identifier: Option<IdentifierMetadata>,
    identifier_is_instance: bool,
    asset_cache_key: OnceCell<Option<String>>,
}

impl TokenMetadata {
    pub fn new(
        value: MetadataValue,
        identifier: Option<IdentifierMetadata>,
        identifier_is_instance: bool,
    ) -> Self {
        Self {
            value,
            identifier,
            identifier_is_instance,
            asset_cache_key: OnceCell::new(),
        }
    }

    /// A token keyed by a literal value, e.g. a string token.
    pub fn from_value(value: impl Into<MetadataValue>) -> Self {
        Self::new(value.into(), None, false)
    }

    /// A token denoting the identifier itself.
    pub fn from_identifier(identifier: IdentifierMetadata) -> Self {
        Self::new(MetadataValue::Null, Some(identifier), false)
    }

    /// A token denoting an instance of the identifier.
    pub fn instance_of(identifier: IdentifierMetadata) -> Self {
        Self::new(MetadataValue::Null, Some(identifier), true)
    }

    pub fn value(&self) -> &MetadataValue {
        &self.value
    }

    pub fn identifier_is_instance(&self) -> bool {
        self.identifier_is_instance
    }

    pub fn runtime_cache_key(&self) -> Option<RuntimeKey> {
        match &self.identifier {
            Some(identifier) => identifier
                .runtime
                .as_ref()
                .map(|handle| RuntimeKey::Handle(handle.address())),
            None => literal_key(&self.value).map(RuntimeKey::Literal),
        }
    }

    /// `None` when the identifier's module has no URL scheme, since such a
    /// token cannot be matched across compilation units.
    pub fn asset_cache_key(&self) -> Option<&str> {
        self.asset_cache_key
            .get_or_init(|| match &self.identifier {
                Some(identifier) => {
                    let module_url = identifier
                        .module_url
                        .as_deref()
                        .filter(|url| get_url_scheme(url).is_some())?;
                    let name = identifier.name.as_deref().unwrap_or("");
                    let uri = reflector().import_uri(module_url, name);
                    Some(format!("{}|{}|{}", name, uri, self.identifier_is_instance))
                }
                None => literal_key(&self.value),
            })
            .as_deref()
    }

    /// Whether both tokens denote the same injection key.
    pub fn equals_to(&self, other: &TokenMetadata) -> bool {
        let rk = self.runtime_cache_key();
        if rk.is_some() && rk == other.runtime_cache_key() {
            return true;
        }
        let ak = self.asset_cache_key();
        ak.is_some() && ak == other.asset_cache_key()
    }

    pub fn name(&self) -> String {
        match (&self.value, &self.identifier) {
            (MetadataValue::Null, Some(identifier)) => {
                identifier.name.clone().unwrap_or_default()
            }
            (MetadataValue::Null, None) => String::new(),
            (MetadataValue::String(s), _) => sanitize_identifier(s),
            (value, _) => sanitize_identifier(&value.to_json().to_string()),
        }
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "token")?;
        Ok(Self::new(
            MetadataValue::from_json(field(data, "value"))?,
            obj_from_json(field(data, "identifier"), IdentifierMetadata::from_json)?,
            bool_field(data, "identifierIsInstance")?,
        ))
    }
}

fn literal_key(value: &MetadataValue) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_json().to_string())
    }
}

impl PartialEq for TokenMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.identifier == other.identifier
            && self.identifier_is_instance == other.identifier_is_instance
    }
}

impl CompileMetadataWithIdentifier for TokenMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        self.identifier.as_ref()
    }
}

impl ToJson for TokenMetadata {
    fn to_json(&self) -> Value {
        json!({
            "value": self.value.to_json(),
            "identifier": self.identifier.to_json(),
            "identifierIsInstance": self.identifier_is_instance,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Runtime(RuntimeKey),
    Asset(String),
}

/// Insertion ordered map keyed by token identity.
#[derive(Debug, Clone)]
pub struct TokenMap<V> {
    value_map: HashMap<CacheKey, usize>,
    tokens: Vec<TokenMetadata>,
    values: Vec<V>,
}

impl<V> Default for TokenMap<V> {
    fn default() -> Self {
        Self {
            value_map: HashMap::new(),
            tokens: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<V> TokenMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new entry. Tokens are never overwritten.
    pub fn add(&mut self, token: TokenMetadata, value: V) -> Result<()> {
        if self.index_of(&token).is_some() {
            return Err(MetadataError::DuplicateToken { name: token.name() });
        }
        let index = self.values.len();
        if let Some(rk) = token.runtime_cache_key() {
            self.value_map.insert(CacheKey::Runtime(rk), index);
        }
        if let Some(ak) = token.asset_cache_key() {
            self.value_map.insert(CacheKey::Asset(ak.to_string()), index);
        }
        tracing::trace!(token = %token.name(), index, "token map entry added");
        self.tokens.push(token);
        self.values.push(value);
        Ok(())
    }

    pub fn get(&self, token: &TokenMetadata) -> Option<&V> {
        self.index_of(token).map(|index| &self.values[index])
    }

    fn index_of(&self, token: &TokenMetadata) -> Option<usize> {
        let by_runtime = token
            .runtime_cache_key()
            .and_then(|rk| self.value_map.get(&CacheKey::Runtime(rk)));
        by_runtime
            .or_else(|| {
                token
                    .asset_cache_key()
                    .and_then(|ak| self.value_map.get(&CacheKey::Asset(ak.to_string())))
            })
            .copied()
    }

    pub fn keys(&self) -> &[TokenMetadata] {
        &self.tokens
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenMetadata, &V)> {
        self.tokens.iter().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
