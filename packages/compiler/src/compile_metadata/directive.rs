use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::di::{ProviderEntry, QueryMetadata};
use super::identifier::{
    CompileMetadataWithIdentifier, CompileMetadataWithType, IdentifierMetadata,
};
use super::json::{
    as_object, bool_field, enum_field, field, list_from_json, obj_from_json, opt_enum_to_json,
    opt_string, string_map, string_map_to_json, ToJson,
};
use super::template::{TemplateConfig, TemplateMetadata};
use super::type_meta::TypeMetadata;
use crate::core::{ChangeDetectionStrategy, LifecycleHooks, SerializedEnum};
use crate::error::{Result, SelectorError};
use crate::selector::CssSelector;
use crate::util::split_at_colon;

// group 1: "prop" from "[prop]"
// group 2: "event" from "(event)"
// group 3: "trigger" from "@trigger"
static HOST_REG_EXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\[([^\]]+)\]|\(([^\)]+)\)|@([-\w]+))$").unwrap());

/// Syntactic form of a `host` map key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKey {
    /// `[prop]`
    Property(String),
    /// `(event)`
    Listener(String),
    /// `@trigger`
    AnimationTrigger(String),
    /// anything else
    Attribute(String),
}

impl HostKey {
    pub fn parse(key: &str) -> HostKey {
        let Some(caps) = HOST_REG_EXP.captures(key) else {
            return HostKey::Attribute(key.to_string());
        };
        if let Some(prop) = caps.get(1) {
            HostKey::Property(prop.as_str().to_string())
        } else if let Some(event) = caps.get(2) {
            HostKey::Listener(event.as_str().to_string())
        } else if let Some(trigger) = caps.get(3) {
            HostKey::AnimationTrigger(trigger.as_str().to_string())
        } else {
            HostKey::Attribute(key.to_string())
        }
    }
}

/// Build a `public name -> internal name` map from `"dirProp: elProp"` or
/// `"prop"` entries. Later entries win.
pub fn parse_binding_list(bindings: &[String]) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for bind_config in bindings {
        // canonical syntax: `dirProp: elProp`
        // if there is no `:`, use dirProp = elProp
        let (dir_prop, el_prop) =
            split_at_colon(bind_config, (bind_config.as_str(), bind_config.as_str()));
        map.insert(dir_prop, el_prop);
    }
    map
}

/// Construction record for [`DirectiveMetadata::create`].
#[derive(Debug, Clone, Default)]
pub struct DirectiveConfig {
    pub type_: Option<TypeMetadata>,
    pub is_component: bool,
    pub selector: Option<String>,
    pub export_as: Option<String>,
    pub change_detection: Option<ChangeDetectionStrategy>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub host: IndexMap<String, String>,
    pub lifecycle_hooks: Vec<LifecycleHooks>,
    pub providers: Vec<ProviderEntry>,
    pub view_providers: Vec<ProviderEntry>,
    pub queries: Vec<QueryMetadata>,
    pub view_queries: Vec<QueryMetadata>,
    pub precompile: Vec<TypeMetadata>,
    pub template: Option<TemplateMetadata>,
}

/// Metadata regarding compilation of a directive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveMetadata {
    pub type_: Option<TypeMetadata>,
    pub is_component: bool,
    pub selector: Option<String>,
    pub export_as: Option<String>,
    pub change_detection: Option<ChangeDetectionStrategy>,
    pub inputs: IndexMap<String, String>,
    pub outputs: IndexMap<String, String>,
    pub host_listeners: IndexMap<String, String>,
    /// Property bindings; animation triggers keep their `@` prefix.
    pub host_properties: IndexMap<String, String>,
    pub host_attributes: IndexMap<String, String>,
    pub lifecycle_hooks: Vec<LifecycleHooks>,
    pub providers: Vec<ProviderEntry>,
    pub view_providers: Vec<ProviderEntry>,
    pub queries: Vec<QueryMetadata>,
    pub view_queries: Vec<QueryMetadata>,
    pub precompile: Vec<TypeMetadata>,
    pub template: Option<TemplateMetadata>,
}

impl DirectiveMetadata {
    pub fn create(config: DirectiveConfig) -> Self {
        let mut host_listeners = IndexMap::new();
        let mut host_properties = IndexMap::new();
        let mut host_attributes = IndexMap::new();
        for (key, value) in config.host {
            match HostKey::parse(&key) {
                HostKey::Property(name) => {
                    host_properties.insert(name, value);
                }
                HostKey::Listener(name) => {
                    host_listeners.insert(name, value);
                }
                HostKey::AnimationTrigger(name) => {
                    host_properties.insert(format!("@{}", name), value);
                }
                HostKey::Attribute(name) => {
                    host_attributes.insert(name, value);
                }
            }
        }

        Self {
            type_: config.type_,
            is_component: config.is_component,
            selector: config.selector,
            export_as: config.export_as,
            change_detection: config.change_detection,
            inputs: parse_binding_list(&config.inputs),
            outputs: parse_binding_list(&config.outputs),
            host_listeners,
            host_properties,
            host_attributes,
            lifecycle_hooks: config.lifecycle_hooks,
            providers: config.providers,
            view_providers: config.view_providers,
            queries: config.queries,
            view_queries: config.view_queries,
            precompile: config.precompile,
            template: config.template,
        }
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "directive")?;
        Ok(Self {
            type_: obj_from_json(field(data, "type"), TypeMetadata::from_json)?,
            is_component: bool_field(data, "isComponent")?,
            selector: opt_string(data, "selector")?,
            export_as: opt_string(data, "exportAs")?,
            change_detection: enum_field(data, "changeDetection")?,
            inputs: string_map(data, "inputs")?,
            outputs: string_map(data, "outputs")?,
            host_listeners: string_map(data, "hostListeners")?,
            host_properties: string_map(data, "hostProperties")?,
            host_attributes: string_map(data, "hostAttributes")?,
            lifecycle_hooks: list_from_json(
                field(data, "lifecycleHooks"),
                "lifecycleHooks",
                LifecycleHooks::deserialize_enum,
            )?,
            template: obj_from_json(field(data, "template"), TemplateMetadata::from_json)?,
            providers: list_from_json(
                field(data, "providers"),
                "providers",
                ProviderEntry::from_json,
            )?,
            view_providers: list_from_json(
                field(data, "viewProviders"),
                "viewProviders",
                ProviderEntry::from_json,
            )?,
            queries: list_from_json(field(data, "queries"), "queries", QueryMetadata::from_json)?,
            view_queries: list_from_json(
                field(data, "viewQueries"),
                "viewQueries",
                QueryMetadata::from_json,
            )?,
            precompile: list_from_json(
                field(data, "precompile"),
                "precompile",
                TypeMetadata::from_json,
            )?,
        })
    }
}

impl ToJson for DirectiveMetadata {
    fn to_json(&self) -> Value {
        let lifecycle_hooks: Vec<Value> = self
            .lifecycle_hooks
            .iter()
            .map(|hook| hook.serialize_enum())
            .collect();
        json!({
            "class": "Directive",
            "isComponent": self.is_component,
            "selector": self.selector,
            "exportAs": self.export_as,
            "type": self.type_.to_json(),
            "changeDetection": opt_enum_to_json(self.change_detection),
            "inputs": string_map_to_json(&self.inputs),
            "outputs": string_map_to_json(&self.outputs),
            "hostListeners": string_map_to_json(&self.host_listeners),
            "hostProperties": string_map_to_json(&self.host_properties),
            "hostAttributes": string_map_to_json(&self.host_attributes),
            "lifecycleHooks": lifecycle_hooks,
            "template": self.template.to_json(),
            "providers": self.providers.to_json(),
            "viewProviders": self.view_providers.to_json(),
            "queries": self.queries.to_json(),
            "viewQueries": self.view_queries.to_json(),
            "precompile": self.precompile.to_json(),
        })
    }
}

impl CompileMetadataWithIdentifier for DirectiveMetadata {
    fn identifier(&self) -> Option<&IdentifierMetadata> {
        self.type_.as_ref().map(|type_meta| &type_meta.identifier)
    }
}

impl CompileMetadataWithType for DirectiveMetadata {
    fn type_meta(&self) -> Option<&TypeMetadata> {
        self.type_.as_ref()
    }
}

/// Construct the metadata of the host view that instantiates a component
/// matched by `component_selector`.
pub fn create_host_component_meta(
    component_type: &TypeMetadata,
    component_selector: &str,
) -> Result<DirectiveMetadata> {
    let selectors = CssSelector::parse(component_selector)?;
    let Some(host_selector) = selectors.first() else {
        return Err(SelectorError::Empty(component_selector.to_string()).into());
    };
    let template = host_selector.get_matching_element_template();
    let host_name = format!("{}_Host", component_type.name().unwrap_or_default());
    tracing::debug!(host = %host_name, template = %template, "synthesized host component");

    let host_type = TypeMetadata {
        identifier: IdentifierMetadata {
            name: Some(host_name),
            module_url: component_type.identifier.module_url.clone(),
            ..Default::default()
        },
        is_host: true,
        di_deps: Vec::new(),
    };
    let template = TemplateMetadata::new(TemplateConfig {
        template: Some(template),
        template_url: Some(String::new()),
        ..Default::default()
    })?;

    Ok(DirectiveMetadata::create(DirectiveConfig {
        type_: Some(host_type),
        template: Some(template),
        change_detection: Some(ChangeDetectionStrategy::Default),
        is_component: true,
        selector: Some("*".to_string()),
        ..Default::default()
    }))
}
