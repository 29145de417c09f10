//! Compile Metadata
//!
//! In-memory description of the directives, components, pipes, modules,
//! providers and animations found in application sources. Every class can
//! be written to a JSON tree with [`ToJson`] and read back with
//! [`metadata_from_json`], which lets separate compilation runs share
//! compiled metadata.
//!
//! Tagged nodes carry a `class` discriminator. Classes that are only ever
//! decoded from a known field (templates, stylesheets, queries, tokens,
//! dependencies) are written without one.

pub mod animation;
pub mod di;
pub mod directive;
pub mod identifier;
pub mod json;
pub mod module;
pub mod template;
pub mod token;
pub mod type_meta;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

pub use animation::{
    AnimateStyles, AnimationAnimateMetadata, AnimationEntryMetadata, AnimationGroupMetadata,
    AnimationKeyframesSequenceMetadata, AnimationMetadata, AnimationSequenceMetadata,
    AnimationStateDeclarationMetadata, AnimationStateMetadata, AnimationStateTransitionMetadata,
    AnimationStyleEntry, AnimationStyleMetadata, AnimationTimings, StyleValue,
};
pub use di::{
    DiDependencyConfig, DiDependencyMetadata, DiFlags, FactoryMetadata, ProviderConfig,
    ProviderEntry, ProviderMetadata, ProviderStrategy, QueryMetadata,
};
pub use directive::{
    create_host_component_meta, parse_binding_list, DirectiveConfig, DirectiveMetadata, HostKey,
};
pub use identifier::{
    is_static_symbol, CompileMetadataWithIdentifier, CompileMetadataWithType,
    IdentifierMetadata, RuntimeHandle, StaticSymbol,
};
pub use json::{MetadataValue, ToJson};
pub use module::{AppModuleMetadata, PipeMetadata};
pub use template::{StylesheetMetadata, TemplateConfig, TemplateMetadata};
pub use token::{RuntimeKey, TokenMap, TokenMetadata};
pub use type_meta::TypeMetadata;

use crate::error::{MetadataError, Result};

/// Any metadata node that can be restored through [`metadata_from_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompileMetadata {
    AppModule(AppModuleMetadata),
    Directive(DirectiveMetadata),
    Pipe(PipeMetadata),
    Type(TypeMetadata),
    Provider(ProviderMetadata),
    Identifier(IdentifierMetadata),
    Factory(FactoryMetadata),
    AnimationEntry(AnimationEntryMetadata),
    AnimationState(AnimationStateMetadata),
    Animation(AnimationMetadata),
}

impl CompileMetadata {
    pub fn class(&self) -> MetadataClass {
        match self {
            CompileMetadata::AppModule(_) => MetadataClass::AppModule,
            CompileMetadata::Directive(_) => MetadataClass::Directive,
            CompileMetadata::Pipe(_) => MetadataClass::Pipe,
            CompileMetadata::Type(_) => MetadataClass::Type,
            CompileMetadata::Provider(_) => MetadataClass::Provider,
            CompileMetadata::Identifier(_) => MetadataClass::Identifier,
            CompileMetadata::Factory(_) => MetadataClass::Factory,
            CompileMetadata::AnimationEntry(_) => MetadataClass::AnimationEntry,
            CompileMetadata::AnimationState(AnimationStateMetadata::Declaration(_)) => {
                MetadataClass::AnimationStateDeclaration
            }
            CompileMetadata::AnimationState(AnimationStateMetadata::Transition(_)) => {
                MetadataClass::AnimationStateTransition
            }
            CompileMetadata::Animation(animation) => match animation {
                AnimationMetadata::Sequence(_) => MetadataClass::AnimationSequence,
                AnimationMetadata::Group(_) => MetadataClass::AnimationGroup,
                AnimationMetadata::KeyframesSequence(_) => {
                    MetadataClass::AnimationKeyframesSequence
                }
                AnimationMetadata::Style(_) => MetadataClass::AnimationStyle,
                AnimationMetadata::Animate(_) => MetadataClass::AnimationAnimate,
            },
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> MetadataError {
        MetadataError::UnexpectedNode {
            expected,
            found: self.class().as_str(),
        }
    }
}

impl ToJson for CompileMetadata {
    fn to_json(&self) -> Value {
        match self {
            CompileMetadata::AppModule(meta) => meta.to_json(),
            CompileMetadata::Directive(meta) => meta.to_json(),
            CompileMetadata::Pipe(meta) => meta.to_json(),
            CompileMetadata::Type(meta) => meta.to_json(),
            CompileMetadata::Provider(meta) => meta.to_json(),
            CompileMetadata::Identifier(meta) => meta.to_json(),
            CompileMetadata::Factory(meta) => meta.to_json(),
            CompileMetadata::AnimationEntry(meta) => meta.to_json(),
            CompileMetadata::AnimationState(meta) => meta.to_json(),
            CompileMetadata::Animation(meta) => meta.to_json(),
        }
    }
}

/// The `class` discriminator of an encoded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataClass {
    AppModule,
    Directive,
    Pipe,
    Type,
    Provider,
    Identifier,
    Factory,
    AnimationEntry,
    AnimationStateDeclaration,
    AnimationStateTransition,
    AnimationSequence,
    AnimationGroup,
    AnimationAnimate,
    AnimationStyle,
    AnimationKeyframesSequence,
}

type Decoder = fn(&Value) -> Result<CompileMetadata>;

impl MetadataClass {
    pub const ALL: [MetadataClass; 15] = [
        MetadataClass::AppModule,
        MetadataClass::Directive,
        MetadataClass::Pipe,
        MetadataClass::Type,
        MetadataClass::Provider,
        MetadataClass::Identifier,
        MetadataClass::Factory,
        MetadataClass::AnimationEntry,
        MetadataClass::AnimationStateDeclaration,
        MetadataClass::AnimationStateTransition,
        MetadataClass::AnimationSequence,
        MetadataClass::AnimationGroup,
        MetadataClass::AnimationAnimate,
        MetadataClass::AnimationStyle,
        MetadataClass::AnimationKeyframesSequence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataClass::AppModule => "AppModule",
            MetadataClass::Directive => "Directive",
            MetadataClass::Pipe => "Pipe",
            MetadataClass::Type => "Type",
            MetadataClass::Provider => "Provider",
            MetadataClass::Identifier => "Identifier",
            MetadataClass::Factory => "Factory",
            MetadataClass::AnimationEntry => "AnimationEntryMetadata",
            MetadataClass::AnimationStateDeclaration => "AnimationStateDeclarationMetadata",
            MetadataClass::AnimationStateTransition => "AnimationStateTransitionMetadata",
            MetadataClass::AnimationSequence => "AnimationSequenceMetadata",
            MetadataClass::AnimationGroup => "AnimationGroupMetadata",
            MetadataClass::AnimationAnimate => "AnimationAnimateMetadata",
            MetadataClass::AnimationStyle => "AnimationStyleMetadata",
            MetadataClass::AnimationKeyframesSequence => "AnimationKeyframesSequenceMetadata",
        }
    }

    pub fn from_discriminator(discriminator: &str) -> Option<MetadataClass> {
        COMPILE_METADATA_FROM_JSON
            .get(discriminator)
            .map(|(class, _)| *class)
    }

    fn decoder(self) -> Decoder {
        match self {
            MetadataClass::AppModule => {
                |data| AppModuleMetadata::from_json(data).map(CompileMetadata::AppModule)
            }
            MetadataClass::Directive => {
                |data| DirectiveMetadata::from_json(data).map(CompileMetadata::Directive)
            }
            MetadataClass::Pipe => |data| PipeMetadata::from_json(data).map(CompileMetadata::Pipe),
            MetadataClass::Type => |data| TypeMetadata::from_json(data).map(CompileMetadata::Type),
            MetadataClass::Provider => {
                |data| ProviderMetadata::from_json(data).map(CompileMetadata::Provider)
            }
            MetadataClass::Identifier => {
                |data| IdentifierMetadata::from_json(data).map(CompileMetadata::Identifier)
            }
            MetadataClass::Factory => {
                |data| FactoryMetadata::from_json(data).map(CompileMetadata::Factory)
            }
            MetadataClass::AnimationEntry => {
                |data| AnimationEntryMetadata::from_json(data).map(CompileMetadata::AnimationEntry)
            }
            MetadataClass::AnimationStateDeclaration => |data| {
                AnimationStateDeclarationMetadata::from_json(data).map(|declaration| {
                    CompileMetadata::AnimationState(AnimationStateMetadata::Declaration(
                        declaration,
                    ))
                })
            },
            MetadataClass::AnimationStateTransition => |data| {
                AnimationStateTransitionMetadata::from_json(data).map(|transition| {
                    CompileMetadata::AnimationState(AnimationStateMetadata::Transition(transition))
                })
            },
            MetadataClass::AnimationSequence => |data| {
                AnimationSequenceMetadata::from_json(data)
                    .map(|sequence| CompileMetadata::Animation(AnimationMetadata::Sequence(sequence)))
            },
            MetadataClass::AnimationGroup => |data| {
                AnimationGroupMetadata::from_json(data)
                    .map(|group| CompileMetadata::Animation(AnimationMetadata::Group(group)))
            },
            MetadataClass::AnimationAnimate => |data| {
                AnimationAnimateMetadata::from_json(data)
                    .map(|animate| CompileMetadata::Animation(AnimationMetadata::Animate(animate)))
            },
            MetadataClass::AnimationStyle => |data| {
                AnimationStyleMetadata::from_json(data)
                    .map(|style| CompileMetadata::Animation(AnimationMetadata::Style(style)))
            },
            MetadataClass::AnimationKeyframesSequence => |data| {
                AnimationKeyframesSequenceMetadata::from_json(data).map(|keyframes| {
                    CompileMetadata::Animation(AnimationMetadata::KeyframesSequence(keyframes))
                })
            },
        }
    }
}

/// Discriminator -> decoder registry.
static COMPILE_METADATA_FROM_JSON: Lazy<IndexMap<&'static str, (MetadataClass, Decoder)>> =
    Lazy::new(|| {
        MetadataClass::ALL
            .iter()
            .map(|class| (class.as_str(), (*class, class.decoder())))
            .collect()
    });

/// Restore a tagged metadata node.
///
/// Fails when the node has no `class` tag or the tag is not registered;
/// both mean the data was written by an incompatible encoder.
pub fn metadata_from_json(data: &Value) -> Result<CompileMetadata> {
    let discriminator = data
        .get("class")
        .and_then(Value::as_str)
        .ok_or(MetadataError::MissingDiscriminator)?;
    let Some((_, decode)) = COMPILE_METADATA_FROM_JSON.get(discriminator) else {
        tracing::debug!(class = discriminator, "no decoder registered for metadata class");
        return Err(MetadataError::UnknownDiscriminator(discriminator.to_string()));
    };
    tracing::trace!(class = discriminator, "decoding metadata node");
    decode(data)
}
