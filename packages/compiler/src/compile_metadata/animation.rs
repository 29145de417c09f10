//! Animation metadata.
//!
//! An entry names a trigger and lists its state declarations and
//! transitions. Transitions own a step tree whose containers (sequence,
//! group) hold ordered child steps and whose leaves are styles, keyframes
//! and animate calls.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::json::{
    as_object, decode_node, decode_nodes, deserialize_field, field, obj_from_json, opt_string,
    JsonMap, ToJson,
};
use super::CompileMetadata;
use crate::error::{MetadataError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationEntryMetadata {
    pub name: Option<String>,
    pub definitions: Vec<AnimationStateMetadata>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationStateMetadata {
    Declaration(AnimationStateDeclarationMetadata),
    Transition(AnimationStateTransitionMetadata),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationStateDeclarationMetadata {
    pub state_name_expr: Option<String>,
    pub styles: AnimationStyleMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStateTransitionMetadata {
    pub state_change_expr: Option<String>,
    pub steps: Box<AnimationMetadata>,
}

/// A node of an animation step tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationMetadata {
    Sequence(AnimationSequenceMetadata),
    Group(AnimationGroupMetadata),
    KeyframesSequence(AnimationKeyframesSequenceMetadata),
    Style(AnimationStyleMetadata),
    Animate(AnimationAnimateMetadata),
}

/// Steps run one after another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSequenceMetadata {
    pub steps: Vec<AnimationMetadata>,
}

/// Steps run in parallel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationGroupMetadata {
    pub steps: Vec<AnimationMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationKeyframesSequenceMetadata {
    pub steps: Vec<AnimationStyleMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationStyleMetadata {
    /// Keyframe position. Must be finite: JSON has no encoding for
    /// infinities or NaN and writes them as `null`.
    pub offset: Option<f64>,
    pub styles: Vec<AnimationStyleEntry>,
}

impl AnimationStyleMetadata {
    pub fn new(offset: Option<f64>, styles: Vec<AnimationStyleEntry>) -> Result<Self> {
        Ok(Self {
            offset: offset.map(check_offset).transpose()?,
            styles,
        })
    }
}

/// Either a reference to a named style or a property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimationStyleEntry {
    Name(String),
    Properties(IndexMap<String, StyleValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAnimateMetadata {
    pub timings: AnimationTimings,
    pub styles: Option<AnimateStyles>,
}

/// `"1s 100ms ease-out"` or a plain duration in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimationTimings {
    Expression(String),
    Duration(f64),
}

impl Default for AnimationTimings {
    fn default() -> Self {
        AnimationTimings::Duration(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimateStyles {
    Style(AnimationStyleMetadata),
    Keyframes(AnimationKeyframesSequenceMetadata),
}

fn value_of<'a>(data: &'a Value, class: &'static str) -> Result<&'a Value> {
    Ok(field(as_object(data, class)?, "value"))
}

fn steps_from_json<T>(data: &Value, class: &'static str) -> Result<Vec<T>>
where
    T: TryFrom<CompileMetadata, Error = MetadataError>,
{
    decode_nodes(value_of(data, class)?, "value")
}

impl AnimationEntryMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let value = as_object(value_of(data, "AnimationEntryMetadata")?, "value")?;
        Ok(Self {
            name: opt_string(value, "name")?,
            definitions: decode_nodes(field(value, "definitions"), "definitions")?,
        })
    }
}

impl AnimationStateDeclarationMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let value = as_object(value_of(data, "AnimationStateDeclarationMetadata")?, "value")?;
        Ok(Self {
            state_name_expr: opt_string(value, "stateNameExpr")?,
            styles: decode_node(field(value, "styles"))?,
        })
    }
}

impl AnimationStateTransitionMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let value = as_object(value_of(data, "AnimationStateTransitionMetadata")?, "value")?;
        Ok(Self {
            state_change_expr: opt_string(value, "stateChangeExpr")?,
            steps: Box::new(decode_node(field(value, "steps"))?),
        })
    }
}

impl AnimationSequenceMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        Ok(Self {
            steps: steps_from_json(data, "AnimationSequenceMetadata")?,
        })
    }
}

impl AnimationGroupMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        Ok(Self {
            steps: steps_from_json(data, "AnimationGroupMetadata")?,
        })
    }
}

impl AnimationKeyframesSequenceMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        Ok(Self {
            steps: steps_from_json(data, "AnimationKeyframesSequenceMetadata")?,
        })
    }
}

impl AnimationStyleMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let value = as_object(value_of(data, "AnimationStyleMetadata")?, "value")?;
        Self::new(
            parse_offset(value)?,
            deserialize_field(value, "styles", "a list of styles")?.unwrap_or_default(),
        )
    }
}

const INVALID_OFFSET: MetadataError = MetadataError::InvalidField {
    field: "offset",
    expected: "a finite number",
};

fn check_offset(offset: f64) -> Result<f64> {
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(INVALID_OFFSET)
    }
}

/// Offsets may arrive as numbers or numeric strings.
fn parse_offset(value: &JsonMap) -> Result<Option<f64>> {
    match field(value, "offset") {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or(INVALID_OFFSET),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| INVALID_OFFSET),
        _ => Err(INVALID_OFFSET),
    }
}

impl AnimationAnimateMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let value = as_object(value_of(data, "AnimationAnimateMetadata")?, "value")?;
        Ok(Self {
            timings: deserialize_field(value, "timings", "a timing expression or duration")?
                .unwrap_or_default(),
            styles: obj_from_json(field(value, "styles"), decode_node::<AnimateStyles>)?,
        })
    }
}

impl ToJson for AnimationEntryMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AnimationEntryMetadata",
            "value": {"name": self.name, "definitions": self.definitions.to_json()},
        })
    }
}

impl ToJson for AnimationStateMetadata {
    fn to_json(&self) -> Value {
        match self {
            AnimationStateMetadata::Declaration(declaration) => declaration.to_json(),
            AnimationStateMetadata::Transition(transition) => transition.to_json(),
        }
    }
}

impl ToJson for AnimationStateDeclarationMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AnimationStateDeclarationMetadata",
            "value": {"stateNameExpr": self.state_name_expr, "styles": self.styles.to_json()},
        })
    }
}

impl ToJson for AnimationStateTransitionMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AnimationStateTransitionMetadata",
            "value": {"stateChangeExpr": self.state_change_expr, "steps": self.steps.to_json()},
        })
    }
}

impl ToJson for AnimationMetadata {
    fn to_json(&self) -> Value {
        match self {
            AnimationMetadata::Sequence(sequence) => sequence.to_json(),
            AnimationMetadata::Group(group) => group.to_json(),
            AnimationMetadata::KeyframesSequence(keyframes) => keyframes.to_json(),
            AnimationMetadata::Style(style) => style.to_json(),
            AnimationMetadata::Animate(animate) => animate.to_json(),
        }
    }
}

impl ToJson for AnimationSequenceMetadata {
    fn to_json(&self) -> Value {
        json!({"class": "AnimationSequenceMetadata", "value": self.steps.to_json()})
    }
}

impl ToJson for AnimationGroupMetadata {
    fn to_json(&self) -> Value {
        json!({"class": "AnimationGroupMetadata", "value": self.steps.to_json()})
    }
}

impl ToJson for AnimationKeyframesSequenceMetadata {
    fn to_json(&self) -> Value {
        json!({"class": "AnimationKeyframesSequenceMetadata", "value": self.steps.to_json()})
    }
}

impl ToJson for AnimationStyleMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AnimationStyleMetadata",
            "value": {"offset": self.offset, "styles": self.styles},
        })
    }
}

impl ToJson for AnimationAnimateMetadata {
    fn to_json(&self) -> Value {
        json!({
            "class": "AnimationAnimateMetadata",
            "value": {"timings": self.timings, "styles": self.styles.to_json()},
        })
    }
}

impl ToJson for AnimateStyles {
    fn to_json(&self) -> Value {
        match self {
            AnimateStyles::Style(style) => style.to_json(),
            AnimateStyles::Keyframes(keyframes) => keyframes.to_json(),
        }
    }
}

impl TryFrom<CompileMetadata> for AnimationEntryMetadata {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::AnimationEntry(entry) => Ok(entry),
            other => Err(other.unexpected("AnimationEntryMetadata")),
        }
    }
}

impl TryFrom<CompileMetadata> for AnimationStateMetadata {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::AnimationState(state) => Ok(state),
            other => Err(other.unexpected("animation state")),
        }
    }
}

impl TryFrom<CompileMetadata> for AnimationMetadata {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::Animation(animation) => Ok(animation),
            other => Err(other.unexpected("animation step")),
        }
    }
}

impl TryFrom<CompileMetadata> for AnimationStyleMetadata {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::Animation(AnimationMetadata::Style(style)) => Ok(style),
            other => Err(other.unexpected("AnimationStyleMetadata")),
        }
    }
}

impl TryFrom<CompileMetadata> for AnimateStyles {
    type Error = MetadataError;

    fn try_from(node: CompileMetadata) -> Result<Self> {
        match node {
            CompileMetadata::Animation(AnimationMetadata::Style(style)) => {
                Ok(AnimateStyles::Style(style))
            }
            CompileMetadata::Animation(AnimationMetadata::KeyframesSequence(keyframes)) => {
                Ok(AnimateStyles::Keyframes(keyframes))
            }
            other => Err(other.unexpected("AnimationStyleMetadata or keyframes")),
        }
    }
}
