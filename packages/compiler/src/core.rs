//! Core Types
//!
//! Enum values shared with the runtime. Each enum is serialized by its
//! symbolic name, and the derived serde impls double as the enum value
//! registry used when metadata is restored from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MetadataError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewEncapsulation {
    Emulated,
    Native,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChangeDetectionStrategy {
    CheckOnce,
    Checked,
    CheckAlways,
    Detached,
    OnPush,
    #[default]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleHooks {
    OnInit,
    OnDestroy,
    DoCheck,
    OnChanges,
    AfterContentInit,
    AfterContentChecked,
    AfterViewInit,
    AfterViewChecked,
}

pub const VIEW_ENCAPSULATION_VALUES: [ViewEncapsulation; 3] = [
    ViewEncapsulation::Emulated,
    ViewEncapsulation::Native,
    ViewEncapsulation::None,
];

pub const CHANGE_DETECTION_STRATEGY_VALUES: [ChangeDetectionStrategy; 6] = [
    ChangeDetectionStrategy::CheckOnce,
    ChangeDetectionStrategy::Checked,
    ChangeDetectionStrategy::CheckAlways,
    ChangeDetectionStrategy::Detached,
    ChangeDetectionStrategy::OnPush,
    ChangeDetectionStrategy::Default,
];

pub const LIFECYCLE_HOOKS_VALUES: [LifecycleHooks; 8] = [
    LifecycleHooks::OnInit,
    LifecycleHooks::OnDestroy,
    LifecycleHooks::DoCheck,
    LifecycleHooks::OnChanges,
    LifecycleHooks::AfterContentInit,
    LifecycleHooks::AfterContentChecked,
    LifecycleHooks::AfterViewInit,
    LifecycleHooks::AfterViewChecked,
];

/// Enum whose values travel through metadata JSON by name.
pub trait SerializedEnum: Serialize + serde::de::DeserializeOwned + Copy {
    const KIND: &'static str;

    fn serialize_enum(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn deserialize_enum(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|_| MetadataError::InvalidEnumValue {
            kind: Self::KIND,
            value: value.to_string(),
        })
    }
}

impl SerializedEnum for ViewEncapsulation {
    const KIND: &'static str = "ViewEncapsulation";
}

impl SerializedEnum for ChangeDetectionStrategy {
    const KIND: &'static str = "ChangeDetectionStrategy";
}

impl SerializedEnum for LifecycleHooks {
    const KIND: &'static str = "LifecycleHooks";
}
