use serde_json::{json, Value};

use super::animation::AnimationEntryMetadata;
use super::json::{
    as_object, decode_flattened_nodes, deserialize_field, enum_field, field, list_from_json,
    opt_enum_to_json, opt_string, string_list, strings_to_json, ToJson,
};
use crate::core::ViewEncapsulation;
use crate::error::{MetadataError, Result};

/// Metadata about a stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetMetadata {
    pub module_url: Option<String>,
    pub styles: Vec<String>,
    pub style_urls: Vec<String>,
}

impl StylesheetMetadata {
    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "externalStylesheets")?;
        Ok(Self {
            module_url: opt_string(data, "moduleUrl")?,
            styles: string_list(data, "styles")?,
            style_urls: string_list(data, "styleUrls")?,
        })
    }
}

impl ToJson for StylesheetMetadata {
    fn to_json(&self) -> Value {
        json!({
            "moduleUrl": self.module_url,
            "styles": strings_to_json(&self.styles),
            "styleUrls": strings_to_json(&self.style_urls),
        })
    }
}

/// Construction record for [`TemplateMetadata`].
#[derive(Debug, Clone, Default)]
pub struct TemplateConfig {
    pub encapsulation: Option<ViewEncapsulation>,
    pub template: Option<String>,
    pub template_url: Option<String>,
    pub styles: Vec<String>,
    pub style_urls: Vec<String>,
    pub external_stylesheets: Vec<StylesheetMetadata>,
    pub animations: Vec<AnimationEntryMetadata>,
    pub ng_content_selectors: Vec<String>,
    /// Start and end interpolation symbols, e.g. `["{{", "}}"]`.
    pub interpolation: Option<Vec<String>>,
}

/// Metadata regarding compilation of a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMetadata {
    pub encapsulation: Option<ViewEncapsulation>,
    pub template: Option<String>,
    pub template_url: Option<String>,
    pub styles: Vec<String>,
    pub style_urls: Vec<String>,
    pub external_stylesheets: Vec<StylesheetMetadata>,
    pub animations: Vec<AnimationEntryMetadata>,
    pub ng_content_selectors: Vec<String>,
    pub interpolation: Option<[String; 2]>,
}

impl TemplateMetadata {
    pub fn new(config: TemplateConfig) -> Result<Self> {
        let interpolation = match config.interpolation {
            None => None,
            Some(symbols) => {
                let len = symbols.len();
                let pair: [String; 2] = symbols
                    .try_into()
                    .map_err(|_| MetadataError::InvalidInterpolation { len })?;
                Some(pair)
            }
        };
        Ok(Self {
            encapsulation: config.encapsulation,
            template: config.template,
            template_url: config.template_url,
            styles: config.styles,
            style_urls: config.style_urls,
            external_stylesheets: config.external_stylesheets,
            animations: config.animations,
            ng_content_selectors: config.ng_content_selectors,
            interpolation,
        })
    }

    pub fn from_json(data: &Value) -> Result<Self> {
        let data = as_object(data, "template")?;
        Self::new(TemplateConfig {
            encapsulation: enum_field(data, "encapsulation")?,
            template: opt_string(data, "template")?,
            template_url: opt_string(data, "templateUrl")?,
            styles: string_list(data, "styles")?,
            style_urls: string_list(data, "styleUrls")?,
            external_stylesheets: list_from_json(
                field(data, "externalStylesheets"),
                "externalStylesheets",
                StylesheetMetadata::from_json,
            )?,
            animations: decode_flattened_nodes(field(data, "animations"), "animations")?,
            ng_content_selectors: string_list(data, "ngContentSelectors")?,
            interpolation: deserialize_field(data, "interpolation", "a list of strings")?,
        })
    }
}

impl ToJson for TemplateMetadata {
    fn to_json(&self) -> Value {
        json!({
            "encapsulation": opt_enum_to_json(self.encapsulation),
            "template": self.template,
            "templateUrl": self.template_url,
            "styles": strings_to_json(&self.styles),
            "styleUrls": strings_to_json(&self.style_urls),
            "externalStylesheets": self.external_stylesheets.to_json(),
            "animations": self.animations.to_json(),
            "ngContentSelectors": strings_to_json(&self.ng_content_selectors),
            "interpolation": self.interpolation.as_ref().map(|pair| strings_to_json(pair)),
        })
    }
}
