//! CSS Selector
//!
//! Parses directive selectors into element shapes. Only what metadata
//! needs is here: parsing and rendering a matching element.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SelectorError;

static SELECTOR_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(:not\()|(([\.#]?)[-\w]+)|(?:\[([-.\w*\\$]+)(?:=(?:"([^"]*)"|'([^']*)'|([^\]]*)))?\])|(\))|(\s*,\s*)"#)
        .unwrap()
});

const NOT: usize = 1;
const TAG: usize = 2;
const PREFIX: usize = 3;
const ATTRIBUTE: usize = 4;
const ATTRIBUTE_VALUE: [usize; 3] = [5, 6, 7];
const NOT_END: usize = 8;
const SEPARATOR: usize = 9;

/// One compound selector, e.g. `button.primary[type=submit]:not(.flat)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssSelector {
    pub element: Option<String>,
    pub class_names: Vec<String>,
    /// (name, value) pairs; a bare `[attr]` has an empty value.
    pub attrs: Vec<(String, String)>,
    pub not_selectors: Vec<CssSelector>,
}

impl CssSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated selector list.
    pub fn parse(selector: &str) -> Result<Vec<CssSelector>, SelectorError> {
        let mut results = Vec::new();
        let mut current = CssSelector::new();
        let mut in_not = false;

        for cap in SELECTOR_REGEXP.captures_iter(selector) {
            if cap.get(NOT).is_some() {
                if in_not {
                    return Err(SelectorError::NestedNot);
                }
                in_not = true;
                current.not_selectors.push(CssSelector::new());
            }

            // `in_not` is only set after a `:not(` selector was pushed.
            let target = if in_not {
                let last = current.not_selectors.len() - 1;
                &mut current.not_selectors[last]
            } else {
                &mut current
            };

            if let Some(tag) = cap.get(TAG) {
                let tag = tag.as_str();
                match cap.get(PREFIX).map(|m| m.as_str()).unwrap_or("") {
                    "#" => target.add_attribute("id", &tag[1..]),
                    "." => target.add_class_name(&tag[1..]),
                    _ => target.set_element(tag),
                }
            }

            if let Some(attr) = cap.get(ATTRIBUTE) {
                let value = ATTRIBUTE_VALUE
                    .iter()
                    .find_map(|group| cap.get(*group))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                target.add_attribute(&unescape_attribute(attr.as_str())?, value);
            }

            if cap.get(NOT_END).is_some() {
                in_not = false;
            }

            if cap.get(SEPARATOR).is_some() {
                if in_not {
                    return Err(SelectorError::MultipleInNot);
                }
                push_result(&mut results, std::mem::take(&mut current));
            }
        }

        push_result(&mut results, current);
        Ok(results)
    }

    pub fn set_element(&mut self, element: &str) {
        self.element = Some(element.to_string());
    }

    pub fn add_attribute(&mut self, name: &str, value: &str) {
        self.attrs.push((name.to_string(), value.to_lowercase()));
    }

    pub fn add_class_name(&mut self, name: &str) {
        self.class_names.push(name.to_lowercase());
    }

    pub fn is_empty(&self) -> bool {
        self.element.is_none()
            && self.class_names.is_empty()
            && self.attrs.is_empty()
            && self.not_selectors.is_empty()
    }

    /// Markup for an element this selector matches; `div` when no element is named.
    pub fn get_matching_element_template(&self) -> String {
        let tag_name = self.element.as_deref().unwrap_or("div");
        let class_attr = if self.class_names.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", self.class_names.join(" "))
        };
        let attrs: String = self
            .attrs
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    format!(" {}", name)
                } else {
                    format!(" {}=\"{}\"", name, value)
                }
            })
            .collect();
        format!("<{tag_name}{class_attr}{attrs}></{tag_name}>")
    }
}

fn push_result(results: &mut Vec<CssSelector>, mut selector: CssSelector) {
    if !selector.not_selectors.is_empty()
        && selector.element.is_none()
        && selector.class_names.is_empty()
        && selector.attrs.is_empty()
    {
        selector.element = Some("*".to_string());
    }
    if !selector.is_empty() {
        results.push(selector);
    }
}

fn unescape_attribute(attr: &str) -> Result<String, SelectorError> {
    let mut result = String::with_capacity(attr.len());
    let mut escaping = false;
    for ch in attr.chars() {
        if ch == '\\' {
            escaping = true;
            continue;
        }
        if ch == '$' && !escaping {
            return Err(SelectorError::UnescapedDollar(attr.to_string()));
        }
        escaping = false;
        result.push(ch);
    }
    Ok(result)
}

impl fmt::Display for CssSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element.as_deref().unwrap_or(""))?;
        for class_name in &self.class_names {
            write!(f, ".{}", class_name)?;
        }
        for (name, value) in &self.attrs {
            let name = name.replace('$', "\\$");
            if value.is_empty() {
                write!(f, "[{}]", name)?;
            } else {
                write!(f, "[{}={}]", name, value)?;
            }
        }
        for not_selector in &self.not_selectors {
            write!(f, ":not({})", not_selector)?;
        }
        Ok(())
    }
}
