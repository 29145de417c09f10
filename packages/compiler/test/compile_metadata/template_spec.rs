//! Template Metadata Tests

use angular_compile_metadata::compile_metadata::{
    metadata_from_json, TemplateConfig, TemplateMetadata, ToJson,
};
use angular_compile_metadata::core::ViewEncapsulation;
use angular_compile_metadata::MetadataError;
use pretty_assertions::assert_eq;
use serde_json::json;

fn symbols(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn should_default_every_list_to_empty() {
    let template = TemplateMetadata::new(TemplateConfig::default()).unwrap();
    assert_eq!(template, TemplateMetadata::default());
    assert!(template.styles.is_empty());
    assert!(template.style_urls.is_empty());
    assert!(template.external_stylesheets.is_empty());
    assert!(template.animations.is_empty());
    assert!(template.ng_content_selectors.is_empty());
    assert_eq!(template.interpolation, None);
}

#[test]
fn should_accept_an_interpolation_pair() {
    let template = TemplateMetadata::new(TemplateConfig {
        interpolation: symbols(&["[[", "]]"]),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        template.interpolation,
        Some(["[[".to_string(), "]]".to_string()])
    );
}

#[test]
fn should_reject_interpolation_with_the_wrong_arity() {
    let err = TemplateMetadata::new(TemplateConfig {
        interpolation: symbols(&["{{", "}}", "extra"]),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err, MetadataError::InvalidInterpolation { len: 3 });

    let err = TemplateMetadata::new(TemplateConfig {
        interpolation: symbols(&["{{"]),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err, MetadataError::InvalidInterpolation { len: 1 });
}

#[test]
fn should_check_interpolation_when_decoding() {
    let data = json!({
        "template": "<p></p>",
        "interpolation": ["{{", "}}", "extra"],
    });
    assert_eq!(
        TemplateMetadata::from_json(&data).unwrap_err(),
        MetadataError::InvalidInterpolation { len: 3 }
    );
}

#[test]
fn should_round_trip_through_json() {
    let template = TemplateMetadata::new(TemplateConfig {
        encapsulation: Some(ViewEncapsulation::Emulated),
        template: Some("<p>{{name}}</p>".to_string()),
        template_url: Some("package:app/foo.html".to_string()),
        styles: vec!["p { color: red; }".to_string()],
        ng_content_selectors: vec!["*".to_string()],
        interpolation: symbols(&["{{", "}}"]),
        ..Default::default()
    })
    .unwrap();

    let encoded = template.to_json();
    assert_eq!(encoded["encapsulation"], json!("Emulated"));
    assert_eq!(encoded["interpolation"], json!(["{{", "}}"]));
    assert_eq!(TemplateMetadata::from_json(&encoded).unwrap(), template);
}

#[test]
fn should_not_be_tagged() {
    let encoded = TemplateMetadata::default().to_json();
    assert!(encoded.get("class").is_none());
    assert_eq!(
        metadata_from_json(&encoded).unwrap_err(),
        MetadataError::MissingDiscriminator
    );
}

#[test]
fn should_reject_unknown_encapsulation() {
    let data = json!({"encapsulation": "Shadow"});
    assert_eq!(
        TemplateMetadata::from_json(&data).unwrap_err(),
        MetadataError::InvalidEnumValue {
            kind: "ViewEncapsulation",
            value: "\"Shadow\"".to_string(),
        }
    );
}
