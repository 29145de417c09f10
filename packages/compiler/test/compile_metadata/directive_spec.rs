//! Directive Metadata Tests
//!
//! Binding lists, host key classification and host component synthesis.

use angular_compile_metadata::compile_metadata::{
    create_host_component_meta, parse_binding_list, DirectiveConfig, DirectiveMetadata,
    IdentifierMetadata, TypeMetadata,
};
use angular_compile_metadata::core::ChangeDetectionStrategy;
use angular_compile_metadata::{MetadataError, SelectorError};
use indexmap::IndexMap;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

mod binding_list {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_split_directive_and_element_property() {
        assert_eq!(
            parse_binding_list(&strings(&["foo: bar"])),
            string_map(&[("foo", "bar")])
        );
    }

    #[test]
    fn should_use_the_same_name_without_a_colon() {
        assert_eq!(
            parse_binding_list(&strings(&["foo"])),
            string_map(&[("foo", "foo")])
        );
    }

    #[test]
    fn should_let_later_entries_win() {
        let bindings = parse_binding_list(&strings(&["foo: a", "bar", "foo: b"]));
        assert_eq!(bindings, string_map(&[("foo", "b"), ("bar", "bar")]));
    }
}

mod create {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_classify_host_keys() {
        let meta = DirectiveMetadata::create(DirectiveConfig {
            selector: Some("[my-dir]".to_string()),
            host: string_map(&[
                ("[disabled]", "isDisabled"),
                ("(click)", "onClick($event)"),
                ("@fade", "state"),
                ("role", "button"),
            ]),
            inputs: strings(&["value: myValue"]),
            outputs: strings(&["changed"]),
            ..Default::default()
        });

        assert_eq!(
            meta.host_properties,
            string_map(&[("disabled", "isDisabled"), ("@fade", "state")])
        );
        assert_eq!(
            meta.host_listeners,
            string_map(&[("click", "onClick($event)")])
        );
        assert_eq!(meta.host_attributes, string_map(&[("role", "button")]));
        assert_eq!(meta.inputs, string_map(&[("value", "myValue")]));
        assert_eq!(meta.outputs, string_map(&[("changed", "changed")]));
        assert_eq!(meta.selector.as_deref(), Some("[my-dir]"));
    }

    #[test]
    fn should_treat_partial_matches_as_attributes() {
        let meta = DirectiveMetadata::create(DirectiveConfig {
            host: string_map(&[("[a]b", "x"), ("(c", "y")]),
            ..Default::default()
        });
        assert!(meta.host_properties.is_empty());
        assert!(meta.host_listeners.is_empty());
        assert_eq!(meta.host_attributes, string_map(&[("[a]b", "x"), ("(c", "y")]));
    }

    #[test]
    fn should_default_to_empty_collections() {
        let meta = DirectiveMetadata::create(DirectiveConfig::default());
        assert!(meta.inputs.is_empty());
        assert!(meta.providers.is_empty());
        assert!(meta.lifecycle_hooks.is_empty());
        assert_eq!(meta.change_detection, None);
        assert!(!meta.is_component);
    }
}

mod host_component {
    use super::*;
    use pretty_assertions::assert_eq;

    fn foo_type() -> TypeMetadata {
        TypeMetadata::new(IdentifierMetadata::new("Foo", "package:app/foo.ts"))
    }

    #[test]
    fn should_create_a_host_component() {
        let host = create_host_component_meta(&foo_type(), "my-comp").unwrap();

        let host_type = host.type_.as_ref().unwrap();
        assert_eq!(host_type.name(), Some("Foo_Host"));
        assert_eq!(host_type.module_url(), Some("package:app/foo.ts"));
        assert!(host_type.is_host);
        assert!(host.is_component);
        assert_eq!(host.selector.as_deref(), Some("*"));
        assert_eq!(host.change_detection, Some(ChangeDetectionStrategy::Default));

        let template = host.template.as_ref().unwrap();
        assert_eq!(template.template.as_deref(), Some("<my-comp></my-comp>"));
        assert_eq!(template.template_url.as_deref(), Some(""));
        assert!(template.styles.is_empty());
        assert!(template.animations.is_empty());
        assert!(host.host_properties.is_empty());
    }

    #[test]
    fn should_use_the_first_selector_and_default_to_div() {
        let host = create_host_component_meta(&foo_type(), ".card[role=dialog], other").unwrap();
        assert_eq!(
            host.template.unwrap().template.as_deref(),
            Some("<div class=\"card\" role=\"dialog\"></div>")
        );
    }

    #[test]
    fn should_report_selector_errors() {
        assert_eq!(
            create_host_component_meta(&foo_type(), "[foo$bar]").unwrap_err(),
            MetadataError::Selector(SelectorError::UnescapedDollar("foo$bar".to_string()))
        );
        assert_eq!(
            create_host_component_meta(&foo_type(), "").unwrap_err(),
            MetadataError::Selector(SelectorError::Empty(String::new()))
        );
    }
}
