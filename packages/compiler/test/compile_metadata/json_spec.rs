//! Metadata JSON Protocol Tests
//!
//! Encoding every class and restoring it through the discriminator registry.

use angular_compile_metadata::compile_metadata::{
    AppModuleMetadata, CompileMetadata, DiDependencyConfig, DiDependencyMetadata,
    DirectiveConfig, DirectiveMetadata, FactoryMetadata, IdentifierMetadata, MetadataClass,
    MetadataValue, PipeMetadata, ProviderConfig, ProviderEntry, ProviderMetadata,
    QueryMetadata, RuntimeHandle, TemplateConfig, TemplateMetadata, TokenMetadata, ToJson,
    TypeMetadata,
};
use angular_compile_metadata::core::{ChangeDetectionStrategy, LifecycleHooks};
use angular_compile_metadata::{metadata_from_json, MetadataError};
use indexmap::IndexMap;
use serde_json::json;

fn type_meta(name: &str) -> TypeMetadata {
    TypeMetadata::new(IdentifierMetadata::new(name, "package:app/app.ts"))
}

fn round_trip(meta: CompileMetadata) -> CompileMetadata {
    let encoded = meta.to_json();
    // the tree must survive text serialization too
    let text = serde_json::to_string(&encoded).unwrap();
    metadata_from_json(&serde_json::from_str(&text).unwrap()).unwrap()
}

fn logger_provider() -> ProviderMetadata {
    ProviderMetadata::new(ProviderConfig {
        token: Some(TokenMetadata::from_value("logger")),
        use_class: Some(type_meta("ConsoleLogger")),
        multi: true,
        ..Default::default()
    })
    .unwrap()
}

mod round_trips {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_restore_a_directive() {
        let mut host = IndexMap::new();
        host.insert("[class.active]".to_string(), "active".to_string());
        host.insert("(click)".to_string(), "toggle()".to_string());
        host.insert("@expand".to_string(), "state".to_string());

        let directive = DirectiveMetadata::create(DirectiveConfig {
            type_: Some(type_meta("MyComp")),
            is_component: true,
            selector: Some("my-comp".to_string()),
            export_as: Some("myComp".to_string()),
            change_detection: Some(ChangeDetectionStrategy::OnPush),
            inputs: vec!["value: myValue".to_string()],
            outputs: vec!["changed".to_string()],
            host,
            lifecycle_hooks: vec![LifecycleHooks::OnInit, LifecycleHooks::OnDestroy],
            providers: vec![logger_provider().into()],
            queries: vec![QueryMetadata {
                selectors: vec![TokenMetadata::from_value("item")],
                descendants: true,
                property_name: Some("items".to_string()),
                ..Default::default()
            }],
            template: Some(
                TemplateMetadata::new(TemplateConfig {
                    template: Some("<p></p>".to_string()),
                    ..Default::default()
                })
                .unwrap(),
            ),
            ..Default::default()
        });

        let meta = CompileMetadata::Directive(directive);
        let encoded = meta.to_json();
        assert_eq!(encoded["class"], json!("Directive"));
        assert_eq!(encoded["changeDetection"], json!("OnPush"));
        assert_eq!(encoded["lifecycleHooks"], json!(["OnInit", "OnDestroy"]));
        assert_eq!(encoded["hostProperties"]["@expand"], json!("state"));
        assert_eq!(round_trip(meta.clone()), meta);
    }

    #[test]
    fn should_restore_an_app_module() {
        let module = AppModuleMetadata {
            type_: Some(type_meta("AppModule")),
            providers: vec![
                logger_provider().into(),
                type_meta("Service").into(),
                ProviderEntry::List(vec![type_meta("Nested").into()]),
            ],
            directives: vec![type_meta("MyComp")],
            pipes: vec![type_meta("MyPipe")],
            precompile: vec![type_meta("MyComp")],
            modules: vec![type_meta("CommonModule")],
        };
        let meta = CompileMetadata::AppModule(module);
        assert_eq!(round_trip(meta.clone()), meta);
    }

    #[test]
    fn should_restore_a_pipe_with_lifecycle_hooks() {
        let meta = CompileMetadata::Pipe(PipeMetadata {
            type_: Some(type_meta("AsyncPipe")),
            name: Some("async".to_string()),
            pure: false,
            lifecycle_hooks: vec![LifecycleHooks::OnDestroy],
        });
        assert_eq!(meta.to_json()["lifecycleHooks"], json!(["OnDestroy"]));
        assert_eq!(round_trip(meta.clone()), meta);
    }

    #[test]
    fn should_restore_a_factory_provider_with_dependencies() {
        let factory = FactoryMetadata {
            identifier: IdentifierMetadata::new("createStore", "package:app/store.ts"),
            di_deps: vec![DiDependencyMetadata::new(DiDependencyConfig {
                is_optional: true,
                is_skip_self: true,
                token: Some(TokenMetadata::from_identifier(IdentifierMetadata::new(
                    "Config",
                    "package:app/config.ts",
                ))),
                ..Default::default()
            })],
        };
        let provider = ProviderMetadata::new(ProviderConfig {
            token: Some(TokenMetadata::instance_of(IdentifierMetadata::new(
                "Store",
                "package:app/store.ts",
            ))),
            use_factory: Some(factory.clone()),
            deps: Some(vec![DiDependencyMetadata::on(TokenMetadata::from_value(
                "apiUrl",
            ))]),
            ..Default::default()
        })
        .unwrap();

        let meta = CompileMetadata::Provider(provider);
        let restored = round_trip(meta.clone());
        assert_eq!(restored, meta);

        let CompileMetadata::Provider(restored) = restored else {
            panic!("expected a provider");
        };
        let restored_factory = restored.use_factory().unwrap();
        assert_eq!(restored_factory, &factory);
        assert!(restored_factory.di_deps[0].is_optional());
        assert!(restored_factory.di_deps[0].is_skip_self());
        assert!(!restored_factory.di_deps[0].is_host());
        assert!(restored.token.as_ref().unwrap().identifier_is_instance());

        let meta = CompileMetadata::Factory(factory);
        assert_eq!(round_trip(meta.clone()), meta);
    }

    #[test]
    fn should_keep_absent_and_empty_provider_deps_apart() {
        let absent = ProviderMetadata::new(ProviderConfig {
            use_value: Some(MetadataValue::from(1i64)),
            ..Default::default()
        })
        .unwrap();
        let empty = ProviderMetadata {
            deps: Some(Vec::new()),
            ..absent.clone()
        };
        for provider in [absent, empty] {
            let meta = CompileMetadata::Provider(provider);
            assert_eq!(round_trip(meta.clone()), meta);
        }
    }

    #[test]
    fn should_restore_identifier_values_recursively() {
        let nested = CompileMetadata::Type(type_meta("Inner"));
        let identifier = IdentifierMetadata {
            value: MetadataValue::Array(vec![
                MetadataValue::from("text"),
                MetadataValue::from(true),
                MetadataValue::from(nested.clone()),
                MetadataValue::Null,
            ]),
            prefix: Some("i0".to_string()),
            ..IdentifierMetadata::new("CONST", "package:app/consts.ts")
        };

        let restored = round_trip(CompileMetadata::Identifier(identifier.clone()));
        let CompileMetadata::Identifier(restored) = restored else {
            panic!("expected an identifier");
        };
        assert_eq!(restored, identifier);
        let MetadataValue::Array(items) = &restored.value else {
            panic!("expected an array value");
        };
        assert_eq!(items[2].as_node(), Some(&nested));
    }

    #[test]
    fn should_drop_runtime_handles() {
        let identifier = IdentifierMetadata::new("Foo", "package:app/foo.ts")
            .with_runtime(RuntimeHandle::new("Foo"));
        let restored = round_trip(CompileMetadata::Identifier(identifier.clone()));
        assert_eq!(
            restored,
            CompileMetadata::Identifier(IdentifierMetadata {
                runtime: None,
                ..identifier
            })
        );
    }
}

mod dispatch {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_reject_unknown_classes() {
        assert_eq!(
            metadata_from_json(&json!({"class": "Bogus"})).unwrap_err(),
            MetadataError::UnknownDiscriminator("Bogus".to_string())
        );
        assert_eq!(MetadataClass::from_discriminator("Bogus"), None);
    }

    #[test]
    fn should_reject_nodes_without_a_class() {
        assert_eq!(
            metadata_from_json(&json!({"name": "Foo"})).unwrap_err(),
            MetadataError::MissingDiscriminator
        );
        assert_eq!(
            metadata_from_json(&json!("Foo")).unwrap_err(),
            MetadataError::MissingDiscriminator
        );
    }

    #[test]
    fn should_decode_by_discriminator() {
        let meta = metadata_from_json(&json!({
            "class": "Type",
            "name": "Foo",
            "moduleUrl": "package:app/foo.ts",
        }))
        .unwrap();
        assert_eq!(meta.class(), MetadataClass::Type);
        assert_eq!(
            meta,
            CompileMetadata::Type(TypeMetadata::new(IdentifierMetadata::new(
                "Foo",
                "package:app/foo.ts"
            )))
        );
    }

    #[test]
    fn should_reject_nodes_of_the_wrong_class() {
        let data = json!({
            "class": "AppModule",
            "directives": [{"class": "Pipe", "name": "async"}],
        });
        assert_eq!(
            metadata_from_json(&data).unwrap_err(),
            MetadataError::UnexpectedNode {
                expected: "Type",
                found: "Pipe",
            }
        );
    }

    #[test]
    fn should_restore_a_provider_without_strategy_as_null_value() {
        let meta = metadata_from_json(&json!({"class": "Provider", "useValue": null})).unwrap();
        let CompileMetadata::Provider(provider) = meta else {
            panic!("expected a provider");
        };
        assert_eq!(provider.use_value(), Some(&MetadataValue::Null));
        assert_eq!(provider.use_class(), None);
    }

    #[test]
    fn should_reject_providers_with_several_strategies() {
        let err = ProviderMetadata::new(ProviderConfig {
            use_class: Some(type_meta("A")),
            use_value: Some(MetadataValue::from("b")),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, MetadataError::ProviderStrategy { count: 2 });

        let data = json!({
            "class": "Provider",
            "useClass": type_meta("A").to_json(),
            "useExisting": {"value": "b", "identifier": null, "identifierIsInstance": false},
        });
        assert_eq!(
            metadata_from_json(&data).unwrap_err(),
            MetadataError::ProviderStrategy { count: 2 }
        );
    }
}
