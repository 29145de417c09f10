//! Import URI Resolution Tests
//!
//! Installs a process-wide resolver, so these tests live in their own
//! binary.

use angular_compile_metadata::compile_metadata::{IdentifierMetadata, TokenMap, TokenMetadata};
use angular_compile_metadata::reflector::{reflector, set_reflector, ImportUriResolver};
use pretty_assertions::assert_eq;

/// Maps sources and their declaration files to one package URI.
struct PackageResolver;

impl ImportUriResolver for PackageResolver {
    fn import_uri(&self, file_path: &str, _name: &str) -> String {
        let module = file_path
            .trim_end_matches(".d.ts")
            .trim_end_matches(".ts");
        format!("resolved:{}", module)
    }
}

fn install() {
    // every test installs; only the first call wins
    let _ = set_reflector(Box::new(PackageResolver));
}

#[test]
fn should_build_the_asset_key_from_the_resolved_uri() {
    install();
    let token = TokenMetadata::from_identifier(IdentifierMetadata::new("Foo", "package:a.ts"));
    assert_eq!(token.asset_cache_key(), Some("Foo|resolved:package:a|false"));
}

#[test]
fn should_match_tokens_resolving_to_the_same_uri() {
    install();
    let source = TokenMetadata::from_identifier(IdentifierMetadata::new("Foo", "package:app/foo.ts"));
    let declaration =
        TokenMetadata::from_identifier(IdentifierMetadata::new("Foo", "package:app/foo.d.ts"));
    assert!(source.equals_to(&declaration));

    let mut map = TokenMap::new();
    map.add(source, "foo").unwrap();
    assert_eq!(map.get(&declaration), Some(&"foo"));
}

#[test]
fn should_not_resolve_paths_without_a_scheme() {
    install();
    let token = TokenMetadata::from_identifier(IdentifierMetadata::new("Foo", "app/foo.ts"));
    assert_eq!(token.asset_cache_key(), None);
}

#[test]
fn should_keep_the_first_installed_resolver() {
    install();
    struct Other;
    impl ImportUriResolver for Other {
        fn import_uri(&self, _file_path: &str, _name: &str) -> String {
            "other".to_string()
        }
    }
    assert!(set_reflector(Box::new(Other)).is_err());
    assert_eq!(reflector().import_uri("package:b.ts", "B"), "resolved:package:b");
}
