//! Reflector
//!
//! The compiler asks the reflection capability for the import URI of a
//! symbol when it needs an identity that survives static analysis. The
//! capability is installed once per process; until then paths are used as
//! they are.

use once_cell::sync::OnceCell;

/// Maps a symbol's defining file to the URI other modules import it from.
pub trait ImportUriResolver: Send + Sync {
    fn import_uri(&self, file_path: &str, name: &str) -> String;
}

/// Resolver used when none has been installed: the file path is the URI.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilePathImportUriResolver;

impl ImportUriResolver for FilePathImportUriResolver {
    fn import_uri(&self, file_path: &str, _name: &str) -> String {
        file_path.to_string()
    }
}

static REFLECTOR: OnceCell<Box<dyn ImportUriResolver>> = OnceCell::new();
static DEFAULT_REFLECTOR: FilePathImportUriResolver = FilePathImportUriResolver;

/// Install the process-wide resolver.
///
/// Returns the resolver back if one is already installed. Asset keys that
/// were computed before installation keep their old value.
pub fn set_reflector(
    resolver: Box<dyn ImportUriResolver>,
) -> Result<(), Box<dyn ImportUriResolver>> {
    REFLECTOR.set(resolver)
}

/// The installed resolver, or [`FilePathImportUriResolver`].
pub fn reflector() -> &'static dyn ImportUriResolver {
    match REFLECTOR.get() {
        Some(resolver) => resolver.as_ref(),
        None => &DEFAULT_REFLECTOR,
    }
}
