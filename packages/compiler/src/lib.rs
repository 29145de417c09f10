#![deny(clippy::all)]

/*!
 * Angular Compile Metadata
 *
 * Metadata model of the offline template compiler and its JSON
 * serialization protocol.
 */

// Core modules (root level)
pub mod core;
pub mod error;
pub mod reflector;
pub mod selector;
pub mod url_resolver;
pub mod util;

// Metadata model
pub mod compile_metadata;

// Re-exports
pub use compile_metadata::{metadata_from_json, CompileMetadata, MetadataClass, ToJson};
pub use error::{MetadataError, Result, SelectorError};
