//! Metadata Errors

/// Failure raised while parsing a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Nesting :not in a selector is not allowed")]
    NestedNot,
    #[error("Multiple selectors in :not are not supported")]
    MultipleInNot,
    #[error("Error in attribute selector \"{0}\". Unescaped \"$\" is not supported. Please escape with \"\\$\".")]
    UnescapedDollar(String),
    #[error("Selector \"{0}\" does not describe any element")]
    Empty(String),
}

/// Errors produced while building or restoring compile metadata.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MetadataError {
    /// An interpolation pair must hold exactly a start and an end symbol.
    #[error("'interpolation' should have a start and an end symbol (got {len} symbols)")]
    InvalidInterpolation { len: usize },

    /// A token resolving to an existing entry was added to a `TokenMap`.
    #[error("Can only add to a TokenMap! Token: {name}")]
    DuplicateToken { name: String },

    /// The `class` tag names no registered metadata decoder.
    #[error("Unknown metadata class \"{0}\"")]
    UnknownDiscriminator(String),

    /// A node decoded through the dispatcher carries no `class` tag.
    #[error("Metadata node has no \"class\" discriminator")]
    MissingDiscriminator,

    /// A decoded node has a different class than its field allows.
    #[error("Expected {expected} metadata, found {found}")]
    UnexpectedNode {
        expected: &'static str,
        found: &'static str,
    },

    /// A JSON field has the wrong shape.
    #[error("Field \"{field}\" should be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// An enum name is not in the enum value registry.
    #[error("\"{value}\" is not a valid {kind}")]
    InvalidEnumValue { kind: &'static str, value: String },

    /// A provider must pick exactly one of useClass/useValue/useExisting/useFactory.
    #[error("A provider needs exactly one of useClass, useValue, useExisting or useFactory (got {count})")]
    ProviderStrategy { count: usize },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
