//! Error types for the CLI core

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the spec loader and validators
///
/// Each variant is a machine-readable category; the `Display` output is a
/// stable, human-readable message suitable for direct display by the CLI.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed input or unknown document format
    #[error("decode error: {0}")]
    Decode(String),

    /// A structurally required field is absent, empty, or zero
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field as it appears in the document
        field: String,
    },

    /// A field value lies outside its closed set
    #[error("invalid value for {field}, expected one of: {allowed}")]
    InvalidEnum {
        /// Name of the offending field
        field: String,
        /// Comma-separated list of accepted values
        allowed: String,
    },

    /// A value failed a syntactic check (IP address, URL)
    #[error("invalid {field}: {reason}")]
    InvalidFormat {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A multi-field rule failed
    #[error("{0}")]
    CrossField(String),

    /// Lookup for a named sub-entity failed
    #[error("{what} not found: {name}")]
    NotFound {
        /// What was being looked up (e.g., "vim")
        what: String,
        /// The name that missed
        name: String,
    },

    /// File open/read failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a decode error with the given message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a missing-required-field error for the given field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid-enum-value error for the given field
    pub fn invalid_enum(field: impl Into<String>, allowed: impl Into<String>) -> Self {
        Self::InvalidEnum {
            field: field.into(),
            allowed: allowed.into(),
        }
    }

    /// Create an invalid-format error for the given field
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a cross-field-violation error with the given message
    pub fn cross_field(msg: impl Into<String>) -> Self {
        Self::CrossField(msg.into())
    }

    /// Create a not-found error for a named sub-entity
    pub fn not_found(what: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            what: what.into(),
            name: name.into(),
        }
    }

    /// Machine-readable category name for this error
    pub fn category(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode-error",
            Self::MissingField { .. } => "missing-required-field",
            Self::InvalidEnum { .. } => "invalid-enum-value",
            Self::InvalidFormat { .. } => "invalid-format",
            Self::CrossField(_) => "cross-field-violation",
            Self::NotFound { .. } => "not-found",
            Self::Io(_) => "io-error",
        }
    }
}
