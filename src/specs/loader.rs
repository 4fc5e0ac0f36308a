//! Spec loader: encoding detection, decode, defaulting
//!
//! Three entry points — [`from_file`], [`from_string`], [`from_reader`] — all
//! collapse to the same pipeline: decode the document into a generic value,
//! dispatch on its `kind`, decode the kind's concrete shape, apply defaults.
//!
//! The loader does NOT validate; callers invoke
//! [`RequestSpec::validate`](super::RequestSpec::validate) explicitly so
//! tooling can inspect partially populated specs.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::{Error, Result};

use super::{RequestSpec, SpecKind};

/// Document encoding, used as a loader hint and recorded on loaded specs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Bracketed object/array encoding
    Json,
    /// Indented hierarchical encoding
    Yaml,
    /// Not known up front; the decoder tries JSON first, then YAML
    Unknown,
}

impl Encoding {
    /// Derive the default hint from a filename suffix
    ///
    /// `.yaml`/`.yml` map to YAML, `.json` to JSON, anything else to
    /// [`Encoding::Unknown`].
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "unknown" => Ok(Self::Unknown),
            _ => Err(Error::decode(format!(
                "unknown encoding: {s}, expected one of: json, yaml"
            ))),
        }
    }
}

/// Load a spec from a file
///
/// When `hint` is omitted the filename suffix chooses the encoding.
/// File-not-found and read failures surface unchanged as io errors.
pub fn from_file<P: AsRef<Path>>(path: P, hint: Option<Encoding>) -> Result<RequestSpec> {
    let path = path.as_ref();
    let hint = hint.unwrap_or_else(|| Encoding::from_path(path));
    let file = File::open(path)?;
    from_reader(BufReader::new(file), Some(hint))
}

/// Load a spec from an in-memory string
pub fn from_string(text: &str, hint: Option<Encoding>) -> Result<RequestSpec> {
    let (value, encoding) = decode_document(text, hint)?;
    spec_from_value(value, encoding)
}

/// Load a spec from a byte reader, reading it to end
pub fn from_reader<R: Read>(mut reader: R, hint: Option<Encoding>) -> Result<RequestSpec> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    from_string(&text, hint)
}

/// Decode raw text into a generic document value
///
/// With no hint (or [`Encoding::Unknown`]) the decoder attempts JSON first,
/// then YAML; if both fail the document has an unknown format.
fn decode_document(text: &str, hint: Option<Encoding>) -> Result<(serde_json::Value, Encoding)> {
    if text.trim().is_empty() {
        return Err(Error::decode("empty input"));
    }
    match hint {
        Some(Encoding::Json) => {
            let value = serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))?;
            Ok((value, Encoding::Json))
        }
        Some(Encoding::Yaml) => {
            let value = serde_yaml::from_str(text).map_err(|e| Error::decode(e.to_string()))?;
            Ok((value, Encoding::Yaml))
        }
        Some(Encoding::Unknown) | None => {
            if let Ok(value) = serde_json::from_str(text) {
                return Ok((value, Encoding::Json));
            }
            if let Ok(value) = serde_yaml::from_str(text) {
                return Ok((value, Encoding::Yaml));
            }
            Err(Error::decode("unknown format"))
        }
    }
}

/// Dispatch a decoded document on its `kind` and apply defaults
fn spec_from_value(value: serde_json::Value, encoding: Encoding) -> Result<RequestSpec> {
    let kind_str = value
        .get("kind")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| Error::decode("document has no 'kind' field"))?;
    let kind: SpecKind = kind_str.parse()?;
    let mut spec = kind.decode_value(value)?;
    spec.set_source_encoding(encoding);
    spec.apply_defaults();
    Ok(spec)
}
