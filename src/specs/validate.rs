//! Validation helpers shared by the kind validators
//!
//! Every validator runs two layers. The structural layer walks a declarative
//! required-field table through [`check_required`]; the semantic layer runs
//! kind-specific rules afterwards. The first violated rule wins, and the rule
//! order per kind is part of the contract.

use std::net::IpAddr;

use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

use super::{
    SpecKind, CLONE_MODES_ALLOWED, CLONE_MODE_FULL, CLONE_MODE_LINKED, CLUSTER_TYPES_ALLOWED,
    CLUSTER_TYPE_MANAGEMENT, CLUSTER_TYPE_WORKLOAD,
};

/// Walk a required-field table in order; the first absent entry wins.
///
/// An entry is `(document field name, present?)`, where "present" means
/// non-empty for strings and sequences, non-zero for numerics.
pub(crate) fn check_required(fields: &[(&'static str, bool)]) -> Result<()> {
    for (field, present) in fields {
        if !present {
            return Err(Error::missing_field(*field));
        }
    }
    Ok(())
}

/// Gate the `kind` discriminant against the kind the validator belongs to.
///
/// Empty kind reports missing-required-field; any other mismatch reports
/// invalid-enum-value naming the single accepted value.
pub(crate) fn check_kind(expected: SpecKind, actual: &str) -> Result<()> {
    if actual.is_empty() {
        return Err(Error::missing_field("kind"));
    }
    if actual != expected.as_str() {
        return Err(Error::invalid_enum("kind", expected.as_str()));
    }
    Ok(())
}

/// Check a canonicalized clone mode against the closed set.
pub(crate) fn check_clone_mode(field: &'static str, value: &str) -> Result<()> {
    if value == CLONE_MODE_FULL || value == CLONE_MODE_LINKED {
        Ok(())
    } else {
        Err(Error::invalid_enum(field, CLONE_MODES_ALLOWED))
    }
}

/// Check a canonicalized cluster type against the closed set.
pub(crate) fn check_cluster_type(value: &str) -> Result<()> {
    if value == CLUSTER_TYPE_MANAGEMENT || value == CLUSTER_TYPE_WORKLOAD {
        Ok(())
    } else {
        Err(Error::invalid_enum("clusterType", CLUSTER_TYPES_ALLOWED))
    }
}

/// Syntactic URL check: a scheme, `://`, and a non-empty host.
///
/// Deliberately shallow; the orchestrator performs the authoritative
/// resolution when the spec is dispatched.
pub(crate) fn check_url(field: &'static str, value: &str) -> Result<()> {
    let Some((scheme, rest)) = value.split_once("://") else {
        return Err(Error::invalid_format(field, format!("not a URL: {value}")));
    };
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return Err(Error::invalid_format(field, format!("bad URL scheme: {value}")));
    }
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(Error::invalid_format(field, format!("URL has no host: {value}")));
    }
    Ok(())
}

/// Check that a value parses as an IPv4 or IPv6 literal.
pub(crate) fn check_ip(field: &'static str, value: &str) -> Result<()> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| Error::invalid_format(field, format!("not an IP address: {value}")))
}

/// Deserialize a string field canonicalized to lowercase.
///
/// Enum-like string fields (clone mode, cluster type, CSI name) are
/// canonicalized at decode time so validators compare byte-for-byte.
pub(crate) fn de_lowercase<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_ascii_lowercase())
}
