//! Request specifications for the orchestrator
//!
//! A request spec is a declarative document the user authors to request an
//! orchestrator action. Six kinds are recognized; each kind is bound to a
//! concrete request shape, a defaulter, and a validator. The binding is
//! compile-time only: adding a kind means adding a [`SpecKind`] variant and a
//! [`RequestSpec`] arm.
//!
//! Every spec exposes the same capability set: [`RequestSpec::kind`],
//! [`RequestSpec::apply_defaults`] (idempotent), [`RequestSpec::validate`]
//! (latches its outcome), and [`RequestSpec::is_valid`].

pub mod cluster;
pub mod extension;
pub mod filters;
pub mod instance;
pub mod lcm;
pub mod loader;
pub mod node_pool;
pub mod provider;
pub mod template;
pub mod types;
mod validate;

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

pub use cluster::{ClusterConfig, ClusterNode, ClusterSpec};
pub use extension::{ExtensionSpec, VimInfo};
pub use instance::{AdditionalParams, InstanceSpec};
pub use loader::{from_file, from_reader, from_string, Encoding};
pub use node_pool::NodePoolSpec;
pub use provider::ProviderSpec;
pub use template::{ClusterTemplateSpec, TemplateConfig};
pub use types::{AccessInfo, CniSpec, CsiSpec, InterfaceInfo, NetworkSpec, NodeTemplate, PlacementParam};

/// Canonical (lowercased) clone mode for full clones
pub const CLONE_MODE_FULL: &str = "fullclone";
/// Canonical (lowercased) clone mode for linked clones
pub const CLONE_MODE_LINKED: &str = "linkedclone";
/// Canonical (lowercased) cluster type for management clusters
pub const CLUSTER_TYPE_MANAGEMENT: &str = "management";
/// Canonical (lowercased) cluster type for workload clusters
pub const CLUSTER_TYPE_WORKLOAD: &str = "workload";
/// CSI driver name for the NFS provisioner
pub const CSI_NFS_CLIENT: &str = "nfs_client";
/// CSI driver name for the vSphere CSI driver
pub const CSI_VSPHERE: &str = "vsphere-csi";

/// Accepted clone modes, spelled the way documents spell them
pub(crate) const CLONE_MODES_ALLOWED: &str = "fullClone, linkedClone";
/// Accepted cluster types, spelled the way documents spell them
pub(crate) const CLUSTER_TYPES_ALLOWED: &str = "MANAGEMENT, WORKLOAD";
/// Accepted CSI driver names
pub(crate) const CSI_NAMES_ALLOWED: &str = "nfs_client, vsphere-csi";

/// The closed set of recognized request-spec kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecKind {
    /// Register an infrastructure virtualization endpoint
    Provider,
    /// Register an add-on service with the platform
    Extensions,
    /// Declare a pool of worker nodes to attach to a cluster
    NodePool,
    /// Declare a reusable cluster shape
    Template,
    /// Request creation of a management or workload cluster
    Cluster,
    /// Request instantiation of a catalog-defined workload
    Instance,
}

impl SpecKind {
    /// Every recognized kind, in registry order
    pub const ALL: [SpecKind; 6] = [
        SpecKind::Provider,
        SpecKind::Extensions,
        SpecKind::NodePool,
        SpecKind::Template,
        SpecKind::Cluster,
        SpecKind::Instance,
    ];

    /// The kind discriminant as it appears in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Extensions => "extensions",
            Self::NodePool => "node_pool",
            Self::Template => "template",
            Self::Cluster => "cluster",
            Self::Instance => "instance",
        }
    }

    /// Decode a generic document value into this kind's concrete shape
    ///
    /// Unknown top-level keys are ignored; type mismatches within known keys
    /// are decode errors.
    pub(crate) fn decode_value(self, value: serde_json::Value) -> Result<RequestSpec> {
        fn de<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
            serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
        }
        Ok(match self {
            Self::Provider => RequestSpec::Provider(de(value)?),
            Self::Extensions => RequestSpec::Extensions(de(value)?),
            Self::NodePool => RequestSpec::NodePool(de(value)?),
            Self::Template => RequestSpec::Template(de(value)?),
            Self::Cluster => RequestSpec::Cluster(de(value)?),
            Self::Instance => RequestSpec::Instance(de(value)?),
        })
    }
}

impl FromStr for SpecKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "provider" => Ok(Self::Provider),
            "extensions" => Ok(Self::Extensions),
            "node_pool" => Ok(Self::NodePool),
            "template" => Ok(Self::Template),
            "cluster" => Ok(Self::Cluster),
            "instance" => Ok(Self::Instance),
            _ => Err(Error::decode(format!(
                "unknown spec kind: {s}, expected one of: provider, extensions, node_pool, template, cluster, instance"
            ))),
        }
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded request spec, dispatched by kind
///
/// This is the opaque handle the loader returns; callers query the
/// discriminant via [`RequestSpec::kind`] or downcast with the `as_*`
/// accessors.
#[derive(Clone, Debug)]
pub enum RequestSpec {
    /// A `provider` registration request
    Provider(ProviderSpec),
    /// An `extensions` registration request
    Extensions(ExtensionSpec),
    /// A `node_pool` declaration
    NodePool(NodePoolSpec),
    /// A `template` declaration
    Template(ClusterTemplateSpec),
    /// A `cluster` creation request
    Cluster(ClusterSpec),
    /// An `instance` instantiation request
    Instance(InstanceSpec),
}

impl RequestSpec {
    /// The kind this spec was dispatched against
    pub fn kind(&self) -> SpecKind {
        match self {
            Self::Provider(_) => SpecKind::Provider,
            Self::Extensions(_) => SpecKind::Extensions,
            Self::NodePool(_) => SpecKind::NodePool,
            Self::Template(_) => SpecKind::Template,
            Self::Cluster(_) => SpecKind::Cluster,
            Self::Instance(_) => SpecKind::Instance,
        }
    }

    /// Fill optional fields with their documented defaults; idempotent
    pub fn apply_defaults(&mut self) {
        match self {
            Self::Provider(s) => s.apply_defaults(),
            Self::Extensions(s) => s.apply_defaults(),
            Self::NodePool(s) => s.apply_defaults(),
            Self::Template(s) => s.apply_defaults(),
            Self::Cluster(s) => s.apply_defaults(),
            Self::Instance(s) => s.apply_defaults(),
        }
    }

    /// Run domain validation, latching the outcome
    ///
    /// Returns the first violated rule; rules run in a fixed, documented
    /// order per kind.
    pub fn validate(&mut self) -> Result<()> {
        match self {
            Self::Provider(s) => s.validate(),
            Self::Extensions(s) => s.validate(),
            Self::NodePool(s) => s.validate(),
            Self::Template(s) => s.validate(),
            Self::Cluster(s) => s.validate(),
            Self::Instance(s) => s.validate(),
        }
    }

    /// True iff the most recent [`validate`](Self::validate) succeeded
    ///
    /// Fresh specs report `false`.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Provider(s) => s.is_valid(),
            Self::Extensions(s) => s.is_valid(),
            Self::NodePool(s) => s.is_valid(),
            Self::Template(s) => s.is_valid(),
            Self::Cluster(s) => s.is_valid(),
            Self::Instance(s) => s.is_valid(),
        }
    }

    /// The encoding the loader decoded this spec from, if loaded
    pub fn source_encoding(&self) -> Option<Encoding> {
        match self {
            Self::Provider(s) => s.source_encoding(),
            Self::Extensions(s) => s.source_encoding(),
            Self::NodePool(s) => s.source_encoding(),
            Self::Template(s) => s.source_encoding(),
            Self::Cluster(s) => s.source_encoding(),
            Self::Instance(s) => s.source_encoding(),
        }
    }

    pub(crate) fn set_source_encoding(&mut self, encoding: Encoding) {
        match self {
            Self::Provider(s) => s.set_source_encoding(encoding),
            Self::Extensions(s) => s.set_source_encoding(encoding),
            Self::NodePool(s) => s.set_source_encoding(encoding),
            Self::Template(s) => s.set_source_encoding(encoding),
            Self::Cluster(s) => s.set_source_encoding(encoding),
            Self::Instance(s) => s.set_source_encoding(encoding),
        }
    }

    /// Downcast to a provider spec
    pub fn as_provider(&self) -> Option<&ProviderSpec> {
        match self {
            Self::Provider(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to an extension spec
    pub fn as_extensions(&self) -> Option<&ExtensionSpec> {
        match self {
            Self::Extensions(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to a node pool spec
    pub fn as_node_pool(&self) -> Option<&NodePoolSpec> {
        match self {
            Self::NodePool(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to a cluster template spec
    pub fn as_template(&self) -> Option<&ClusterTemplateSpec> {
        match self {
            Self::Template(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to a cluster spec
    pub fn as_cluster(&self) -> Option<&ClusterSpec> {
        match self {
            Self::Cluster(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to a cluster spec, mutably
    pub fn as_cluster_mut(&mut self) -> Option<&mut ClusterSpec> {
        match self {
            Self::Cluster(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to an instance spec
    pub fn as_instance(&self) -> Option<&InstanceSpec> {
        match self {
            Self::Instance(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to an instance spec, mutably
    pub fn as_instance_mut(&mut self) -> Option<&mut InstanceSpec> {
        match self {
            Self::Instance(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod spec_kind {
        use super::*;

        #[test]
        fn test_from_str_valid() {
            for kind in SpecKind::ALL {
                assert_eq!(kind.as_str().parse::<SpecKind>().unwrap(), kind);
            }
        }

        #[test]
        fn test_from_str_invalid() {
            let result = "virtual_machine".parse::<SpecKind>();
            assert!(result.is_err());
            assert!(result
                .unwrap_err()
                .to_string()
                .contains("unknown spec kind"));
        }

        #[test]
        fn test_from_str_is_case_sensitive() {
            // Kind discriminants are exact; case variants are not accepted.
            assert!("Provider".parse::<SpecKind>().is_err());
            assert!("NODE_POOL".parse::<SpecKind>().is_err());
        }

        #[test]
        fn test_display() {
            assert_eq!(SpecKind::Provider.to_string(), "provider");
            assert_eq!(SpecKind::NodePool.to_string(), "node_pool");
            assert_eq!(SpecKind::Instance.to_string(), "instance");
        }

        #[test]
        fn test_registry_is_closed() {
            assert_eq!(SpecKind::ALL.len(), 6);
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn test_kind_matches_variant() {
            let mut spec = RequestSpec::Provider(ProviderSpec::default());
            assert_eq!(spec.kind(), SpecKind::Provider);
            assert!(!spec.is_valid());
            assert!(spec.as_provider().is_some());
            assert!(spec.as_cluster().is_none());
            spec.apply_defaults();
            assert_eq!(spec.kind(), SpecKind::Provider);
        }

        #[test]
        fn test_decode_value_ignores_unknown_keys() {
            let value = serde_json::json!({
                "kind": "provider",
                "hcxCloudUrl": "https://tca.example.com",
                "futureKnob": {"nested": true}
            });
            let spec = SpecKind::Provider.decode_value(value).unwrap();
            let provider = spec.as_provider().unwrap();
            assert_eq!(provider.hcx_cloud_url, "https://tca.example.com");
        }

        #[test]
        fn test_decode_value_type_mismatch_is_error() {
            let value = serde_json::json!({"kind": "node_pool", "cpu": "four"});
            let result = SpecKind::NodePool.decode_value(value);
            assert!(matches!(result, Err(crate::Error::Decode(_))));
        }
    }
}
