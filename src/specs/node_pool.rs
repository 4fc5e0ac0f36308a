//! `node_pool` spec: declare a pool of worker nodes to attach to a cluster

use serde::{Deserialize, Serialize};

use crate::Result;

use super::loader::Encoding;
use super::types::{NetworkSpec, PlacementParam};
use super::validate::{check_clone_mode, check_kind, check_required, de_lowercase};
use super::{SpecKind, CLONE_MODE_LINKED};

/// Declaration of a homogeneous pool of worker nodes
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolSpec {
    /// Kind discriminant; must be `node_pool`
    #[serde(default)]
    pub kind: String,

    /// Pool name, unique within the owning cluster
    #[serde(default)]
    pub name: String,

    /// Clone mode; canonicalized to lowercase at decode time.
    /// Defaults to `linkedclone` when unset.
    #[serde(default, alias = "clone_mode", deserialize_with = "de_lowercase")]
    pub clone_mode: String,

    /// vCPU count per node
    #[serde(default)]
    pub cpu: u32,

    /// Memory per node, in MiB
    #[serde(default)]
    pub memory: u64,

    /// Number of nodes in the pool; defaults to 1 when unset
    #[serde(default)]
    pub replica: u32,

    /// Disk per node, in GiB
    #[serde(default)]
    pub storage: u64,

    /// Node labels; at least one is required
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Network attachments, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkSpec>,

    /// Placement constraints, in declaration order
    #[serde(default, alias = "placement_params", skip_serializing_if = "Vec::is_empty")]
    pub placement_params: Vec<PlacementParam>,

    /// Opaque per-node configuration, passed through unmodified
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,

    /// Legacy node-customization switch; defaults to false
    #[serde(default, alias = "is_node_customization_deprecated")]
    pub is_node_customization_deprecated: bool,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

impl NodePoolSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// Defaults never override user-supplied values: `cloneMode` is filled
    /// only when empty and `replica` only when zero.
    pub fn apply_defaults(&mut self) {
        if self.clone_mode.is_empty() {
            self.clone_mode = CLONE_MODE_LINKED.to_string();
        }
        if self.replica == 0 {
            self.replica = 1;
        }
    }

    /// Run domain validation, latching the outcome
    pub fn validate(&mut self) -> Result<()> {
        let result = self.check();
        self.valid = result.is_ok();
        result
    }

    /// True iff the most recent [`validate`](Self::validate) succeeded
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The encoding this spec was decoded from, if loaded
    pub fn source_encoding(&self) -> Option<Encoding> {
        self.source_encoding
    }

    pub(crate) fn set_source_encoding(&mut self, encoding: Encoding) {
        self.source_encoding = Some(encoding);
    }

    fn check(&self) -> Result<()> {
        check_required(&[
            ("kind", !self.kind.is_empty()),
            ("name", !self.name.is_empty()),
            ("cloneMode", !self.clone_mode.is_empty()),
            ("cpu", self.cpu > 0),
            ("memory", self.memory > 0),
            ("replica", self.replica > 0),
            ("storage", self.storage > 0),
            ("labels", !self.labels.is_empty()),
            ("networks", !self.networks.is_empty()),
            ("placementParams", !self.placement_params.is_empty()),
        ])?;
        check_kind(SpecKind::NodePool, &self.kind)?;
        check_clone_mode("cloneMode", &self.clone_mode)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_spec() -> NodePoolSpec {
        NodePoolSpec {
            kind: "node_pool".to_string(),
            name: "np-gpu".to_string(),
            clone_mode: "fullclone".to_string(),
            cpu: 4,
            memory: 16384,
            replica: 2,
            storage: 80,
            labels: vec!["pool=gpu".to_string()],
            networks: vec![NetworkSpec {
                label: "MANAGEMENT".to_string(),
                network_name: "vlan-107".to_string(),
                nameservers: vec!["10.0.0.53".to_string()],
            }],
            placement_params: vec![PlacementParam {
                type_: "ClusterComputeResource".to_string(),
                name: "hubsite".to_string(),
            }],
            ..Default::default()
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_fills_clone_mode_and_replica_when_unset() {
            let mut spec = NodePoolSpec::default();
            spec.apply_defaults();
            assert_eq!(spec.clone_mode, CLONE_MODE_LINKED);
            assert_eq!(spec.replica, 1);
            assert!(!spec.is_node_customization_deprecated);
        }

        #[test]
        fn test_keeps_user_supplied_values() {
            let mut spec = valid_spec();
            spec.apply_defaults();
            assert_eq!(spec.clone_mode, "fullclone");
            assert_eq!(spec.replica, 2);
        }

        #[test]
        fn test_idempotent() {
            let mut spec = NodePoolSpec::default();
            spec.apply_defaults();
            let snapshot = serde_json::to_value(&spec).unwrap();
            spec.apply_defaults();
            assert_eq!(snapshot, serde_json::to_value(&spec).unwrap());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_valid_spec_passes() {
            let mut spec = valid_spec();
            assert!(spec.validate().is_ok());
            assert!(spec.is_valid());
        }

        #[test]
        fn test_zero_cpu() {
            let mut spec = valid_spec();
            spec.cpu = 0;
            assert_eq!(
                spec.validate().unwrap_err().to_string(),
                "missing required field: cpu"
            );
        }

        #[test]
        fn test_rule_order_numeric_before_sequences() {
            let mut spec = valid_spec();
            spec.memory = 0;
            spec.labels.clear();
            assert_eq!(
                spec.validate().unwrap_err().to_string(),
                "missing required field: memory"
            );
        }

        #[test]
        fn test_empty_labels() {
            let mut spec = valid_spec();
            spec.labels.clear();
            assert_eq!(
                spec.validate().unwrap_err().to_string(),
                "missing required field: labels"
            );
        }

        #[test]
        fn test_unknown_clone_mode_names_allowed_values() {
            let mut spec = valid_spec();
            spec.clone_mode = "banana".to_string();
            let err = spec.validate().unwrap_err();
            assert_eq!(err.category(), "invalid-enum-value");
            assert!(err.to_string().contains("fullClone, linkedClone"));
        }

        #[test]
        fn test_kind_gate() {
            let mut spec = valid_spec();
            spec.kind = "template".to_string();
            assert_eq!(spec.validate().unwrap_err().category(), "invalid-enum-value");
        }
    }
}
