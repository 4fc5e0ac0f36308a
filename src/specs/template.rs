//! `template` spec: declare a reusable cluster shape

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::loader::Encoding;
use super::types::{CniSpec, CsiSpec, NodeTemplate};
use super::validate::{check_clone_mode, check_cluster_type, check_kind, check_required, de_lowercase};
use super::{SpecKind, CLUSTER_TYPE_MANAGEMENT, CLUSTER_TYPE_WORKLOAD};

/// Plug-in and version configuration embedded in a template
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// CNI plug-ins; workload templates need at least one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cni: Vec<CniSpec>,

    /// CSI drivers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csi: Vec<CsiSpec>,

    /// Kubernetes version the template pins
    #[serde(
        default,
        alias = "kubernetes_version",
        skip_serializing_if = "String::is_empty"
    )]
    pub kubernetes_version: String,
}

/// Declaration of a reusable cluster shape
///
/// A template describes the master and worker node shapes plus the add-on
/// configuration cluster-creation requests instantiate from.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTemplateSpec {
    /// Kind discriminant; must be `template`
    #[serde(default)]
    pub kind: String,

    /// Template name
    #[serde(default)]
    pub name: String,

    /// Cluster role the template produces; canonicalized to lowercase at
    /// decode time. The closed set is `management` and `workload`.
    #[serde(
        default,
        alias = "cluster_type",
        deserialize_with = "de_lowercase"
    )]
    pub cluster_type: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Add-on configuration; mandatory for workload templates
    #[serde(default, alias = "cluster_config", skip_serializing_if = "Option::is_none")]
    pub cluster_config: Option<TemplateConfig>,

    /// Master node shapes
    #[serde(default, alias = "master_nodes", skip_serializing_if = "Vec::is_empty")]
    pub master_nodes: Vec<NodeTemplate>,

    /// Worker node shapes
    #[serde(default, alias = "worker_nodes", skip_serializing_if = "Vec::is_empty")]
    pub worker_nodes: Vec<NodeTemplate>,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

impl ClusterTemplateSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// Templates carry no defaulted scalar fields; node-template clone modes
    /// stay as authored so the validator can report bad values.
    pub fn apply_defaults(&mut self) {}

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

    /// True if this template produces a management cluster
    pub fn is_management(&self) -> bool {
        self.cluster_type.eq_ignore_ascii_case(CLUSTER_TYPE_MANAGEMENT)
    }

    /// True if this template produces a workload cluster
    pub fn is_workload(&self) -> bool {
        self.cluster_type.eq_ignore_ascii_case(CLUSTER_TYPE_WORKLOAD)
    }

    fn check(&self) -> Result<()> {
        check_required(&[
            ("kind", !self.kind.is_empty()),
            ("name", !self.name.is_empty()),
            ("clusterType", !self.cluster_type.is_empty()),
        ])?;
        check_kind(SpecKind::Template, &self.kind)?;
        check_cluster_type(&self.cluster_type)?;

        // Clone mode is optional on template nodes, but a present value must
        // lie in the closed set. Masters are checked before workers.
        for node in self.master_nodes.iter().chain(&self.worker_nodes) {
            if !node.clone_mode.is_empty() {
                check_clone_mode("cloneMode", &node.clone_mode)?;
            }
        }

        // Management templates need no add-on configuration; workload
        // templates must declare at least one CNI plug-in. The CNI check does
        // not swallow later rules: further checks (none today) would still
        // run when it passes.
        if self.is_workload() {
            let config = self
                .cluster_config
                .as_ref()
                .ok_or_else(|| Error::cross_field("workload template requires clusterConfig"))?;
            if config.cni.is_empty() {
                return Err(Error::missing_field("clusterConfig.cni"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workload_spec() -> ClusterTemplateSpec {
        ClusterTemplateSpec {
            kind: "template".to_string(),
            name: "wc-2node".to_string(),
            cluster_type: "workload".to_string(),
            cluster_config: Some(TemplateConfig {
                cni: vec![CniSpec {
                    name: "antrea".to_string(),
                    properties: serde_json::Value::Null,
                }],
                ..Default::default()
            }),
            master_nodes: vec![NodeTemplate {
                name: "master".to_string(),
                clone_mode: "linkedclone".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_valid_workload_template() {
            let mut spec = workload_spec();
            assert!(spec.validate().is_ok());
            assert!(spec.is_valid());
        }

        #[test]
        fn test_management_template_needs_no_cluster_config() {
            let mut spec = workload_spec();
            spec.cluster_type = "management".to_string();
            spec.cluster_config = None;
            assert!(spec.validate().is_ok());
        }

        #[test]
        fn test_cluster_type_closed_set() {
            let mut spec = workload_spec();
            spec.cluster_type = "edge".to_string();
            let err = spec.validate().unwrap_err();
            assert_eq!(err.category(), "invalid-enum-value");
            assert!(err.to_string().contains("MANAGEMENT, WORKLOAD"));
        }

        #[test]
        fn test_cluster_type_case_insensitive_via_decode() {
            let spec: ClusterTemplateSpec =
                serde_json::from_str(r#"{"kind":"template","name":"t","clusterType":"WORKLOAD"}"#)
                    .unwrap();
            assert_eq!(spec.cluster_type, "workload");
            assert!(spec.is_workload());
        }

        #[test]
        fn test_bad_node_clone_mode() {
            let mut spec = workload_spec();
            spec.master_nodes[0].clone_mode = "shallow".to_string();
            assert_eq!(spec.validate().unwrap_err().category(), "invalid-enum-value");
        }

        #[test]
        fn test_absent_node_clone_mode_is_fine() {
            let mut spec = workload_spec();
            spec.master_nodes[0].clone_mode.clear();
            assert!(spec.validate().is_ok());
        }

        #[test]
        fn test_workload_requires_cluster_config() {
            let mut spec = workload_spec();
            spec.cluster_config = None;
            let err = spec.validate().unwrap_err();
            assert_eq!(err.category(), "cross-field-violation");
            assert!(err.to_string().contains("clusterConfig"));
        }

        #[test]
        fn test_workload_requires_cni() {
            let mut spec = workload_spec();
            spec.cluster_config.as_mut().unwrap().cni.clear();
            assert_eq!(
                spec.validate().unwrap_err().to_string(),
                "missing required field: clusterConfig.cni"
            );
        }
    }

    mod predicates {
        use super::*;

        #[test]
        fn test_role_predicates() {
            let spec = workload_spec();
            assert!(spec.is_workload());
            assert!(!spec.is_management());
        }
    }
}
