//! `cluster` spec: request creation of a management or workload cluster

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::loader::Encoding;
use super::types::{CniSpec, CsiSpec, NetworkSpec, PlacementParam};
use super::validate::{check_cluster_type, check_ip, check_kind, check_required, de_lowercase};
use super::{SpecKind, CLUSTER_TYPE_MANAGEMENT, CLUSTER_TYPE_WORKLOAD, CSI_NAMES_ALLOWED};

/// A node group inside a cluster-creation request
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNode {
    /// Node group name
    #[serde(default)]
    pub name: String,

    /// Network attachments, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkSpec>,

    /// Placement constraints, in declaration order
    #[serde(default, alias = "placement_params", skip_serializing_if = "Vec::is_empty")]
    pub placement_params: Vec<PlacementParam>,
}

/// Add-on configuration carried on a cluster-creation request
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// CSI drivers; each name must lie in the closed set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub csi: Vec<CsiSpec>,

    /// CNI plug-ins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cni: Vec<CniSpec>,
}

/// Request to create a management or workload cluster from a template
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Kind discriminant; must be `cluster`
    #[serde(default)]
    pub kind: String,

    /// Cluster name
    #[serde(default)]
    pub name: String,

    /// Password for the cluster admin account, passed through unchanged
    #[serde(default, alias = "cluster_password")]
    pub cluster_password: String,

    /// Id of the template the cluster instantiates
    #[serde(default, alias = "cluster_template_id")]
    pub cluster_template_id: String,

    /// Cluster role; canonicalized to lowercase at decode time. The closed
    /// set is `management` and `workload`.
    #[serde(
        default,
        alias = "cluster_type",
        deserialize_with = "de_lowercase"
    )]
    pub cluster_type: String,

    /// URL of the orchestrator control plane
    #[serde(default, alias = "hcx_cloud_url")]
    pub hcx_cloud_url: String,

    /// Virtual IP of the cluster API endpoint; IPv4 or IPv6 literal
    #[serde(rename = "endpointIP", alias = "endpoint_ip", alias = "endpointIp", default)]
    pub endpoint_ip: String,

    /// Name of the VM template nodes clone from
    #[serde(default, alias = "vm_template")]
    pub vm_template: String,

    /// Owning management cluster; mandatory for workload clusters
    #[serde(
        default,
        alias = "management_cluster_id",
        skip_serializing_if = "String::is_empty"
    )]
    pub management_cluster_id: String,

    /// Master node groups
    #[serde(default, alias = "master_nodes", skip_serializing_if = "Vec::is_empty")]
    pub master_nodes: Vec<ClusterNode>,

    /// Worker node groups
    #[serde(default, alias = "worker_nodes", skip_serializing_if = "Vec::is_empty")]
    pub worker_nodes: Vec<ClusterNode>,

    /// Cluster-level placement constraints
    #[serde(default, alias = "placement_params", skip_serializing_if = "Vec::is_empty")]
    pub placement_params: Vec<PlacementParam>,

    /// Add-on configuration; mandatory for workload clusters
    #[serde(default, alias = "cluster_config", skip_serializing_if = "Option::is_none")]
    pub cluster_config: Option<ClusterConfig>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Site or datacenter label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

impl ClusterSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// Clusters carry no defaulted scalar fields.
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

    /// Rename the cluster before dispatch
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// True if this request creates a management cluster
    pub fn is_management(&self) -> bool {
        self.cluster_type.eq_ignore_ascii_case(CLUSTER_TYPE_MANAGEMENT)
    }

    /// True if this request creates a workload cluster
    pub fn is_workload(&self) -> bool {
        self.cluster_type.eq_ignore_ascii_case(CLUSTER_TYPE_WORKLOAD)
    }

    /// Linear scan of the selected node-group list for a name match
    ///
    /// `worker` selects the worker list; otherwise masters are searched.
    pub fn find_node_pool_by_name(&self, name: &str, worker: bool) -> bool {
        let list = if worker {
            &self.worker_nodes
        } else {
            &self.master_nodes
        };
        list.iter().any(|n| n.name == name)
    }

    fn check(&self) -> Result<()> {
        check_required(&[
            ("kind", !self.kind.is_empty()),
            ("name", !self.name.is_empty()),
            ("clusterPassword", !self.cluster_password.is_empty()),
            ("clusterTemplateId", !self.cluster_template_id.is_empty()),
            ("clusterType", !self.cluster_type.is_empty()),
            ("hcxCloudUrl", !self.hcx_cloud_url.is_empty()),
            ("endpointIP", !self.endpoint_ip.is_empty()),
            ("vmTemplate", !self.vm_template.is_empty()),
            ("masterNodes", !self.master_nodes.is_empty()),
            ("workerNodes", !self.worker_nodes.is_empty()),
            ("placementParams", !self.placement_params.is_empty()),
        ])?;
        check_kind(SpecKind::Cluster, &self.kind)?;
        check_ip("endpointIP", &self.endpoint_ip)?;

        for (list_name, nodes) in [
            ("masterNodes", &self.master_nodes),
            ("workerNodes", &self.worker_nodes),
        ] {
            for node in nodes.iter() {
                check_node(list_name, node)?;
            }
        }

        if self.is_workload() {
            if self.management_cluster_id.is_empty() {
                return Err(Error::cross_field(
                    "workload cluster requires ManagementClusterId",
                ));
            }
            let config = self
                .cluster_config
                .as_ref()
                .ok_or_else(|| Error::cross_field("workload cluster requires clusterConfig"))?;
            for csi in &config.csi {
                if !csi.is_nfs_csi() && !csi.is_vsphere_csi() {
                    return Err(Error::invalid_enum("clusterConfig.csi.name", CSI_NAMES_ALLOWED));
                }
            }
        }

        check_cluster_type(&self.cluster_type)?;
        Ok(())
    }
}

/// Per-node rules shared by the master and worker lists
fn check_node(list_name: &'static str, node: &ClusterNode) -> Result<()> {
    if node.placement_params.is_empty() {
        return Err(Error::cross_field(format!(
            "{list_name}: node {:?} has no placementParams",
            node.name
        )));
    }
    if node.name.is_empty() {
        return Err(Error::missing_field(format!("{list_name}.name")));
    }
    if node.networks.is_empty() {
        return Err(Error::cross_field(format!(
            "{list_name}: node {:?} has no networks",
            node.name
        )));
    }
    for network in &node.networks {
        if network.label.is_empty() {
            return Err(Error::missing_field(format!("{list_name}.networks.label")));
        }
        if network.network_name.is_empty() {
            return Err(Error::missing_field(format!(
                "{list_name}.networks.networkName"
            )));
        }
    }
    Ok(())
}
