//! Shared value types embedded in the larger request specs
//!
//! These are pure data: loaders populate them, the per-kind validators walk
//! them. Document keys are lower-camel-case with snake_case aliases where the
//! shapes declare one.

use serde::{Deserialize, Serialize};

use super::validate::de_lowercase;
use super::{CSI_NFS_CLIENT, CSI_VSPHERE};

/// A network attachment for a node
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// Logical label for the attachment (e.g., MANAGEMENT)
    #[serde(default)]
    pub label: String,

    /// Name of the backing network segment
    #[serde(default, alias = "network_name")]
    pub network_name: String,

    /// Optional nameservers pushed to the node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
}

/// A placement constraint for node or cluster scheduling
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementParam {
    /// Placement target type (ClusterComputeResource, Datastore, ResourcePool, ...)
    #[serde(rename = "type", default)]
    pub type_: String,

    /// Name of the placement target
    #[serde(default)]
    pub name: String,
}

/// A CNI plug-in declaration inside a cluster or template configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CniSpec {
    /// Plug-in name (e.g., antrea, calico)
    #[serde(default)]
    pub name: String,

    /// Opaque plug-in properties, passed through unmodified
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
}

/// A CSI driver declaration inside a cluster or template configuration
///
/// The driver name is canonicalized to lowercase at decode time.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CsiSpec {
    /// Driver name; the closed set is `nfs_client` and `vsphere-csi`
    #[serde(default, deserialize_with = "de_lowercase")]
    pub name: String,

    /// Opaque driver properties, passed through unmodified
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
}

impl CsiSpec {
    /// True if this entry declares the vSphere CSI driver
    pub fn is_vsphere_csi(&self) -> bool {
        self.name.eq_ignore_ascii_case(CSI_VSPHERE)
    }

    /// True if this entry declares the NFS provisioner
    pub fn is_nfs_csi(&self) -> bool {
        self.name.eq_ignore_ascii_case(CSI_NFS_CLIENT)
    }
}

/// Endpoint description for an external service
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    /// Endpoint URL
    #[serde(default)]
    pub url: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// PEM or base64 certificate trusted for the endpoint, passed through
    /// unchanged
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trusted_certificate: String,
}

/// Credentials for an external service
///
/// Carried as opaque strings; base64 payloads pass through unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    /// Account name
    #[serde(default)]
    pub username: String,

    /// Account secret
    #[serde(default)]
    pub password: String,
}

/// A reusable node shape inside a cluster template
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    /// Node group name
    #[serde(default)]
    pub name: String,

    /// vCPU count per replica
    #[serde(default)]
    pub cpu: u32,

    /// Memory per replica, in MiB
    #[serde(default)]
    pub memory: u64,

    /// Disk per replica, in GiB
    #[serde(default)]
    pub storage: u64,

    /// Number of replicas
    #[serde(default)]
    pub replica: u32,

    /// Node labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Network attachments, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkSpec>,

    /// Placement constraints, in declaration order
    #[serde(default, alias = "placement_params", skip_serializing_if = "Vec::is_empty")]
    pub placement_params: Vec<PlacementParam>,

    /// Clone mode; canonicalized to lowercase at decode time
    #[serde(default, alias = "clone_mode", deserialize_with = "de_lowercase")]
    pub clone_mode: String,

    /// Opaque per-node configuration, passed through unmodified
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod csi {
        use super::*;

        #[test]
        fn test_name_canonicalized_on_decode() {
            let csi: CsiSpec = serde_json::from_str(r#"{"name":"VSphere-CSI"}"#).unwrap();
            assert_eq!(csi.name, "vsphere-csi");
            assert!(csi.is_vsphere_csi());
            assert!(!csi.is_nfs_csi());
        }

        #[test]
        fn test_nfs_predicate_ignores_case() {
            let csi = CsiSpec {
                name: "NFS_Client".to_string(),
                properties: serde_json::Value::Null,
            };
            assert!(csi.is_nfs_csi());
        }
    }

    mod network {
        use super::*;

        #[test]
        fn test_accepts_snake_case_alias() {
            let net: NetworkSpec =
                serde_json::from_str(r#"{"label":"MANAGEMENT","network_name":"vlan-107"}"#)
                    .unwrap();
            assert_eq!(net.network_name, "vlan-107");
        }

        #[test]
        fn test_accepts_camel_case() {
            let net: NetworkSpec =
                serde_json::from_str(r#"{"label":"MANAGEMENT","networkName":"vlan-107"}"#)
                    .unwrap();
            assert_eq!(net.network_name, "vlan-107");
        }
    }

    mod node_template {
        use super::*;

        #[test]
        fn test_clone_mode_canonicalized() {
            let node: NodeTemplate =
                serde_json::from_str(r#"{"name":"master","cloneMode":"FullClone"}"#).unwrap();
            assert_eq!(node.clone_mode, "fullclone");
        }

        #[test]
        fn test_absent_fields_decode_to_zero_values() {
            let node: NodeTemplate = serde_json::from_str(r#"{"name":"worker"}"#).unwrap();
            assert_eq!(node.cpu, 0);
            assert!(node.networks.is_empty());
            assert!(node.clone_mode.is_empty());
        }
    }

    mod placement {
        use super::*;

        #[test]
        fn test_type_key_roundtrip() {
            let p = PlacementParam {
                type_: "Datastore".to_string(),
                name: "vsanDatastore".to_string(),
            };
            let json = serde_json::to_string(&p).unwrap();
            assert!(json.contains(r#""type":"Datastore""#));
            let parsed: PlacementParam = serde_json::from_str(&json).unwrap();
            assert_eq!(p, parsed);
        }
    }

    mod access_info {
        use super::*;

        #[test]
        fn test_base64_passes_through() {
            let info: AccessInfo = serde_json::from_str(
                r#"{"username":"YWRtaW4=","password":"Vk13YXJlMSE="}"#,
            )
            .unwrap();
            assert_eq!(info.username, "YWRtaW4=");
            assert_eq!(info.password, "Vk13YXJlMSE=");
        }
    }
}
