//! Lifecycle-management payloads sent to the orchestrator
//!
//! Pure data produced downstream of spec validation; this core never
//! validates them. The instantiate payload can be derived from a validated
//! [`InstanceSpec`](super::InstanceSpec).

use serde::{Deserialize, Serialize};

use super::instance::{AdditionalParams, InstanceSpec};

/// Instantiate a catalog workload on a cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstantiateRequest {
    /// Target VIM name
    #[serde(default)]
    pub cloud_name: String,

    /// Target cluster name
    #[serde(default)]
    pub cluster_name: String,

    /// Target node pool
    #[serde(default)]
    pub node_pool: String,

    /// Target namespace
    #[serde(default)]
    pub namespace: String,

    /// Chart repository override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo_url: String,

    /// Repository account name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Repository account secret
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Grant and rollback switches
    #[serde(default)]
    pub additional_params: AdditionalParams,
}

impl From<&InstanceSpec> for InstantiateRequest {
    fn from(spec: &InstanceSpec) -> Self {
        Self {
            cloud_name: spec.cloud_name.clone(),
            cluster_name: spec.cluster_name.clone(),
            node_pool: spec.node_pool.clone(),
            namespace: spec.namespace.clone(),
            repo_url: spec.repo_url.clone(),
            username: spec.repo_username.clone(),
            password: spec.repo_password.clone(),
            additional_params: spec.additional_params.clone(),
        }
    }
}

/// Scale an instantiated workload out (or in) by whole steps
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleRequest {
    /// Scaling direction, `SCALE_OUT` or `SCALE_IN`
    #[serde(rename = "type", default)]
    pub type_: String,

    /// Scaling aspect declared by the workload descriptor
    #[serde(default)]
    pub aspect_id: String,

    /// Number of scale steps to apply
    #[serde(default)]
    pub number_of_steps: u32,
}

impl ScaleRequest {
    /// Scale-out request for the given aspect
    pub fn scale_out(aspect_id: impl Into<String>, steps: u32) -> Self {
        Self {
            type_: "SCALE_OUT".to_string(),
            aspect_id: aspect_id.into(),
            number_of_steps: steps,
        }
    }
}

/// Terminate an instantiated workload
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TerminateRequest {
    /// `GRACEFUL` or `FORCEFUL`
    #[serde(default = "TerminateRequest::default_type")]
    pub termination_type: String,

    /// Seconds to wait for graceful shutdown before forcing
    #[serde(default)]
    pub graceful_termination_timeout: u32,
}

impl TerminateRequest {
    fn default_type() -> String {
        "GRACEFUL".to_string()
    }
}

impl Default for TerminateRequest {
    fn default() -> Self {
        Self {
            termination_type: Self::default_type(),
            graceful_termination_timeout: 0,
        }
    }
}

/// Reconfigure an instantiated workload in place
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconfigureRequest {
    /// Workload properties to change, passed through unmodified
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub vnf_configurable_properties: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_from_instance_spec() {
        let mut spec = InstanceSpec::default();
        spec.kind = "instance".to_string();
        spec.instance_name = "dns".to_string();
        spec.catalog_name = "unit_test".to_string();
        spec.cloud_name = "edge".to_string();
        spec.cluster_name = "hubsite".to_string();
        spec.apply_defaults();
        let req = InstantiateRequest::from(&spec);
        assert_eq!(req.cloud_name, "edge");
        assert_eq!(req.node_pool, "default");
        assert_eq!(req.namespace, "default");
        assert!(req.repo_url.is_empty());
    }

    #[test]
    fn test_scale_out_constructor() {
        let req = ScaleRequest::scale_out("worker", 2);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""type":"SCALE_OUT""#));
        assert!(json.contains(r#""numberOfSteps":2"#));
    }

    #[test]
    fn test_terminate_defaults_graceful() {
        let req = TerminateRequest::default();
        assert_eq!(req.termination_type, "GRACEFUL");
        let parsed: TerminateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, req);
    }
}
