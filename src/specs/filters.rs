//! Filter models used when querying the orchestrator
//!
//! Pure data: the transport layer serializes these into query payloads; the
//! core never interprets them.

use serde::{Deserialize, Serialize};

/// Narrow a network inventory query
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFilter {
    /// Restrict to networks visible from this VIM
    #[serde(default, alias = "cloud_id", skip_serializing_if = "String::is_empty")]
    pub cloud_id: String,

    /// Restrict by segment type (e.g., DistributedVirtualPortgroup)
    #[serde(default, alias = "network_type", skip_serializing_if = "String::is_empty")]
    pub network_type: String,

    /// Restrict to a tenant scope
    #[serde(default, alias = "tenant_id", skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
}

impl NetworkFilter {
    /// Filter scoped to a single VIM
    pub fn for_cloud(cloud_id: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            ..Default::default()
        }
    }
}

/// Narrow a task-log query
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Restrict to tasks touching these entities
    #[serde(default, alias = "entity_ids", skip_serializing_if = "Vec::is_empty")]
    pub entity_ids: Vec<String>,

    /// Restrict by entity type (e.g., cluster)
    #[serde(default, alias = "entity_type", skip_serializing_if = "String::is_empty")]
    pub entity_type: String,

    /// Cap the number of returned entries; zero means no cap
    #[serde(default, alias = "max_items")]
    pub max_items: u32,
}

impl TaskFilter {
    /// Filter scoped to a single entity
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_ids: vec![entity_id.into()],
            ..Default::default()
        }
    }
}

/// Narrow a tenant inventory query
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TenantFilter {
    /// Restrict by tenant name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Restrict by orchestrator-assigned tenant id
    #[serde(default, alias = "tenant_id", skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,

    /// Restrict by VIM flavor (e.g., VC, KUBERNETES)
    #[serde(default, alias = "vim_type", skip_serializing_if = "String::is_empty")]
    pub vim_type: String,
}
