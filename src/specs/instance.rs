//! `instance` spec: instantiate a catalog-defined workload on a cluster
//!
//! Instance documents historically use snake_case keys; lower-camel-case
//! variants are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::loader::Encoding;
use super::validate::{check_kind, check_required};
use super::SpecKind;

/// Grant and rollback switches forwarded to the orchestrator
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalParams {
    /// Skip the grant phase
    #[serde(default, alias = "disable_grant")]
    pub disable_grant: bool,

    /// Proceed when the grant phase fails
    #[serde(default, alias = "ignore_grant_failure")]
    pub ignore_grant_failure: bool,

    /// Keep a failed instantiation for inspection
    #[serde(default, alias = "disable_auto_rollback")]
    pub disable_auto_rollback: bool,
}

/// Request to instantiate a catalog workload on a cluster
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InstanceSpec {
    /// Kind discriminant; must be `instance`
    #[serde(default)]
    pub kind: String,

    /// Name the instance is created under
    #[serde(default, alias = "instanceName")]
    pub instance_name: String,

    /// Catalog entry to instantiate
    #[serde(default, alias = "catalogName")]
    pub catalog_name: String,

    /// Registered VIM the instance lands on
    #[serde(default, alias = "cloudName")]
    pub cloud_name: String,

    /// Target cluster name
    #[serde(default, alias = "clusterName")]
    pub cluster_name: String,

    /// Target node pool; defaults to `default`
    #[serde(default, alias = "nodePool")]
    pub node_pool: String,

    /// Target namespace; defaults to `default`
    #[serde(default)]
    pub namespace: String,

    /// Chart repository override; when set, credentials become mandatory
    #[serde(default, alias = "repoUrl", skip_serializing_if = "String::is_empty")]
    pub repo_url: String,

    /// Repository account name
    #[serde(default, alias = "repoUsername", skip_serializing_if = "String::is_empty")]
    pub repo_username: String,

    /// Repository account secret
    #[serde(default, alias = "repoPassword", skip_serializing_if = "String::is_empty")]
    pub repo_password: String,

    /// Let the orchestrator uniquify the instance name; defaults to true
    #[serde(default = "default_auto_name", alias = "autoName")]
    pub auto_name: bool,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Grant and rollback switches; zeroed by the defaulter
    #[serde(default, alias = "additionalParams")]
    pub additional_params: AdditionalParams,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

fn default_auto_name() -> bool {
    true
}

impl Default for InstanceSpec {
    fn default() -> Self {
        Self {
            kind: String::new(),
            instance_name: String::new(),
            catalog_name: String::new(),
            cloud_name: String::new(),
            cluster_name: String::new(),
            node_pool: String::new(),
            namespace: String::new(),
            repo_url: String::new(),
            repo_username: String::new(),
            repo_password: String::new(),
            auto_name: default_auto_name(),
            description: String::new(),
            additional_params: AdditionalParams::default(),
            valid: false,
            source_encoding: None,
        }
    }
}

impl InstanceSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// Fills `node_pool` and `namespace` with `default` when unset;
    /// `auto_name` defaults to true at decode time and `additional_params`
    /// to all-false.
    pub fn apply_defaults(&mut self) {
        if self.node_pool.is_empty() {
            self.node_pool = "default".to_string();
        }
        if self.namespace.is_empty() {
            self.namespace = "default".to_string();
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

    /// Name the instance is created under
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    fn check(&self) -> Result<()> {
        check_required(&[
            ("kind", !self.kind.is_empty()),
            ("instance_name", !self.instance_name.is_empty()),
            ("catalog_name", !self.catalog_name.is_empty()),
            ("cloud_name", !self.cloud_name.is_empty()),
            ("cluster_name", !self.cluster_name.is_empty()),
        ])?;
        check_kind(SpecKind::Instance, &self.kind)?;

        if !self.repo_url.is_empty()
            && (self.repo_username.is_empty() || self.repo_password.is_empty())
        {
            return Err(Error::cross_field(
                "repo_url requires repo_username and repo_password",
            ));
        }
        Ok(())
    }
}
