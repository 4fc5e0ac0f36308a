//! `provider` spec: register an infrastructure virtualization endpoint

use serde::{Deserialize, Serialize};

use crate::Result;

use super::loader::Encoding;
use super::validate::{check_kind, check_required};
use super::SpecKind;

/// Registration request for a VIM (virtualized infrastructure manager)
///
/// Credentials are carried as opaque strings and shipped to the orchestrator
/// unchanged; no format check is applied to the cloud URL beyond
/// non-emptiness.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    /// Kind discriminant; must be `provider`
    #[serde(default)]
    pub kind: String,

    /// URL of the orchestrator control plane the VIM registers with
    #[serde(default, alias = "hcx_cloud_url")]
    pub hcx_cloud_url: String,

    /// Name the VIM is registered under
    #[serde(default, alias = "vim_name")]
    pub vim_name: String,

    /// Tenant scope for the registration; may stay empty
    #[serde(default, alias = "tenant_name")]
    pub tenant_name: String,

    /// VIM account name
    #[serde(default)]
    pub username: String,

    /// VIM account secret, passed through unchanged
    #[serde(default)]
    pub password: String,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

impl ProviderSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// The only defaulted field is `tenantName`, which defaults to the empty
    /// tenant.
    pub fn apply_defaults(&mut self) {
        // tenant_name defaults to "" and may legitimately stay empty.
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
            ("hcxCloudUrl", !self.hcx_cloud_url.is_empty()),
            ("vimName", !self.vim_name.is_empty()),
            ("username", !self.username.is_empty()),
            ("password", !self.password.is_empty()),
            ("kind", !self.kind.is_empty()),
        ])?;
        check_kind(SpecKind::Provider, &self.kind)?;
        Ok(())
    }
}
