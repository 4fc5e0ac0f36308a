//! `extensions` spec: register an add-on service with the platform

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::loader::Encoding;
use super::types::{AccessInfo, InterfaceInfo};
use super::validate::{check_kind, check_required, check_url};
use super::SpecKind;

/// A VIM association carried on an extension
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VimInfo {
    /// Registered VIM name
    #[serde(default, alias = "vim_name")]
    pub vim_name: String,

    /// Orchestrator-assigned VIM id
    #[serde(default, alias = "vim_id", skip_serializing_if = "String::is_empty")]
    pub vim_id: String,

    /// System UUID of the VIM
    #[serde(
        default,
        alias = "vim_system_uuid",
        skip_serializing_if = "String::is_empty"
    )]
    pub vim_system_uuid: String,
}

/// Registration request for an add-on service (e.g., a container registry)
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSpec {
    /// Kind discriminant; must be `extensions` exactly
    #[serde(default)]
    pub kind: String,

    /// Extension name
    #[serde(default)]
    pub name: String,

    /// Extension version string
    #[serde(default)]
    pub version: String,

    /// Extension type (e.g., Repository)
    #[serde(rename = "type", default)]
    pub type_: String,

    /// Product key the extension registers under
    #[serde(default, alias = "extension_key", skip_serializing_if = "String::is_empty")]
    pub extension_key: String,

    /// Optional subtype refinement
    #[serde(
        default,
        alias = "extension_subtype",
        skip_serializing_if = "String::is_empty"
    )]
    pub extension_subtype: String,

    /// VIMs this extension is associated with
    #[serde(default, alias = "vim_info", skip_serializing_if = "Vec::is_empty")]
    pub vim_info: Vec<VimInfo>,

    /// Endpoint of the extension service
    #[serde(default, alias = "interface_info", skip_serializing_if = "Option::is_none")]
    pub interface_info: Option<InterfaceInfo>,

    /// Credentials for the extension service
    #[serde(default, alias = "access_info", skip_serializing_if = "Option::is_none")]
    pub access_info: Option<AccessInfo>,

    /// Whether the platform may scale the extension automatically
    #[serde(default, alias = "auto_scale_enabled")]
    pub auto_scale_enabled: bool,

    /// Whether the platform may heal the extension automatically
    #[serde(default, alias = "auto_heal_enabled")]
    pub auto_heal_enabled: bool,

    #[serde(skip)]
    valid: bool,

    #[serde(skip)]
    source_encoding: Option<Encoding>,
}

impl ExtensionSpec {
    /// Fill optional fields with their documented defaults; idempotent
    ///
    /// Extensions carry no defaulted fields; everything meaningful is
    /// mandatory and checked by [`validate`](Self::validate).
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

    /// Associate a VIM with this extension by name
    pub fn add_vim(&mut self, name: impl Into<String>) {
        self.vim_info.push(VimInfo {
            vim_name: name.into(),
            ..Default::default()
        });
    }

    /// Look up an associated VIM by name
    pub fn get_vim(&self, name: &str) -> Result<&VimInfo> {
        self.vim_info
            .iter()
            .find(|v| v.vim_name == name)
            .ok_or_else(|| Error::not_found("vim", name))
    }

    fn check(&self) -> Result<()> {
        check_required(&[
            ("kind", !self.kind.is_empty()),
            ("name", !self.name.is_empty()),
            ("version", !self.version.is_empty()),
            ("type", !self.type_.is_empty()),
        ])?;
        check_kind(SpecKind::Extensions, &self.kind)?;

        let interface = self
            .interface_info
            .as_ref()
            .filter(|i| !i.url.is_empty())
            .ok_or_else(|| Error::missing_field("interfaceInfo.url"))?;
        check_url("interfaceInfo.url", &interface.url)?;

        if let Some(access) = &self.access_info {
            check_required(&[
                ("accessInfo.username", !access.username.is_empty()),
                ("accessInfo.password", !access.password.is_empty()),
            ])?;
        }
        Ok(())
    }
}
