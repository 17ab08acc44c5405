//! The document root: a release containing zero or more toolchains.

use serde::{Deserialize, Serialize};

use crate::toolchain::Toolchain;

/// Legacy mapping from a target CPU to the toolchain selected for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultCpuToolchain {
    pub cpu: String,
    pub toolchain_identifier: String,
}

/// A complete toolchain configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosstoolRelease {
    pub major_version: String,
    pub minor_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_cpu: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_toolchain: Vec<DefaultCpuToolchain>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toolchain: Vec<Toolchain>,
}

impl CrosstoolRelease {
    /// Look up a toolchain by identifier.
    pub fn toolchain(&self, identifier: &str) -> Option<&Toolchain> {
        self.toolchain
            .iter()
            .find(|t| t.toolchain_identifier == identifier)
    }
}
