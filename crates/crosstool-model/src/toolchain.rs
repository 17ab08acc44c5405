//! Toolchain records.
//!
//! A toolchain carries both the feature model (`feature`, `action_config`)
//! and the legacy fields that predate it. The legacy fields are kept so that
//! older documents load; the migration engine moves their behavior into
//! features and clears them.

use serde::{Deserialize, Serialize};

use crate::action_config::ActionConfig;
use crate::feature::Feature;
use crate::mode::{CompilationMode, LinkingMode};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Named tool location (e.g. `objcopy` -> `/usr/bin/objcopy`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPath {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakeVariable {
    pub name: String,
    pub value: String,
}

/// Output file naming for an artifact category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNamePattern {
    pub category_name: String,
    pub prefix: String,
    pub extension: String,
}

/// Legacy flags applied only in one compilation mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationModeFlags {
    pub mode: CompilationMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiler_flag: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cxx_flag: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linker_flag: Vec<String>,
}

/// Legacy linker flags applied only in one linking mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingModeFlags {
    pub mode: LinkingMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linker_flag: Vec<String>,
}

/// One toolchain record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub toolchain_identifier: String,
    pub host_system_name: String,
    pub target_system_name: String,
    pub target_cpu: String,
    pub target_libc: String,
    pub compiler: String,
    pub abi_version: String,
    pub abi_libc_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_sysroot: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cxx_builtin_include_directory: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_path: Vec<ToolPath>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub make_variable: Vec<MakeVariable>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifact_name_pattern: Vec<ArtifactNamePattern>,

    /// Features in command-line order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feature: Vec<Feature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action_config: Vec<ActionConfig>,

    // Legacy flag lists.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compiler_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cxx_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linker_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dynamic_library_linker_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_only_linker_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unfiltered_cxx_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objcopy_embed_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ld_embed_flag: Vec<String>,

    // Legacy capability flags.
    #[serde(skip_serializing_if = "is_false")]
    pub supports_start_end_lib: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_interface_shared_objects: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_embedded_runtimes: bool,
    #[serde(rename = "needsPic", alias = "needs_pic", skip_serializing_if = "is_false")]
    pub needs_pic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_fission: bool,

    // Legacy per-mode tables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compilation_mode_flags: Vec<CompilationModeFlags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linking_mode_flags: Vec<LinkingModeFlags>,

    // Retired fields with no feature equivalent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub debian_extra_requires: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gcc_plugin_compiler_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ar_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ar_thin_archives_flag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gcc_plugin_header_directory: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mao_plugin_header_directory: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_normalizing_ar: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_thin_archives: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_incremental_linker: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_dsym: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub supports_gold_linker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_python_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_python_version: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub python_preload_swigdeps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_runtimes_filegroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_runtimes_filegroup: Option<String>,
}

impl Toolchain {
    /// Create an empty toolchain with the given identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            toolchain_identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Whether a feature with this name exists.
    pub fn has_feature(&self, name: &str) -> bool {
        self.feature.iter().any(|f| f.name == name)
    }

    /// Look up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.feature.iter().find(|f| f.name == name)
    }

    /// Look up a feature by name for modification.
    pub fn feature_mut(&mut self, name: &str) -> Option<&mut Feature> {
        self.feature.iter_mut().find(|f| f.name == name)
    }

    /// Whether an action config for `action_name` exists.
    pub fn has_action_config(&self, action_name: &str) -> bool {
        self.action_config
            .iter()
            .any(|ac| ac.action_name == action_name)
    }

    /// Path registered for the named tool.
    pub fn tool_path(&self, tool_name: &str) -> Option<&str> {
        self.tool_path
            .iter()
            .find(|t| t.name == tool_name)
            .map(|t| t.path.as_str())
    }
}
