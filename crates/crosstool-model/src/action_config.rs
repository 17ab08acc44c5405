//! Action configs: the tool invoked for a named action.

use serde::{Deserialize, Serialize};

use crate::feature::{FeatureSet, FlagSet};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A tool that can carry out an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    /// Filesystem path of the tool. Absent when it could not be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub with_feature: Vec<FeatureSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub execution_requirement: Vec<String>,
}

/// Configuration of a single build action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Name used to enable the config as a feature.
    pub config_name: String,
    /// Action this config applies to (e.g. "c++-compile").
    pub action_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    /// Candidate tools, first match wins.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool: Vec<Tool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flag_set: Vec<FlagSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implies: Vec<String>,
}

impl ActionConfig {
    /// An enabled config whose config name equals its action name, run by
    /// a single tool.
    pub fn for_tool(action: impl Into<String>, tool_path: Option<String>) -> Self {
        let action = action.into();
        Self {
            config_name: action.clone(),
            action_name: action,
            enabled: true,
            tool: vec![Tool {
                tool_path,
                ..Tool::default()
            }],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_tool_mirrors_action_name() {
        let ac = ActionConfig::for_tool("objcopy_embed_data", Some("/usr/bin/objcopy".into()));
        assert_eq!(ac.config_name, "objcopy_embed_data");
        assert_eq!(ac.action_name, "objcopy_embed_data");
        assert!(ac.enabled);
        assert_eq!(ac.tool.len(), 1);
        assert_eq!(ac.tool[0].tool_path.as_deref(), Some("/usr/bin/objcopy"));
    }

    #[test]
    fn for_tool_keeps_unresolved_path() {
        let ac = ActionConfig::for_tool("ld_embed_data", None);
        assert!(ac.tool[0].tool_path.is_none());
    }
}
