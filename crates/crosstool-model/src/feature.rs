//! Feature model records.
//!
//! A feature bundles flag sets; a flag set scopes flag groups to a set of
//! actions and, optionally, to other enabled features; a flag group is the
//! smallest unit of conditional flag emission.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A conjunction of feature conditions.
///
/// Satisfied when every feature in `feature` is enabled and none in
/// `not_feature` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Features that must all be enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feature: Vec<String>,
    /// Features that must all be disabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub not_feature: Vec<String>,
}

impl FeatureSet {
    /// A condition requiring exactly one feature.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            feature: vec![name.into()],
            not_feature: Vec::new(),
        }
    }
}

/// The smallest unit of conditional flag emission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagGroup {
    /// Flags in emission order; may contain `%{variable}` placeholders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flag: Vec<String>,
    /// Variable the group repeats over, once per element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterate_over: Option<String>,
    /// The group is suppressed unless all of these variables are bound.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub expand_if_all_available: BTreeSet<String>,
    /// The group is suppressed if any of these variables is bound.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub expand_if_none_available: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_if_true: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_if_false: Option<String>,
}

impl FlagGroup {
    /// A group emitting `flags` unconditionally.
    pub fn with_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flag: flags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Gate this group on `variable` being bound.
    pub fn expand_if_available(mut self, variable: impl Into<String>) -> Self {
        self.expand_if_all_available.insert(variable.into());
        self
    }

    /// Repeat this group once per element of `variable`.
    pub fn iterating_over(mut self, variable: impl Into<String>) -> Self {
        self.iterate_over = Some(variable.into());
        self
    }
}

/// Flag groups scoped to a set of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    /// Action names this flag set applies to, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action: Vec<String>,
    /// Disjunction of feature conjunctions gating this flag set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub with_feature: Vec<FeatureSet>,
    /// Flag-set level variable gating. Only found on legacy input; pushed
    /// down into the flag groups by the migration engine.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub expand_if_all_available: BTreeSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flag_group: Vec<FlagGroup>,
}

impl FlagSet {
    /// An unconditional flag set over `actions`.
    pub fn for_actions<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action: actions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Require `feature` to be enabled for this flag set to apply.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.with_feature.push(FeatureSet::single(feature));
        self
    }

    /// Append a flag group.
    pub fn with_group(mut self, group: FlagGroup) -> Self {
        self.flag_group.push(group);
        self
    }
}

/// One environment variable assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

/// Environment variables set for a group of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_entry: Vec<EnvEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub with_feature: Vec<FeatureSet>,
}

/// A named, independently enabled bundle of flag sets.
///
/// Feature order within a toolchain is the order flags appear on the
/// command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    /// Unique within a toolchain.
    pub name: String,
    /// Enabled by default.
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flag_set: Vec<FlagSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_set: Vec<EnvSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<FeatureSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,
}

impl Feature {
    /// A disabled feature with no flag sets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An enabled feature with no flag sets.
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            ..Self::default()
        }
    }

    /// Append a flag set.
    pub fn with_flag_set(mut self, flag_set: FlagSet) -> Self {
        self.flag_set.push(flag_set);
        self
    }

    /// Whether this feature carries no flag sets.
    pub fn is_marker(&self) -> bool {
        self.flag_set.is_empty()
    }
}
