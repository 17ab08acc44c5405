//! Migration report aggregating what each toolchain pass did.

use std::fmt;

use crate::classify::Category;

/// A soft spot hit during migration. The migration still completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationWarning {
    /// An embed-tool action config was created without a tool path because
    /// the tool is not in the toolchain's tool-path table.
    UnresolvedTool { tool: String, action: String },
    /// Linker flags for a linking mode with no feature name were dropped.
    UnknownLinkingMode { flags: Vec<String> },
    /// Linker flags for a linking mode whose feature the toolchain already
    /// declares were dropped.
    LinkingModeDeclared { feature: String, flags: Vec<String> },
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationWarning::UnresolvedTool { tool, action } => write!(
                f,
                "no tool_path for '{tool}'; action config '{action}' has no tool path"
            ),
            MigrationWarning::UnknownLinkingMode { flags } => write!(
                f,
                "dropped linker flags for unknown linking mode: {}",
                flags.join(" ")
            ),
            MigrationWarning::LinkingModeDeclared { feature, flags } => write!(
                f,
                "dropped linker flags for '{feature}', already declared as a feature: {}",
                flags.join(" ")
            ),
        }
    }
}

/// What the migration did to one toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainReport {
    /// Toolchain identifier.
    pub toolchain: String,
    /// Features added, in insertion order.
    pub features_added: Vec<String>,
    /// Existing features rewritten in place.
    pub features_rewritten: Vec<String>,
    /// Action configs added.
    pub action_configs_added: Vec<String>,
    /// Categories with legacy data whose target feature already existed.
    pub skipped: Vec<Category>,
    /// Flag sets whose availability condition was pushed into flag groups.
    pub flag_sets_normalized: usize,
    /// Legacy fields that held data and were cleared.
    pub fields_cleared: Vec<&'static str>,
    pub warnings: Vec<MigrationWarning>,
}

impl ToolchainReport {
    pub fn new(toolchain: impl Into<String>) -> Self {
        Self {
            toolchain: toolchain.into(),
            ..Self::default()
        }
    }

    /// Whether the pass left the toolchain untouched.
    pub fn is_noop(&self) -> bool {
        self.features_added.is_empty()
            && self.features_rewritten.is_empty()
            && self.action_configs_added.is_empty()
            && self.flag_sets_normalized == 0
            && self.fields_cleared.is_empty()
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        if self.is_noop() {
            return format!("{}: already migrated", self.toolchain);
        }
        format!(
            "{}: +{} features, {} rewritten, +{} action configs, {} fields cleared",
            self.toolchain,
            self.features_added.len(),
            self.features_rewritten.len(),
            self.action_configs_added.len(),
            self.fields_cleared.len(),
        )
    }
}

/// Summary report of a whole-document migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Whether the document-level default toolchain table was dropped.
    pub default_toolchains_cleared: bool,
    pub toolchains: Vec<ToolchainReport>,
}

impl MigrationReport {
    /// Whether the migration changed nothing.
    pub fn is_noop(&self) -> bool {
        !self.default_toolchains_cleared && self.toolchains.iter().all(ToolchainReport::is_noop)
    }

    /// Every warning, paired with its toolchain identifier.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &MigrationWarning)> {
        self.toolchains.iter().flat_map(|t| {
            t.warnings
                .iter()
                .map(move |w| (t.toolchain.as_str(), w))
        })
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Migration Report ===")?;
        writeln!(f, "Toolchains: {}", self.toolchains.len())?;
        if self.default_toolchains_cleared {
            writeln!(f, "Cleared default_toolchain table")?;
        }

        for tc in &self.toolchains {
            writeln!(f)?;
            writeln!(f, "--- {} ---", tc.toolchain)?;
            if tc.is_noop() {
                writeln!(f, "  No changes")?;
                continue;
            }
            if !tc.features_added.is_empty() {
                writeln!(f, "  Features added: {}", tc.features_added.join(", "))?;
            }
            if !tc.features_rewritten.is_empty() {
                writeln!(f, "  Features rewritten: {}", tc.features_rewritten.join(", "))?;
            }
            if !tc.action_configs_added.is_empty() {
                writeln!(
                    f,
                    "  Action configs added: {}",
                    tc.action_configs_added.join(", ")
                )?;
            }
            if !tc.skipped.is_empty() {
                let skipped: Vec<_> = tc.skipped.iter().map(|c| c.feature_name()).collect();
                writeln!(f, "  Already migrated: {}", skipped.join(", "))?;
            }
            if tc.flag_sets_normalized > 0 {
                writeln!(f, "  Flag sets normalized: {}", tc.flag_sets_normalized)?;
            }
            if !tc.fields_cleared.is_empty() {
                writeln!(f, "  Fields cleared: {}", tc.fields_cleared.join(", "))?;
            }
            for warning in &tc.warnings {
                writeln!(f, "  warning: {warning}")?;
            }
        }

        Ok(())
    }
}
