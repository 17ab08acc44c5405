//! Migration pipeline orchestrator.

use crosstool_model::{CrosstoolRelease, Feature, Toolchain};
use tracing::{debug, info, warn};

use crate::assemble::{append_feature, append_marker_if_absent, prepend_feature};
use crate::classify::{classify, Category, Classification};
use crate::normalize::normalize_toolchain;
use crate::prune::{prune_default_toolchains, prune_legacy_fields};
use crate::report::{MigrationReport, ToolchainReport};
use crate::synthesize::{
    aggregate, compile_flag_sets, embed_flags, link_flag_sets, per_object_debug_info_feature,
    reconcile_unfiltered, sysroot_feature, unfiltered_compile_flags_feature,
    user_compile_flags_feature, EmbedTool, Synthesis,
};

/// Migrate a whole document in place.
///
/// Drops the default toolchain table, then migrates each toolchain
/// independently. Running it again on its own output changes nothing.
pub fn migrate(release: &mut CrosstoolRelease) -> MigrationReport {
    let default_toolchains_cleared = prune_default_toolchains(release);
    let toolchains = release
        .toolchain
        .iter_mut()
        .map(migrate_toolchain)
        .collect();

    MigrationReport {
        default_toolchains_cleared,
        toolchains,
    }
}

/// Migrate one toolchain in place:
/// normalize -> each category in [`Category::ORDER`] -> prune.
pub fn migrate_toolchain(toolchain: &mut Toolchain) -> ToolchainReport {
    let _span = tracing::info_span!("toolchain", id = %toolchain.toolchain_identifier).entered();
    let mut report = ToolchainReport::new(toolchain.toolchain_identifier.clone());

    report.flag_sets_normalized = normalize_toolchain(toolchain);

    for category in Category::ORDER {
        match classify(toolchain, category) {
            Classification::Absent => {}
            Classification::AlreadyMigrated => {
                debug!(feature = category.feature_name(), "already migrated, skipping");
                report.skipped.push(category);
            }
            Classification::Pending | Classification::Reconcile => {
                apply(toolchain, category, &mut report);
            }
        }
    }

    report.fields_cleared = prune_legacy_fields(toolchain);

    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!("{}", report.summary());
    report
}

fn apply(toolchain: &mut Toolchain, category: Category, report: &mut ToolchainReport) {
    match category {
        Category::DynamicLinker
        | Category::StartEndLib
        | Category::InterfaceSharedLibraries
        | Category::EmbeddedRuntimes
        | Category::Pic => add_marker(toolchain, category.feature_name(), true, report),
        Category::PerObjectDebugInfo => {
            add_appended(toolchain, per_object_debug_info_feature(), report);
        }
        Category::ObjcopyEmbedFlags => add_embed(toolchain, EmbedTool::Objcopy, report),
        Category::LdEmbedFlags => add_embed(toolchain, EmbedTool::Ld, report),
        Category::LinkFlags => {
            let synthesis = link_flag_sets(toolchain);
            add_aggregator(toolchain, category, synthesis, report);
        }
        Category::CompileFlags => {
            let synthesis = compile_flag_sets(toolchain);
            add_aggregator(toolchain, category, synthesis, report);
        }
        Category::UnfilteredCompileFlags => add_unfiltered(toolchain, report),
    }
}

fn add_marker(toolchain: &mut Toolchain, name: &str, enabled: bool, report: &mut ToolchainReport) {
    if append_marker_if_absent(toolchain, name, enabled) {
        debug!(feature = name, "added marker feature");
        report.features_added.push(name.to_string());
    }
}

fn add_appended(toolchain: &mut Toolchain, feature: Feature, report: &mut ToolchainReport) {
    debug!(feature = %feature.name, "added feature");
    report.features_added.push(feature.name.clone());
    append_feature(toolchain, feature);
}

fn add_embed(toolchain: &mut Toolchain, tool: EmbedTool, report: &mut ToolchainReport) {
    let migration = embed_flags(toolchain, tool);
    add_appended(toolchain, migration.feature, report);
    report
        .action_configs_added
        .push(migration.action_config.action_name.clone());
    toolchain.action_config.push(migration.action_config);
    report.warnings.extend(migration.warning);
}

/// Condition features first (appended, disabled), then the aggregator at
/// the front of the feature list.
fn add_aggregator(
    toolchain: &mut Toolchain,
    category: Category,
    synthesis: Synthesis,
    report: &mut ToolchainReport,
) {
    report.warnings.extend(synthesis.warnings);
    if synthesis.flag_sets.is_empty() {
        return;
    }
    for name in &synthesis.condition_features {
        add_marker(toolchain, name, false, report);
    }

    let name = category.feature_name();
    debug!(
        feature = name,
        flag_sets = synthesis.flag_sets.len(),
        "prepended aggregator feature"
    );
    prepend_feature(toolchain, aggregate(name, synthesis.flag_sets));
    report.features_added.push(name.to_string());
}

fn add_unfiltered(toolchain: &mut Toolchain, report: &mut ToolchainReport) {
    let name = Category::UnfilteredCompileFlags.feature_name();
    let flags = toolchain.unfiltered_cxx_flag.clone();

    if let Some(existing) = toolchain.feature_mut(name) {
        let rewritten = reconcile_unfiltered(existing, &flags);
        debug!(feature = name, groups = rewritten, "reconciled unfiltered flags");
        if rewritten > 0 {
            report.features_rewritten.push(name.to_string());
        }
        return;
    }

    if !toolchain.has_feature("user_compile_flags") {
        let feature = user_compile_flags_feature(toolchain);
        add_appended(toolchain, feature, report);
    }
    if !toolchain.has_feature("sysroot") {
        let feature = sysroot_feature(toolchain);
        add_appended(toolchain, feature, report);
    }
    let feature = unfiltered_compile_flags_feature(toolchain);
    add_appended(toolchain, feature, report);
}
