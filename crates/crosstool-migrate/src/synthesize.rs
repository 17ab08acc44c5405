//! Flag-set synthesizer.
//!
//! Turns each class of legacy field into flag sets, or into whole features
//! for the categories that map onto a fixed feature shape. Nothing here
//! mutates the toolchain; placement is the assembler's job.

use std::collections::BTreeSet;

use crosstool_model::{ActionConfig, CompilationMode, Feature, FlagGroup, FlagSet, Toolchain};

use crate::actions::{
    compile_actions, cxx_compile_actions, dynamic_library_link_actions, link_actions,
    LD_EMBED_DATA, OBJCOPY_EMBED_DATA, PER_OBJECT_DEBUG_INFO_ACTIONS,
};
use crate::report::MigrationWarning;

/// Feature gating flags that only apply when linking tests.
pub const IS_CC_TEST: &str = "is_cc_test";

/// One (condition, actions, flags) tuple destined for an aggregator feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedFlagSet {
    /// Feature that must be enabled, if any.
    pub with_feature: Option<String>,
    pub actions: Vec<String>,
    pub flags: Vec<String>,
    pub expand_if_all_available: BTreeSet<String>,
}

impl SynthesizedFlagSet {
    fn new(with_feature: Option<&str>, actions: Vec<String>, flags: &[String]) -> Self {
        Self {
            with_feature: with_feature.map(str::to_string),
            actions,
            flags: flags.to_vec(),
            expand_if_all_available: BTreeSet::new(),
        }
    }

    /// Convert into a flag set holding a single flag group.
    pub fn into_flag_set(self) -> FlagSet {
        let mut flag_set = FlagSet::for_actions(self.actions);
        if let Some(feature) = self.with_feature {
            flag_set = flag_set.with_feature(feature);
        }
        let mut group = FlagGroup::with_flags(self.flags);
        group.expand_if_all_available = self.expand_if_all_available;
        flag_set.with_group(group)
    }
}

/// Flag sets for one aggregator feature, plus the features they are
/// conditioned on.
#[derive(Debug, Default)]
pub struct Synthesis {
    pub flag_sets: Vec<SynthesizedFlagSet>,
    /// Features referenced by `with_feature`, in first-use order.
    pub condition_features: Vec<String>,
    pub warnings: Vec<MigrationWarning>,
}

impl Synthesis {
    fn push(&mut self, flag_set: SynthesizedFlagSet) {
        if let Some(feature) = &flag_set.with_feature {
            if !self.condition_features.contains(feature) {
                self.condition_features.push(feature.clone());
            }
        }
        self.flag_sets.push(flag_set);
    }

    pub fn is_empty(&self) -> bool {
        self.flag_sets.is_empty()
    }
}

/// Flag sets for `default_compile_flags`.
///
/// Order: `compiler_flag`, `cxx_flag`, then per compilation mode its
/// compiler and C++ flags. Coverage mode is skipped.
pub fn compile_flag_sets(toolchain: &Toolchain) -> Synthesis {
    let mut synthesis = Synthesis::default();
    let compile = compile_actions(toolchain);
    let cxx_compile = cxx_compile_actions(toolchain);

    if !toolchain.compiler_flag.is_empty() {
        synthesis.push(SynthesizedFlagSet::new(
            None,
            compile.clone(),
            &toolchain.compiler_flag,
        ));
    }
    if !toolchain.cxx_flag.is_empty() {
        synthesis.push(SynthesizedFlagSet::new(
            None,
            cxx_compile.clone(),
            &toolchain.cxx_flag,
        ));
    }

    for cmf in &toolchain.compilation_mode_flags {
        if cmf.mode == CompilationMode::Coverage {
            continue;
        }
        let mode = cmf.mode.feature_name();
        if !cmf.compiler_flag.is_empty() {
            synthesis.push(SynthesizedFlagSet::new(
                Some(mode),
                compile.clone(),
                &cmf.compiler_flag,
            ));
        }
        if !cmf.cxx_flag.is_empty() {
            synthesis.push(SynthesizedFlagSet::new(
                Some(mode),
                cxx_compile.clone(),
                &cmf.cxx_flag,
            ));
        }
    }

    synthesis
}

/// Flag sets for `default_link_flags`.
///
/// Order: `linker_flag`, per-compilation-mode linker flags, per-linking-mode
/// linker flags, `dynamic_library_linker_flag`, `test_only_linker_flag`.
/// A linking mode whose feature is already declared by the toolchain is
/// left to that feature; its flags are dropped with a warning.
pub fn link_flag_sets(toolchain: &Toolchain) -> Synthesis {
    let mut synthesis = Synthesis::default();
    let link = link_actions(toolchain);

    if !toolchain.linker_flag.is_empty() {
        synthesis.push(SynthesizedFlagSet::new(
            None,
            link.clone(),
            &toolchain.linker_flag,
        ));
    }

    for cmf in &toolchain.compilation_mode_flags {
        if cmf.mode == CompilationMode::Coverage || cmf.linker_flag.is_empty() {
            continue;
        }
        synthesis.push(SynthesizedFlagSet::new(
            Some(cmf.mode.feature_name()),
            link.clone(),
            &cmf.linker_flag,
        ));
    }

    for lmf in &toolchain.linking_mode_flags {
        let Some(mode) = lmf.mode.feature_name() else {
            if !lmf.linker_flag.is_empty() {
                synthesis.warnings.push(MigrationWarning::UnknownLinkingMode {
                    flags: lmf.linker_flag.clone(),
                });
            }
            continue;
        };
        if lmf.linker_flag.is_empty() {
            continue;
        }
        if toolchain.has_feature(mode) {
            synthesis.warnings.push(MigrationWarning::LinkingModeDeclared {
                feature: mode.to_string(),
                flags: lmf.linker_flag.clone(),
            });
            continue;
        }
        synthesis.push(SynthesizedFlagSet::new(
            Some(mode),
            link.clone(),
            &lmf.linker_flag,
        ));
    }

    if !toolchain.dynamic_library_linker_flag.is_empty() {
        synthesis.push(SynthesizedFlagSet::new(
            None,
            dynamic_library_link_actions(),
            &toolchain.dynamic_library_linker_flag,
        ));
    }

    if !toolchain.test_only_linker_flag.is_empty() {
        synthesis.push(SynthesizedFlagSet::new(
            Some(IS_CC_TEST),
            link,
            &toolchain.test_only_linker_flag,
        ));
    }

    synthesis
}

/// Package synthesized flag sets into an enabled aggregator feature.
pub fn aggregate(name: &str, flag_sets: Vec<SynthesizedFlagSet>) -> Feature {
    flag_sets
        .into_iter()
        .fold(Feature::enabled(name), |feature, fs| {
            feature.with_flag_set(fs.into_flag_set())
        })
}

/// `per_object_debug_info`: `-gsplit-dwarf` when a per-object debug file is
/// requested. Left disabled; the build enables it on demand.
pub fn per_object_debug_info_feature() -> Feature {
    Feature::new("per_object_debug_info").with_flag_set(
        FlagSet::for_actions(PER_OBJECT_DEBUG_INFO_ACTIONS.iter().copied()).with_group(
            FlagGroup::with_flags(["-gsplit-dwarf"])
                .expand_if_available("per_object_debug_info_file"),
        ),
    )
}

/// Tools whose legacy embed flags become a feature plus an action config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTool {
    Objcopy,
    Ld,
}

impl EmbedTool {
    /// Key looked up in the toolchain's tool-path table.
    pub fn tool_name(self) -> &'static str {
        match self {
            EmbedTool::Objcopy => "objcopy",
            EmbedTool::Ld => "ld",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            EmbedTool::Objcopy => OBJCOPY_EMBED_DATA,
            EmbedTool::Ld => LD_EMBED_DATA,
        }
    }

    pub fn feature_name(self) -> &'static str {
        match self {
            EmbedTool::Objcopy => "objcopy_embed_flags",
            EmbedTool::Ld => "ld_embed_flags",
        }
    }

    fn legacy_flags(self, toolchain: &Toolchain) -> &[String] {
        match self {
            EmbedTool::Objcopy => &toolchain.objcopy_embed_flag,
            EmbedTool::Ld => &toolchain.ld_embed_flag,
        }
    }
}

/// Output of migrating one embed tool.
#[derive(Debug)]
pub struct EmbedMigration {
    pub feature: Feature,
    pub action_config: ActionConfig,
    /// Set when the tool has no registered path; the action config is still
    /// produced, with an absent tool path.
    pub warning: Option<MigrationWarning>,
}

/// Feature and action config for a tool's legacy embed flags.
pub fn embed_flags(toolchain: &Toolchain, tool: EmbedTool) -> EmbedMigration {
    let feature = Feature::enabled(tool.feature_name()).with_flag_set(
        FlagSet::for_actions([tool.action()])
            .with_group(FlagGroup::with_flags(tool.legacy_flags(toolchain).iter().cloned())),
    );

    let tool_path = toolchain.tool_path(tool.tool_name()).map(str::to_string);
    let warning = tool_path
        .is_none()
        .then(|| MigrationWarning::UnresolvedTool {
            tool: tool.tool_name().to_string(),
            action: tool.action().to_string(),
        });

    EmbedMigration {
        feature,
        action_config: ActionConfig::for_tool(tool.action(), tool_path),
        warning,
    }
}

/// `user_compile_flags`: expands the per-target copts variable.
pub fn user_compile_flags_feature(toolchain: &Toolchain) -> Feature {
    Feature::enabled("user_compile_flags").with_flag_set(
        FlagSet::for_actions(compile_actions(toolchain)).with_group(
            FlagGroup::with_flags(["%{user_compile_flags}"])
                .expand_if_available("user_compile_flags")
                .iterating_over("user_compile_flags"),
        ),
    )
}

/// `sysroot`: passes `--sysroot` to compiles and links when one is set.
pub fn sysroot_feature(toolchain: &Toolchain) -> Feature {
    let mut actions = compile_actions(toolchain);
    actions.extend(link_actions(toolchain));
    Feature::enabled("sysroot").with_flag_set(
        FlagSet::for_actions(actions).with_group(
            FlagGroup::with_flags(["--sysroot=%{sysroot}"]).expand_if_available("sysroot"),
        ),
    )
}

/// `unfiltered_compile_flags` holding the literal legacy flags.
pub fn unfiltered_compile_flags_feature(toolchain: &Toolchain) -> Feature {
    Feature::enabled("unfiltered_compile_flags").with_flag_set(
        FlagSet::for_actions(compile_actions(toolchain)).with_group(FlagGroup::with_flags(
            toolchain.unfiltered_cxx_flag.iter().cloned(),
        )),
    )
}

/// Rewrite an existing `unfiltered_compile_flags` feature so that its groups
/// driven by the `unfiltered_compile_flags` variable emit the literal flags
/// instead. Returns the number of groups rewritten.
pub fn reconcile_unfiltered(feature: &mut Feature, flags: &[String]) -> usize {
    let mut rewritten = 0;
    for group in feature
        .flag_set
        .iter_mut()
        .flat_map(|fs| fs.flag_group.iter_mut())
        .filter(|g| g.iterate_over.as_deref() == Some("unfiltered_compile_flags"))
    {
        group.iterate_over = None;
        group.expand_if_all_available.clear();
        group.flag = flags.to_vec();
        rewritten += 1;
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstool_model::{
        ActionConfig, CompilationModeFlags, FeatureSet, LinkingMode, LinkingModeFlags, ToolPath,
    };

    use crate::actions::{CPP_COMPILE, C_COMPILE, OBJC_COMPILE};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn mode_flags(
        mode: CompilationMode,
        compiler: &[&str],
        cxx: &[&str],
        linker: &[&str],
    ) -> CompilationModeFlags {
        CompilationModeFlags {
            mode,
            compiler_flag: strings(compiler),
            cxx_flag: strings(cxx),
            linker_flag: strings(linker),
        }
    }

    #[test]
    fn compile_flags_in_source_order() {
        let mut tc = Toolchain::new("local");
        tc.compiler_flag = strings(&["-Wall"]);
        tc.cxx_flag = strings(&["-std=c++17"]);
        tc.compilation_mode_flags
            .push(mode_flags(CompilationMode::Opt, &["-O2"], &["-fno-rtti"], &[]));

        let synthesis = compile_flag_sets(&tc);
        assert_eq!(synthesis.flag_sets.len(), 4);
        assert_eq!(synthesis.condition_features, vec!["opt"]);

        let [all, cxx, opt, opt_cxx] = &synthesis.flag_sets[..] else {
            panic!("expected four flag sets");
        };
        assert_eq!(all.with_feature, None);
        assert_eq!(all.actions, compile_actions(&tc));
        assert_eq!(cxx.actions, cxx_compile_actions(&tc));
        assert_eq!(opt.with_feature.as_deref(), Some("opt"));
        assert_eq!(opt.flags, vec!["-O2"]);
        assert!(!opt_cxx.actions.iter().any(|a| a == C_COMPILE));
    }

    #[test]
    fn coverage_mode_is_skipped() {
        let mut tc = Toolchain::new("local");
        tc.compilation_mode_flags.push(mode_flags(
            CompilationMode::Coverage,
            &["--coverage"],
            &[],
            &["--coverage"],
        ));
        assert!(compile_flag_sets(&tc).is_empty());
        assert!(link_flag_sets(&tc).is_empty());
    }

    #[test]
    fn link_flags_in_source_order() {
        let mut tc = Toolchain::new("local");
        tc.linker_flag = strings(&["-lstdc++"]);
        tc.compilation_mode_flags
            .push(mode_flags(CompilationMode::Dbg, &[], &[], &["-g"]));
        tc.linking_mode_flags.push(LinkingModeFlags {
            mode: LinkingMode::FullyStatic,
            linker_flag: strings(&["-static"]),
        });
        tc.dynamic_library_linker_flag = strings(&["-Wl,-z,defs"]);
        tc.test_only_linker_flag = strings(&["-lgtest"]);

        let synthesis = link_flag_sets(&tc);
        let conditions: Vec<_> = synthesis
            .flag_sets
            .iter()
            .map(|fs| fs.with_feature.as_deref())
            .collect();
        assert_eq!(
            conditions,
            vec![None, Some("dbg"), Some("fully_static_link"), None, Some(IS_CC_TEST)]
        );
        assert_eq!(
            synthesis.condition_features,
            vec!["dbg", "fully_static_link", IS_CC_TEST]
        );
        assert_eq!(synthesis.flag_sets[3].actions, dynamic_library_link_actions());
        assert_eq!(synthesis.flag_sets[4].actions, link_actions(&tc));
    }

    #[test]
    fn declared_linking_mode_flags_dropped_with_warning() {
        let mut tc = Toolchain::new("local");
        tc.feature.push(Feature::enabled("static_linking_mode"));
        tc.linking_mode_flags.push(LinkingModeFlags {
            mode: LinkingMode::MostlyStatic,
            linker_flag: strings(&["-Wl,-Bstatic"]),
        });
        let synthesis = link_flag_sets(&tc);
        assert!(synthesis.is_empty());
        assert_eq!(
            synthesis.warnings,
            vec![MigrationWarning::LinkingModeDeclared {
                feature: "static_linking_mode".into(),
                flags: strings(&["-Wl,-Bstatic"]),
            }]
        );
    }

    #[test]
    fn unknown_linking_mode_is_dropped_with_warning() {
        let mut tc = Toolchain::new("local");
        tc.linking_mode_flags.push(LinkingModeFlags {
            mode: LinkingMode::Unknown,
            linker_flag: strings(&["-weird"]),
        });
        let synthesis = link_flag_sets(&tc);
        assert!(synthesis.is_empty());
        assert!(matches!(
            synthesis.warnings[..],
            [MigrationWarning::UnknownLinkingMode { .. }]
        ));
    }

    #[test]
    fn empty_dynamic_mode_adds_no_flag_set() {
        let mut tc = Toolchain::new("local");
        tc.linking_mode_flags.push(LinkingModeFlags {
            mode: LinkingMode::Dynamic,
            linker_flag: Vec::new(),
        });
        let synthesis = link_flag_sets(&tc);
        assert!(synthesis.is_empty());
        assert!(synthesis.condition_features.is_empty());
    }

    #[test]
    fn aggregate_builds_single_group_flag_sets() {
        let flag_set =
            SynthesizedFlagSet::new(Some("opt"), strings(&[CPP_COMPILE]), &strings(&["-O2"]));
        let feature = aggregate("default_compile_flags", vec![flag_set]);
        assert!(feature.enabled);
        assert_eq!(feature.flag_set.len(), 1);
        assert_eq!(feature.flag_set[0].with_feature, vec![FeatureSet::single("opt")]);
        assert_eq!(feature.flag_set[0].flag_group.len(), 1);
        assert_eq!(feature.flag_set[0].flag_group[0].flag, vec!["-O2"]);
    }

    #[test]
    fn per_object_debug_info_shape() {
        let feature = per_object_debug_info_feature();
        assert_eq!(feature.name, "per_object_debug_info");
        assert!(!feature.enabled);
        let fs = &feature.flag_set[0];
        assert_eq!(fs.action.len(), 6);
        let group = &fs.flag_group[0];
        assert_eq!(group.flag, vec!["-gsplit-dwarf"]);
        assert!(group.expand_if_all_available.contains("per_object_debug_info_file"));
    }

    #[test]
    fn embed_flags_resolve_tool() {
        let mut tc = Toolchain::new("local");
        tc.objcopy_embed_flag = strings(&["-I", "binary"]);
        tc.tool_path.push(ToolPath {
            name: "objcopy".into(),
            path: "/usr/bin/objcopy".into(),
        });

        let migration = embed_flags(&tc, EmbedTool::Objcopy);
        assert!(migration.warning.is_none());
        assert_eq!(migration.feature.name, "objcopy_embed_flags");
        assert_eq!(migration.feature.flag_set[0].action, vec![OBJCOPY_EMBED_DATA]);
        assert_eq!(migration.feature.flag_set[0].flag_group[0].flag, vec!["-I", "binary"]);
        assert_eq!(migration.action_config.action_name, OBJCOPY_EMBED_DATA);
        assert_eq!(
            migration.action_config.tool[0].tool_path.as_deref(),
            Some("/usr/bin/objcopy")
        );
    }

    #[test]
    fn embed_flags_unresolved_tool() {
        let mut tc = Toolchain::new("local");
        tc.ld_embed_flag = strings(&["-melf_x86_64"]);
        let migration = embed_flags(&tc, EmbedTool::Ld);
        assert!(migration.action_config.tool[0].tool_path.is_none());
        assert!(matches!(
            migration.warning,
            Some(MigrationWarning::UnresolvedTool { ref tool, .. }) if tool == "ld"
        ));
    }

    #[test]
    fn sysroot_spans_compile_and_link() {
        let mut tc = Toolchain::new("ios");
        tc.action_config
            .push(ActionConfig::for_tool(OBJC_COMPILE, Some("wrapped_clang".into())));
        let feature = sysroot_feature(&tc);
        assert_eq!(feature.flag_set[0].action.len(), 12 + 5);
        assert_eq!(
            feature.flag_set[0].flag_group[0].flag,
            vec!["--sysroot=%{sysroot}"]
        );
    }

    #[test]
    fn reconcile_rewrites_variable_groups_only() {
        let mut feature = Feature::enabled("unfiltered_compile_flags").with_flag_set(
            FlagSet::for_actions([C_COMPILE])
                .with_group(
                    FlagGroup::with_flags(["%{unfiltered_compile_flags}"])
                        .expand_if_available("unfiltered_compile_flags")
                        .iterating_over("unfiltered_compile_flags"),
                )
                .with_group(FlagGroup::with_flags(["-fno-canonical-system-headers"])),
        );
        let flags = strings(&["-no-canonical-prefixes", "-Wno-builtin-macro-redefined"]);
        assert_eq!(reconcile_unfiltered(&mut feature, &flags), 1);

        let groups = &feature.flag_set[0].flag_group;
        assert_eq!(groups[0].flag, flags);
        assert!(groups[0].iterate_over.is_none());
        assert!(groups[0].expand_if_all_available.is_empty());
        assert_eq!(groups[1].flag, vec!["-fno-canonical-system-headers"]);
    }
}
