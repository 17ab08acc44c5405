//! Field classifier.
//!
//! Decides, per legacy-field category, whether the toolchain carries data for
//! it and whether the category's target feature already exists. An existing
//! target feature means the category was migrated before and is skipped; no
//! content comparison is made.

use std::fmt;

use crosstool_model::{CompilationMode, LinkingMode, Toolchain};

/// A class of legacy fields migrated as one unit, in migration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DynamicLinker,
    StartEndLib,
    InterfaceSharedLibraries,
    EmbeddedRuntimes,
    Pic,
    PerObjectDebugInfo,
    ObjcopyEmbedFlags,
    LdEmbedFlags,
    LinkFlags,
    CompileFlags,
    UnfilteredCompileFlags,
}

impl Category {
    /// All categories in the order they are migrated.
    pub const ORDER: [Category; 11] = [
        Category::DynamicLinker,
        Category::StartEndLib,
        Category::InterfaceSharedLibraries,
        Category::EmbeddedRuntimes,
        Category::Pic,
        Category::PerObjectDebugInfo,
        Category::ObjcopyEmbedFlags,
        Category::LdEmbedFlags,
        Category::LinkFlags,
        Category::CompileFlags,
        Category::UnfilteredCompileFlags,
    ];

    /// Name of the feature the category migrates into.
    pub fn feature_name(self) -> &'static str {
        match self {
            Category::DynamicLinker => "supports_dynamic_linker",
            Category::StartEndLib => "supports_start_end_lib",
            Category::InterfaceSharedLibraries => "supports_interface_shared_libraries",
            Category::EmbeddedRuntimes => "static_link_cpp_runtimes",
            Category::Pic => "supports_pic",
            Category::PerObjectDebugInfo => "per_object_debug_info",
            Category::ObjcopyEmbedFlags => "objcopy_embed_flags",
            Category::LdEmbedFlags => "ld_embed_flags",
            Category::LinkFlags => "default_link_flags",
            Category::CompileFlags => "default_compile_flags",
            Category::UnfilteredCompileFlags => "unfiltered_compile_flags",
        }
    }

    /// Whether the toolchain carries legacy data for this category.
    pub fn is_present(self, toolchain: &Toolchain) -> bool {
        match self {
            Category::DynamicLinker => {
                !toolchain.dynamic_library_linker_flag.is_empty() || has_dynamic_mode(toolchain)
            }
            Category::StartEndLib => toolchain.supports_start_end_lib,
            Category::InterfaceSharedLibraries => toolchain.supports_interface_shared_objects,
            Category::EmbeddedRuntimes => toolchain.supports_embedded_runtimes,
            Category::Pic => toolchain.needs_pic,
            Category::PerObjectDebugInfo => toolchain.supports_fission,
            Category::ObjcopyEmbedFlags => !toolchain.objcopy_embed_flag.is_empty(),
            Category::LdEmbedFlags => !toolchain.ld_embed_flag.is_empty(),
            Category::LinkFlags => has_link_flags(toolchain),
            Category::CompileFlags => has_compile_flags(toolchain),
            Category::UnfilteredCompileFlags => !toolchain.unfiltered_cxx_flag.is_empty(),
        }
    }

    /// Whether an existing target feature is rewritten in place rather than
    /// causing the category to be skipped.
    fn reconciles_existing(self) -> bool {
        matches!(self, Category::UnfilteredCompileFlags)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feature_name())
    }
}

/// Outcome of classifying one category on one toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No legacy data; nothing to synthesize.
    Absent,
    /// Legacy data present but the target feature already exists.
    AlreadyMigrated,
    /// Legacy data present and the target feature is missing.
    Pending,
    /// Legacy data present and must be merged into the existing target feature.
    Reconcile,
}

/// Classify a category on a toolchain.
pub fn classify(toolchain: &Toolchain, category: Category) -> Classification {
    if !category.is_present(toolchain) {
        return Classification::Absent;
    }
    match (
        toolchain.has_feature(category.feature_name()),
        category.reconciles_existing(),
    ) {
        (false, _) => Classification::Pending,
        (true, true) => Classification::Reconcile,
        (true, false) => Classification::AlreadyMigrated,
    }
}

/// Whether any linking-mode table entry is for `DYNAMIC`, with or without flags.
pub fn has_dynamic_mode(toolchain: &Toolchain) -> bool {
    toolchain
        .linking_mode_flags
        .iter()
        .any(|lmf| lmf.mode == LinkingMode::Dynamic)
}

fn has_link_flags(toolchain: &Toolchain) -> bool {
    !toolchain.linker_flag.is_empty()
        || !toolchain.dynamic_library_linker_flag.is_empty()
        || !toolchain.test_only_linker_flag.is_empty()
        || toolchain
            .compilation_mode_flags
            .iter()
            .any(|cmf| cmf.mode != CompilationMode::Coverage && !cmf.linker_flag.is_empty())
        || toolchain
            .linking_mode_flags
            .iter()
            .any(|lmf| !lmf.linker_flag.is_empty())
}

fn has_compile_flags(toolchain: &Toolchain) -> bool {
    !toolchain.compiler_flag.is_empty()
        || !toolchain.cxx_flag.is_empty()
        || toolchain
            .compilation_mode_flags
            .iter()
            .any(|cmf| {
                cmf.mode != CompilationMode::Coverage
                    && (!cmf.compiler_flag.is_empty() || !cmf.cxx_flag.is_empty())
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstool_model::{CompilationModeFlags, Feature, LinkingModeFlags};

    #[test]
    fn absent_when_no_data() {
        let tc = Toolchain::new("local");
        for category in Category::ORDER {
            assert_eq!(classify(&tc, category), Classification::Absent, "{category}");
        }
    }

    #[test]
    fn pending_then_already_migrated() {
        let mut tc = Toolchain::new("local");
        tc.needs_pic = true;
        assert_eq!(classify(&tc, Category::Pic), Classification::Pending);
        tc.feature.push(Feature::enabled("supports_pic"));
        assert_eq!(classify(&tc, Category::Pic), Classification::AlreadyMigrated);
    }

    #[test]
    fn unfiltered_reconciles() {
        let mut tc = Toolchain::new("local");
        tc.unfiltered_cxx_flag = vec!["-no-canonical-prefixes".into()];
        assert_eq!(
            classify(&tc, Category::UnfilteredCompileFlags),
            Classification::Pending
        );
        tc.feature.push(Feature::enabled("unfiltered_compile_flags"));
        assert_eq!(
            classify(&tc, Category::UnfilteredCompileFlags),
            Classification::Reconcile
        );
    }

    #[test]
    fn empty_dynamic_entry_counts_for_dynamic_linker() {
        let mut tc = Toolchain::new("local");
        tc.linking_mode_flags.push(LinkingModeFlags {
            mode: LinkingMode::Dynamic,
            linker_flag: Vec::new(),
        });
        assert_eq!(classify(&tc, Category::DynamicLinker), Classification::Pending);
        assert_eq!(classify(&tc, Category::LinkFlags), Classification::Absent);
    }

    #[test]
    fn per_mode_flags_count_as_present() {
        let mut tc = Toolchain::new("local");
        tc.compilation_mode_flags.push(CompilationModeFlags {
            mode: CompilationMode::Dbg,
            compiler_flag: Vec::new(),
            cxx_flag: Vec::new(),
            linker_flag: vec!["-g".into()],
        });
        assert!(Category::LinkFlags.is_present(&tc));
        assert!(!Category::CompileFlags.is_present(&tc));
    }

    #[test]
    fn coverage_flags_are_ignored() {
        let mut tc = Toolchain::new("local");
        tc.compilation_mode_flags.push(CompilationModeFlags {
            mode: CompilationMode::Coverage,
            compiler_flag: vec!["--coverage".into()],
            cxx_flag: Vec::new(),
            linker_flag: vec!["--coverage".into()],
        });
        assert!(!Category::CompileFlags.is_present(&tc));
        assert!(!Category::LinkFlags.is_present(&tc));
    }
}
