//! Legacy field pruner.
//!
//! Runs after synthesis. Every legacy field is cleared whether or not it fed
//! a synthesized feature, so an already-migrated toolchain ends up exactly as
//! clean as a freshly migrated one.

use crosstool_model::{CrosstoolRelease, Toolchain};

fn take_if_set<T: Default + PartialEq>(field: &mut T) -> bool {
    std::mem::take(field) != T::default()
}

/// Declares a public list of field names and a function clearing exactly
/// those fields, recording the ones that held data.
macro_rules! legacy_fields {
    ($(#[$meta:meta])* $list:ident, $clear:ident; $($field:ident),+ $(,)?) => {
        $(#[$meta])*
        pub const $list: &[&str] = &[$(stringify!($field)),+];

        fn $clear(toolchain: &mut Toolchain, cleared: &mut Vec<&'static str>) {
            $(
                if take_if_set(&mut toolchain.$field) {
                    cleared.push(stringify!($field));
                }
            )+
        }
    };
}

legacy_fields! {
    /// Legacy fields whose behavior the feature model now carries.
    CONSUMED_FIELDS, clear_consumed;
    compiler_flag,
    cxx_flag,
    linker_flag,
    dynamic_library_linker_flag,
    test_only_linker_flag,
    unfiltered_cxx_flag,
    objcopy_embed_flag,
    ld_embed_flag,
    supports_start_end_lib,
    supports_interface_shared_objects,
    supports_embedded_runtimes,
    needs_pic,
    supports_fission,
    compilation_mode_flags,
    linking_mode_flags,
}

legacy_fields! {
    /// Fields describing capabilities with no feature equivalent. Always cleared.
    RETIRED_FIELDS, clear_retired;
    debian_extra_requires,
    gcc_plugin_compiler_flag,
    ar_flag,
    ar_thin_archives_flag,
    gcc_plugin_header_directory,
    mao_plugin_header_directory,
    supports_normalizing_ar,
    supports_thin_archives,
    supports_incremental_linker,
    supports_dsym,
    supports_gold_linker,
    default_python_top,
    default_python_version,
    python_preload_swigdeps,
    static_runtimes_filegroup,
    dynamic_runtimes_filegroup,
}

/// Reset every consumed and retired legacy field to its default.
///
/// Returns the names of fields that held data, consumed fields first.
pub fn prune_legacy_fields(toolchain: &mut Toolchain) -> Vec<&'static str> {
    let mut cleared = Vec::new();
    clear_consumed(toolchain, &mut cleared);
    clear_retired(toolchain, &mut cleared);
    cleared
}

/// Drop the document-level default toolchain table.
///
/// Returns whether it held entries.
pub fn prune_default_toolchains(release: &mut CrosstoolRelease) -> bool {
    take_if_set(&mut release.default_toolchain)
}
