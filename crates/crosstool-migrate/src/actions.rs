//! Action-name tables.
//!
//! Flag sets synthesized from legacy fields are scoped to these actions. The
//! compile and link tables grow by the Objective-C actions when the toolchain
//! is an Objective-C toolchain.

use crosstool_model::Toolchain;

pub const ASSEMBLE: &str = "assemble";
pub const PREPROCESS_ASSEMBLE: &str = "preprocess-assemble";
pub const LINKSTAMP_COMPILE: &str = "linkstamp-compile";
pub const C_COMPILE: &str = "c-compile";
pub const CPP_COMPILE: &str = "c++-compile";
pub const CPP_HEADER_PARSING: &str = "c++-header-parsing";
pub const CPP_MODULE_COMPILE: &str = "c++-module-compile";
pub const CPP_MODULE_CODEGEN: &str = "c++-module-codegen";
pub const LTO_BACKEND: &str = "lto-backend";
pub const CLIF_MATCH: &str = "clif-match";
pub const OBJC_COMPILE: &str = "objc-compile";
pub const OBJCPP_COMPILE: &str = "objc++-compile";

pub const CPP_LINK_EXECUTABLE: &str = "c++-link-executable";
pub const CPP_LINK_DYNAMIC_LIBRARY: &str = "c++-link-dynamic-library";
pub const CPP_LINK_NODEPS_DYNAMIC_LIBRARY: &str = "c++-link-nodeps-dynamic-library";
pub const OBJC_EXECUTABLE: &str = "objc-executable";
pub const OBJCPP_EXECUTABLE: &str = "objc++-executable";

pub const OBJCOPY_EMBED_DATA: &str = "objcopy_embed_data";
pub const LD_EMBED_DATA: &str = "ld_embed_data";

pub const ALL_CC_COMPILE_ACTIONS: &[&str] = &[
    ASSEMBLE,
    PREPROCESS_ASSEMBLE,
    LINKSTAMP_COMPILE,
    C_COMPILE,
    CPP_COMPILE,
    CPP_HEADER_PARSING,
    CPP_MODULE_COMPILE,
    CPP_MODULE_CODEGEN,
    LTO_BACKEND,
    CLIF_MATCH,
];

pub const ALL_OBJC_COMPILE_ACTIONS: &[&str] = &[OBJC_COMPILE, OBJCPP_COMPILE];

pub const ALL_CC_LINK_ACTIONS: &[&str] = &[
    CPP_LINK_EXECUTABLE,
    CPP_LINK_DYNAMIC_LIBRARY,
    CPP_LINK_NODEPS_DYNAMIC_LIBRARY,
];

pub const ALL_OBJC_LINK_ACTIONS: &[&str] = &[OBJC_EXECUTABLE, OBJCPP_EXECUTABLE];

pub const DYNAMIC_LIBRARY_LINK_ACTIONS: &[&str] =
    &[CPP_LINK_DYNAMIC_LIBRARY, CPP_LINK_NODEPS_DYNAMIC_LIBRARY];

/// Actions that honor `-gsplit-dwarf`.
pub const PER_OBJECT_DEBUG_INFO_ACTIONS: &[&str] = &[
    C_COMPILE,
    CPP_COMPILE,
    CPP_MODULE_CODEGEN,
    ASSEMBLE,
    PREPROCESS_ASSEMBLE,
    LTO_BACKEND,
];

/// An Objective-C toolchain declares an action config for `objc-compile`.
pub fn is_objc_toolchain(toolchain: &Toolchain) -> bool {
    toolchain.has_action_config(OBJC_COMPILE)
}

fn owned(tables: &[&[&str]]) -> Vec<String> {
    tables
        .iter()
        .flat_map(|t| t.iter())
        .map(|a| (*a).to_string())
        .collect()
}

/// Every compile action of the toolchain.
pub fn compile_actions(toolchain: &Toolchain) -> Vec<String> {
    if is_objc_toolchain(toolchain) {
        owned(&[ALL_CC_COMPILE_ACTIONS, ALL_OBJC_COMPILE_ACTIONS])
    } else {
        owned(&[ALL_CC_COMPILE_ACTIONS])
    }
}

/// Compile actions that accept C++ flags: every compile action except `c-compile`.
pub fn cxx_compile_actions(toolchain: &Toolchain) -> Vec<String> {
    compile_actions(toolchain)
        .into_iter()
        .filter(|a| a != C_COMPILE)
        .collect()
}

/// Every link action of the toolchain.
pub fn link_actions(toolchain: &Toolchain) -> Vec<String> {
    if is_objc_toolchain(toolchain) {
        owned(&[ALL_CC_LINK_ACTIONS, ALL_OBJC_LINK_ACTIONS])
    } else {
        owned(&[ALL_CC_LINK_ACTIONS])
    }
}

/// Link actions producing dynamic libraries.
pub fn dynamic_library_link_actions() -> Vec<String> {
    owned(&[DYNAMIC_LIBRARY_LINK_ACTIONS])
}
