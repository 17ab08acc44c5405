//! Feature assembler: places synthesized features in the toolchain.
//!
//! Feature order is flag order on the command line. Capability and mode
//! markers are appended since their position carries no meaning. The
//! aggregators holding legacy flags are prepended so those flags keep
//! coming before any user-declared feature's flags.

use crosstool_model::{Feature, Toolchain};

/// Insert a feature at position 0 by rebuilding the feature list.
pub fn prepend_feature(toolchain: &mut Toolchain, feature: Feature) {
    let existing = std::mem::take(&mut toolchain.feature);
    let mut features = Vec::with_capacity(existing.len() + 1);
    features.push(feature);
    features.extend(existing);
    toolchain.feature = features;
}

/// Insert a feature after all existing features.
pub fn append_feature(toolchain: &mut Toolchain, feature: Feature) {
    toolchain.feature.push(feature);
}

/// Append a flag-less marker feature unless one of that name exists.
///
/// Returns whether the feature was added.
pub fn append_marker_if_absent(toolchain: &mut Toolchain, name: &str, enabled: bool) -> bool {
    if toolchain.has_feature(name) {
        return false;
    }
    let marker = if enabled {
        Feature::enabled(name)
    } else {
        Feature::new(name)
    };
    append_feature(toolchain, marker);
    true
}
