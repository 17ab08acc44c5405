//! Variable-availability normalization.
//!
//! Legacy documents may gate a whole flag set on variable availability. The
//! feature model expresses that gating on flag groups only, so the flag-set
//! condition is pushed down into every group (set union) and cleared.

use crosstool_model::{FlagSet, Toolchain};

/// Push flag-set level `expand_if_all_available` into the flag groups.
///
/// Returns the number of flag sets that carried a condition.
pub fn push_down_availability(flag_sets: &mut [FlagSet]) -> usize {
    let mut moved = 0;
    for flag_set in flag_sets.iter_mut() {
        if flag_set.expand_if_all_available.is_empty() {
            continue;
        }
        let condition = std::mem::take(&mut flag_set.expand_if_all_available);
        for group in &mut flag_set.flag_group {
            group
                .expand_if_all_available
                .extend(condition.iter().cloned());
        }
        moved += 1;
    }
    moved
}

/// Normalize every feature and action config of a toolchain.
pub fn normalize_toolchain(toolchain: &mut Toolchain) -> usize {
    let features: usize = toolchain
        .feature
        .iter_mut()
        .map(|f| push_down_availability(&mut f.flag_set))
        .sum();
    let action_configs: usize = toolchain
        .action_config
        .iter_mut()
        .map(|ac| push_down_availability(&mut ac.flag_set))
        .sum();
    features + action_configs
}
