//! Migration engine for legacy toolchain descriptor fields.
//!
//! Rewrites a [`CrosstoolRelease`](crosstool_model::CrosstoolRelease) in place
//! so that every toolchain expresses its command lines through features
//! alone. Each toolchain goes through a fixed sequence:
//! normalization, per-category classification and synthesis, assembly into
//! the feature list, and pruning of the consumed legacy fields.
//!
//! The pass is idempotent: every synthesis step is guarded by the existence
//! of its target feature, and pruning is unconditional.

pub mod actions;
pub mod assemble;
pub mod classify;
pub mod normalize;
pub mod pipeline;
pub mod prune;
pub mod report;
pub mod synthesize;

pub use classify::{classify, Category, Classification};
pub use pipeline::{migrate, migrate_toolchain};
pub use report::{MigrationReport, MigrationWarning, ToolchainReport};
