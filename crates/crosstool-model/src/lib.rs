//! Toolchain descriptor document model.
//!
//! A document ([`CrosstoolRelease`]) holds toolchain records. Each
//! [`Toolchain`] describes command-line construction through:
//! - **Features:** named bundles of flag sets, enabled by default or on request
//! - **Action configs:** the tool that carries out each build action
//! - **Legacy fields:** pre-feature scalar, boolean and per-mode tables
//!
//! Documents are exchanged as TOML or JSON; see [`parse`].

pub mod action_config;
pub mod error;
pub mod feature;
pub mod mode;
pub mod parse;
pub mod release;
pub mod toolchain;

pub use action_config::{ActionConfig, Tool};
pub use error::{ModelError, Result};
pub use feature::{EnvEntry, EnvSet, Feature, FeatureSet, FlagGroup, FlagSet};
pub use mode::{CompilationMode, LinkingMode};
pub use parse::{load_document, parse_document, store_document, write_document, DocumentFormat};
pub use release::{CrosstoolRelease, DefaultCpuToolchain};
pub use toolchain::{
    ArtifactNamePattern, CompilationModeFlags, LinkingModeFlags, MakeVariable, ToolPath, Toolchain,
};
