//! Compilation and linking modes keyed by the legacy per-mode flag tables.

use serde::{Deserialize, Serialize};

/// Build compilation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompilationMode {
    Fastbuild,
    Dbg,
    Opt,
    /// Has had no effect for a long time; never migrated.
    Coverage,
}

impl CompilationMode {
    /// Lowercase enum name, which is also the name of the mode's feature.
    pub fn feature_name(self) -> &'static str {
        match self {
            CompilationMode::Fastbuild => "fastbuild",
            CompilationMode::Dbg => "dbg",
            CompilationMode::Opt => "opt",
            CompilationMode::Coverage => "coverage",
        }
    }
}

/// Legacy linking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkingMode {
    FullyStatic,
    MostlyStatic,
    Dynamic,
    MostlyStaticLibraries,
    /// Any spelling not listed above.
    #[serde(other)]
    Unknown,
}

impl LinkingMode {
    /// Name of the feature that selects this linking mode, if one exists.
    pub fn feature_name(self) -> Option<&'static str> {
        match self {
            LinkingMode::FullyStatic => Some("fully_static_link"),
            LinkingMode::MostlyStatic => Some("static_linking_mode"),
            LinkingMode::Dynamic => Some("dynamic_linking_mode"),
            LinkingMode::MostlyStaticLibraries => Some("static_linking_mode_nodeps_library"),
            LinkingMode::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        mode: LinkingMode,
    }

    #[test]
    fn compilation_mode_names() {
        assert_eq!(CompilationMode::Opt.feature_name(), "opt");
        assert_eq!(CompilationMode::Fastbuild.feature_name(), "fastbuild");
    }

    #[test]
    fn linking_mode_table() {
        assert_eq!(LinkingMode::FullyStatic.feature_name(), Some("fully_static_link"));
        assert_eq!(LinkingMode::MostlyStatic.feature_name(), Some("static_linking_mode"));
        assert_eq!(LinkingMode::Dynamic.feature_name(), Some("dynamic_linking_mode"));
        assert_eq!(
            LinkingMode::MostlyStaticLibraries.feature_name(),
            Some("static_linking_mode_nodeps_library")
        );
        assert_eq!(LinkingMode::Unknown.feature_name(), None);
    }

    #[test]
    fn unknown_spelling_deserializes() {
        let h: Holder = serde_json::from_str(r#"{"mode": "SEMI_STATIC"}"#).unwrap();
        assert_eq!(h.mode, LinkingMode::Unknown);
        let h: Holder = serde_json::from_str(r#"{"mode": "MOSTLY_STATIC_LIBRARIES"}"#).unwrap();
        assert_eq!(h.mode, LinkingMode::MostlyStaticLibraries);
    }
}
