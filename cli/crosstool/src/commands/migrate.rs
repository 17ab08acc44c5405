//! `crosstool migrate`: read, migrate, write.

use std::path::Path;

use anyhow::{Context, Result};
use crosstool_migrate::{migrate, MigrationReport};
use crosstool_model::{load_document, store_document, DocumentFormat};
use tracing::info;

/// Migrate `input` and write the result to `output`.
///
/// The format applies to both files; when absent each file's extension
/// decides.
pub fn run(input: &Path, output: &Path, format: Option<DocumentFormat>) -> Result<()> {
    let report = migrate_file(input, output, format)?;
    for toolchain in &report.toolchains {
        println!("{}", toolchain.summary());
    }
    println!("Wrote {}", output.display());
    Ok(())
}

/// Core of `run`, returning the report instead of printing it.
pub fn migrate_file(
    input: &Path,
    output: &Path,
    format: Option<DocumentFormat>,
) -> Result<MigrationReport> {
    let mut release = load_document(input, format)
        .with_context(|| format!("failed to read {}", input.display()))?;

    info!(
        input = %input.display(),
        toolchains = release.toolchain.len(),
        "loaded document"
    );

    let report = migrate(&mut release);

    store_document(output, &release, format)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstool_model::{parse_document, DocumentFormat};

    const LEGACY: &str = r#"
major_version = "local"
minor_version = ""

[[default_toolchain]]
cpu = "k8"
toolchain_identifier = "local_linux"

[[toolchain]]
toolchain_identifier = "local_linux"
compiler_flag = ["-Wall"]
linker_flag = ["-lstdc++"]
needsPic = true
ar_flag = ["rcsD"]

[[toolchain.linking_mode_flags]]
mode = "DYNAMIC"
linker_flag = ["-shared"]
"#;

    #[test]
    fn migrates_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("CROSSTOOL.toml");
        let output = dir.path().join("migrated.toml");
        std::fs::write(&input, LEGACY).unwrap();

        let report = migrate_file(&input, &output, None).unwrap();
        assert!(report.default_toolchains_cleared);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(!text.contains("needsPic"));
        assert!(!text.contains("ar_flag"));
        assert!(!text.contains("default_toolchain"));

        let migrated = parse_document(&text, DocumentFormat::Toml).unwrap();
        let tc = migrated.toolchain("local_linux").unwrap();
        assert_eq!(tc.feature[0].name, "default_compile_flags");
        assert_eq!(tc.feature[1].name, "default_link_flags");
        assert!(tc.has_feature("supports_pic"));
        assert!(tc.has_feature("dynamic_linking_mode"));
    }

    #[test]
    fn second_run_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("CROSSTOOL.toml");
        let once = dir.path().join("once.toml");
        let twice = dir.path().join("twice.toml");
        std::fs::write(&input, LEGACY).unwrap();

        migrate_file(&input, &once, None).unwrap();
        let report = migrate_file(&once, &twice, None).unwrap();
        assert!(report.is_noop());
        assert_eq!(
            std::fs::read_to_string(&once).unwrap(),
            std::fs::read_to_string(&twice).unwrap()
        );
    }

    #[test]
    fn converts_between_formats_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("CROSSTOOL.toml");
        let output = dir.path().join("migrated.json");
        std::fs::write(&input, LEGACY).unwrap();

        migrate_file(&input, &output, None).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        let migrated = parse_document(&text, DocumentFormat::Json).unwrap();
        assert_eq!(migrated.toolchain.len(), 1);
    }

    #[test]
    fn missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = migrate_file(
            &dir.path().join("absent.toml"),
            &dir.path().join("out.toml"),
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
        assert!(!dir.path().join("out.toml").exists());
    }
}
