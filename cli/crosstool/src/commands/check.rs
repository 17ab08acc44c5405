//! `crosstool check`: dry-run migration report.

use std::path::Path;

use anyhow::{Context, Result};
use crosstool_migrate::{migrate, MigrationReport};
use crosstool_model::{load_document, DocumentFormat};

/// Print what migrating `input` would change. Nothing is written.
pub fn run(input: &Path, format: Option<DocumentFormat>) -> Result<()> {
    let report = check_file(input, format)?;
    print!("{report}");
    if report.is_noop() {
        println!();
        println!("{} is already migrated.", input.display());
    }
    Ok(())
}

/// Migrate an in-memory copy of the document and return the report.
pub fn check_file(input: &Path, format: Option<DocumentFormat>) -> Result<MigrationReport> {
    let mut release = load_document(input, format)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(migrate(&mut release))
}
