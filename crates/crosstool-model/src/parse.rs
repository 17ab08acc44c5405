//! TOML and JSON interchange for toolchain documents.
//!
//! Documents use the legacy field names verbatim, so a table such as
//! `[[toolchain.compilation_mode_flags]]` reads the same as the text form it
//! replaces. The format is chosen by file extension unless overridden.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ModelError, Result};
use crate::release::CrosstoolRelease;

/// On-disk interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Toml,
    Json,
}

impl DocumentFormat {
    /// Format implied by a path: `.json` is JSON, everything else TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Toml,
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(ModelError::UnknownFormat { name: s.into() }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Toml => write!(f, "toml"),
            DocumentFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a document from text.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<CrosstoolRelease> {
    let release = match format {
        DocumentFormat::Toml => toml::from_str(text)?,
        DocumentFormat::Json => serde_json::from_str(text)?,
    };
    Ok(release)
}

/// Serialize a document to text.
pub fn write_document(release: &CrosstoolRelease, format: DocumentFormat) -> Result<String> {
    let text = match format {
        DocumentFormat::Toml => toml::to_string_pretty(release)?,
        DocumentFormat::Json => {
            let mut text = serde_json::to_string_pretty(release)?;
            text.push('\n');
            text
        }
    };
    Ok(text)
}

/// Load a document from a file. The format defaults to the one implied by
/// the file extension.
pub fn load_document(path: &Path, format: Option<DocumentFormat>) -> Result<CrosstoolRelease> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, format.unwrap_or_else(|| DocumentFormat::from_path(path)))
}

/// Write a document to a file, replacing any existing content.
pub fn store_document(
    path: &Path,
    release: &CrosstoolRelease,
    format: Option<DocumentFormat>,
) -> Result<()> {
    let text = write_document(release, format.unwrap_or_else(|| DocumentFormat::from_path(path)))?;
    std::fs::write(path, text)?;
    Ok(())
}
