//! Catalog loading from disk.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::record::{DeviceFamily, Firmware, Project};
use crate::catalog::store::Catalog;

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk catalog document.
///
/// Accepts either a bare array of firmware records or a full document
/// with firmware, device families, and projects.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Records(Vec<Firmware>),
    Full {
        firmware: Vec<Firmware>,
        #[serde(default)]
        device_families: Vec<DeviceFamily>,
        #[serde(default)]
        projects: Vec<Project>,
    },
}

/// Load a catalog from a JSON document on disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse a catalog from a JSON document.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    let catalog = match document {
        CatalogDocument::Records(firmware) => Catalog::new(firmware),
        CatalogDocument::Full {
            firmware,
            device_families,
            projects,
        } => Catalog::with_records(firmware, device_families, projects),
    };
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::FirmwareId;

    #[test]
    fn test_parse_bare_array() {
        let catalog = parse_catalog(
            r#"[{"id":1,"checksum":"abc"},{"id":2,"checksum":"def"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.firmware_count(), 2);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Number(2)), Some("def"));
    }

    #[test]
    fn test_parse_full_document() {
        let catalog = parse_catalog(
            r#"{
                "firmware": [{"id": 1, "checksum": "abc", "family_id": 10, "project_id": 20}],
                "device_families": [{"id": 10, "name": "ESP32", "flash_method": "esptool"}],
                "projects": [{"id": 20, "name": "Display"}]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.firmware_count(), 1);
        assert_eq!(catalog.family_count(), 1);
        assert_eq!(catalog.project_count(), 1);
        assert_eq!(catalog.families()[0].name, "ESP32");
    }

    #[test]
    fn test_parse_empty_array() {
        let catalog = parse_catalog("[]").unwrap();
        assert_eq!(catalog.firmware_count(), 0);
    }

    #[test]
    fn test_parse_invalid_document() {
        assert!(matches!(
            parse_catalog("not json").unwrap_err(),
            CatalogError::Parse(_)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
