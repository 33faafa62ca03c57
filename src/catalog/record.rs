//! Catalog record definitions.
//!
//! These mirror the JSON documents published by the firmware catalog:
//! firmware images, the device families they target, and the projects
//! they belong to. The verify lookup only reads `id` and `checksum`;
//! everything else is carried for the list endpoints.

use serde::{Deserialize, Serialize};

/// A firmware identifier as it appears on the wire.
///
/// Catalog ids are integers, but clients have historically sent them as
/// either JSON numbers or strings. Both are accepted and normalized to
/// `i64` before comparison; a value that does not normalize never matches.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FirmwareId {
    Number(i64),
    Text(String),
}

impl FirmwareId {
    /// Normalize to an integer id, if this value represents one.
    pub fn normalize(&self) -> Option<i64> {
        match self {
            FirmwareId::Number(n) => Some(*n),
            FirmwareId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for FirmwareId {
    fn from(id: i64) -> Self {
        FirmwareId::Number(id)
    }
}

/// A firmware image in the catalog.
///
/// Only `id` and `checksum` participate in the verify lookup. Unknown
/// fields in the catalog document are ignored so newer catalogs can be
/// served by older builds of this service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Firmware {
    pub id: FirmwareId,
    pub checksum: String,

    pub name: String,
    pub version: String,
    pub variant: String,
    pub family_id: i64,
    pub project_id: i64,
    pub description: String,
    pub variant_description: String,
    pub is_fermentrack_supported: String,
    pub in_error: String,
    pub download_url: String,
    pub download_url_partitions: String,
    pub download_url_spiffs: String,
    pub checksum_partitions: String,
    pub checksum_spiffs: String,
    pub spiffs_address: String,
    pub post_install_instructions: String,
    pub weight: i64,
}

impl Default for Firmware {
    fn default() -> Self {
        Self {
            id: FirmwareId::Number(0),
            checksum: String::new(),
            name: String::new(),
            version: String::new(),
            variant: String::new(),
            family_id: 0,
            project_id: 0,
            description: String::new(),
            variant_description: String::new(),
            is_fermentrack_supported: String::new(),
            in_error: String::new(),
            download_url: String::new(),
            download_url_partitions: String::new(),
            download_url_spiffs: String::new(),
            checksum_partitions: String::new(),
            checksum_spiffs: String::new(),
            spiffs_address: String::new(),
            post_install_instructions: String::new(),
            weight: 0,
        }
    }
}

/// A device family (e.g. an MCU line) that firmware images target.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceFamily {
    pub id: i64,
    pub name: String,
    pub flash_method: String,
    pub detection_family: String,
    pub use_1200_bps_touch: bool,
    pub download_url_bootloader: String,
    pub download_url_otadata: String,
    pub otadata_address: String,
    pub checksum_bootloader: String,
    pub checksum_otadata: String,
}

/// A project grouping related firmware images.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub description: String,
    pub support_url: String,
    pub project_url: String,
    pub documentation_url: String,
    pub show_in_standalone_flasher: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_normalization() {
        assert_eq!(FirmwareId::Number(42).normalize(), Some(42));
        assert_eq!(FirmwareId::Text("42".into()).normalize(), Some(42));
        assert_eq!(FirmwareId::Text(" 7 ".into()).normalize(), Some(7));
        assert_eq!(FirmwareId::Text("2.0".into()).normalize(), None);
        assert_eq!(FirmwareId::Text("abc".into()).normalize(), None);
        assert_eq!(FirmwareId::Text("".into()).normalize(), None);
    }

    #[test]
    fn test_firmware_tolerates_sparse_records() {
        // Catalog entries only need id and checksum for the lookup
        let fw: Firmware = serde_json::from_str(r#"{"id": 1, "checksum": "abc"}"#).unwrap();
        assert_eq!(fw.id.normalize(), Some(1));
        assert_eq!(fw.checksum, "abc");
        assert_eq!(fw.name, "");
    }

    #[test]
    fn test_firmware_ignores_unknown_fields() {
        let fw: Firmware =
            serde_json::from_str(r#"{"id": 3, "checksum": "def", "brand_new_field": true}"#)
                .unwrap();
        assert_eq!(fw.id.normalize(), Some(3));
    }

    #[test]
    fn test_list_rows_carry_flasher_client_fields() {
        // Flashing clients index into these keys on every list row, so
        // they must serialize even when the catalog omits them
        let fw = serde_json::to_value(Firmware::default()).unwrap();
        assert!(fw.get("is_fermentrack_supported").is_some());
        assert!(fw.get("in_error").is_some());

        let project = serde_json::to_value(Project::default()).unwrap();
        assert!(project.get("show_in_standalone_flasher").is_some());
    }

    #[test]
    fn test_string_id_in_catalog_document() {
        let fw: Firmware = serde_json::from_str(r#"{"id": "9", "checksum": "x"}"#).unwrap();
        assert_eq!(fw.id.normalize(), Some(9));
    }
}
