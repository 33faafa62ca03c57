//! Catalog store and checksum lookup.
//!
//! # Responsibilities
//! - Hold an immutable, ordered snapshot of the catalog
//! - Answer checksum lookups by firmware id
//! - Expose the record lists for the list endpoints

use crate::catalog::record::{DeviceFamily, Firmware, FirmwareId, Project};

/// An immutable catalog snapshot.
///
/// Records are kept in document order; lookups scan linearly so the
/// first record wins when the catalog contains duplicate ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    firmware: Vec<Firmware>,
    families: Vec<DeviceFamily>,
    projects: Vec<Project>,
}

impl Catalog {
    /// Create a catalog holding only firmware records.
    pub fn new(firmware: Vec<Firmware>) -> Self {
        Self {
            firmware,
            families: Vec::new(),
            projects: Vec::new(),
        }
    }

    /// Create a catalog with the full record set.
    pub fn with_records(
        firmware: Vec<Firmware>,
        families: Vec<DeviceFamily>,
        projects: Vec<Project>,
    ) -> Self {
        Self {
            firmware,
            families,
            projects,
        }
    }

    /// Look up the checksum for a firmware id.
    ///
    /// Scans records in stored order and returns the checksum of the
    /// first record whose normalized id equals the normalized request id.
    /// Returns `None` when the request id does not normalize to an
    /// integer or no record matches.
    pub fn lookup_checksum(&self, id: &FirmwareId) -> Option<&str> {
        let wanted = id.normalize()?;
        self.firmware
            .iter()
            .find(|fw| fw.id.normalize() == Some(wanted))
            .map(|fw| fw.checksum.as_str())
    }

    /// All firmware records, in document order.
    pub fn firmware(&self) -> &[Firmware] {
        &self.firmware
    }

    /// All device families, in document order.
    pub fn families(&self) -> &[DeviceFamily] {
        &self.families
    }

    /// All projects, in document order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn firmware_count(&self) -> usize {
        self.firmware.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, checksum: &str) -> Firmware {
        Firmware {
            id: FirmwareId::Number(id),
            checksum: checksum.to_string(),
            ..Firmware::default()
        }
    }

    #[test]
    fn test_lookup_match() {
        let catalog = Catalog::new(vec![record(1, "abc"), record(2, "def")]);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Number(2)), Some("def"));
    }

    #[test]
    fn test_lookup_no_match() {
        let catalog = Catalog::new(vec![record(1, "abc"), record(2, "def")]);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Number(99)), None);
    }

    #[test]
    fn test_lookup_empty_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Number(1)), None);
    }

    #[test]
    fn test_first_match_wins_on_duplicate_ids() {
        let catalog = Catalog::new(vec![record(5, "first"), record(5, "second")]);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Number(5)), Some("first"));
    }

    #[test]
    fn test_string_and_number_ids_normalize_to_same_record() {
        let catalog = Catalog::new(vec![record(2, "def")]);
        assert_eq!(
            catalog.lookup_checksum(&FirmwareId::Text("2".into())),
            Some("def")
        );
    }

    #[test]
    fn test_non_numeric_id_never_matches() {
        let catalog = Catalog::new(vec![record(2, "def")]);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Text("two".into())), None);
        assert_eq!(catalog.lookup_checksum(&FirmwareId::Text("2.0".into())), None);
    }
}
