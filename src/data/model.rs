use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::SchemaError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value used on the scatter plot's y axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Interpret a raw `class` cell. Accepts `1`, `0`, `1.0`, `0.0`.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Outcome::Success)
        } else if value == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_version: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset plus the scalars derived once at load time.
///
/// Built once at startup and shared read-only with every update rule.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster versions, sorted.
    booster_versions: BTreeSet<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Build the derived indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, SchemaError> {
        if records.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_versions = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            booster_versions.insert(rec.booster_version.clone());
            min_payload = min_payload.min(rec.payload_mass);
            max_payload = max_payload.max(rec.payload_mass);
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_versions,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_versions(&self) -> &BTreeSet<String> {
        &self.booster_versions
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            site: site.to_string(),
            payload_mass: payload,
            outcome,
            booster_version: booster.to_string(),
        }
    }

    /// A small fixture shaped like the real launch table.
    pub(crate) fn fixture() -> LaunchDataset {
        use Outcome::*;
        let records = vec![
            record("CCAFS LC-40", 0.0, Failure, "F9 v1.0  B0003"),
            record("CCAFS LC-40", 525.0, Failure, "F9 v1.0  B0005"),
            record("CCAFS LC-40", 677.0, Success, "F9 v1.1"),
            record("VAFB SLC-4E", 500.0, Failure, "F9 v1.1  B1003"),
            record("CCAFS LC-40", 3170.0, Success, "F9 FT B1021.1"),
            record("KSC LC-39A", 2490.0, Success, "F9 FT B1031.1"),
            record("KSC LC-39A", 5300.0, Failure, "F9 FT B1030"),
            record("VAFB SLC-4E", 9600.0, Success, "F9 B4 B1041.1"),
            record("CCAFS SLC-40", 4428.5, Failure, "F9 v1.1"),
            record("KSC LC-39A", 2490.0, Success, "F9 B5 B1046.1"),
        ];
        LaunchDataset::from_records(records).unwrap()
    }

    #[test]
    fn derives_bounds_and_sites_once() {
        let ds = fixture();
        assert_eq!(ds.len(), 10);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(
            ds.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(ds.booster_versions().len(), 9);
        assert!(ds.has_site("KSC LC-39A"));
        assert!(!ds.has_site("Boca Chica"));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            LaunchDataset::from_records(Vec::new()),
            Err(SchemaError::Empty)
        ));
    }

    #[test]
    fn outcome_parses_integral_classes_only() {
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::Success.class(), 1);
    }
}
