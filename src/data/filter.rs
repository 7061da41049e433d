use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Value of the site dropdown: every site, or one named site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a dropdown value; `"ALL"` selects every site.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }

    /// The dropdown's wire value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    /// Label shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range; swapped bounds are reordered so `low <= high` holds.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// The full payload span of the dataset.
    pub fn of_dataset(dataset: &LaunchDataset) -> Self {
        PayloadRange::new(dataset.min_payload(), dataset.max_payload())
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive continuous membership: `low <= payload <= high`.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

// ---------------------------------------------------------------------------
// Record filters
// ---------------------------------------------------------------------------

/// Records launched from the selected site(s).
pub fn at_site<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |rec| site.matches(rec))
}

/// Records passing both the site and the payload filter, in dataset order.
pub fn in_payload_range<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: &'a PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    at_site(dataset, site).filter(move |rec| range.contains(rec.payload_mass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::fixture;

    #[test]
    fn parse_recognises_all() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.label(), "All Sites");
        assert_eq!(SiteSelection::Site("X".into()).value(), "X");
    }

    #[test]
    fn range_normalises_swapped_bounds() {
        let r = PayloadRange::new(5000.0, 1000.0);
        assert_eq!((r.low(), r.high()), (1000.0, 5000.0));
    }

    #[test]
    fn range_is_inclusive_and_continuous() {
        let r = PayloadRange::new(1000.0, 5000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(5000.0));
        assert!(r.contains(4428.5));
        assert!(!r.contains(999.9));
        assert!(!r.contains(5000.1));
    }

    #[test]
    fn fractional_payloads_are_not_dropped() {
        let ds = fixture();
        let site = SiteSelection::Site("CCAFS SLC-40".into());
        let range = PayloadRange::new(4000.0, 5000.0);
        assert_eq!(in_payload_range(&ds, &site, &range).count(), 1);
    }

    #[test]
    fn site_filter_keeps_dataset_order() {
        let ds = fixture();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let payloads: Vec<f64> = at_site(&ds, &site).map(|r| r.payload_mass).collect();
        assert_eq!(payloads, vec![2490.0, 5300.0, 2490.0]);
        assert_eq!(at_site(&ds, &SiteSelection::All).count(), ds.len());
    }
}
