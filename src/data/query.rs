use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchDataset, PayloadBounds};

/// Dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

pub const SUCCESS_LABEL: &str = "Success";
pub const FAILURE_LABEL: &str = "Failure";

// ---------------------------------------------------------------------------
// Query inputs
// ---------------------------------------------------------------------------

/// Value of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a raw dropdown value; `"ALL"` selects every site.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Inclusive payload interval in kilograms.
///
/// An inverted interval (`low > high`) or one with a NaN end contains
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The whole dataset range.
    pub fn full(bounds: PayloadBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

// ---------------------------------------------------------------------------
// Proportion query
// ---------------------------------------------------------------------------

/// Pie chart input: label → count, labels sorted.
pub type OutcomeDistribution = BTreeMap<String, usize>;

/// Count launch outcomes for the pie chart.
///
/// * `All` – successful launches per site; sites without a success are absent.
/// * `Site(s)` – `"Success"` / `"Failure"` counts for site `s`; an unknown
///   site yields an empty map.
pub fn compute_outcome_distribution(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
) -> OutcomeDistribution {
    let mut counts = OutcomeDistribution::new();

    match selection {
        SiteSelection::All => {
            for rec in dataset.records().iter().filter(|r| r.success) {
                *counts.entry(rec.site.clone()).or_default() += 1;
            }
        }
        SiteSelection::Site(site) => {
            for rec in dataset.records().iter().filter(|r| &r.site == site) {
                let label = if rec.success { SUCCESS_LABEL } else { FAILURE_LABEL };
                *counts.entry(label.to_string()).or_default() += 1;
            }
        }
    }

    counts
}

// ---------------------------------------------------------------------------
// Correlation query
// ---------------------------------------------------------------------------

/// One scatter point: x = payload, y = outcome, colour = booster category.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    /// Index of the launch in the dataset.
    pub row: usize,
    pub payload_mass_kg: f64,
    pub success: bool,
    pub booster_category: String,
}

/// Launches whose payload lies in `range` (and whose site matches
/// `selection`), in dataset order.
pub fn compute_filtered_correlation(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<CorrelationPoint> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && selection.matches(&rec.site))
        .map(|(row, rec)| CorrelationPoint {
            row,
            payload_mass_kg: rec.payload_mass_kg,
            success: rec.success,
            booster_category: rec.booster_category.clone(),
        })
        .collect()
}
