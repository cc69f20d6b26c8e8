//! Static description of the dashboard controls, built once from the dataset.

use crate::data::model::{LaunchDataset, PayloadBounds};
use crate::data::query::{ALL_SITES, PayloadRange};

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// Searchable single-select control: "All Sites" followed by each site.
#[derive(Debug, Clone)]
pub struct SiteDropdown {
    options: Vec<SiteOption>,
    pub placeholder: &'static str,
    pub searchable: bool,
}

impl SiteDropdown {
    pub fn from_sites(sites: &[String]) -> Self {
        let mut options = Vec::with_capacity(sites.len() + 1);
        options.push(SiteOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        });
        options.extend(sites.iter().map(|site| SiteOption {
            label: site.clone(),
            value: site.clone(),
        }));

        Self {
            options,
            placeholder: "Select a Launch Site",
            searchable: true,
        }
    }

    pub fn options(&self) -> &[SiteOption] {
        &self.options
    }

    pub fn default_value(&self) -> &str {
        ALL_SITES
    }

    /// Label shown for a dropdown value; unknown values show the raw value.
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    /// Options whose label contains `query`, ignoring case.
    pub fn matching(&self, query: &str) -> Vec<&SiteOption> {
        let query = query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| query.is_empty() || o.label.to_lowercase().contains(&query))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

pub const PAYLOAD_STEP_KG: f64 = 1000.0;
pub const PAYLOAD_MARK_INTERVAL_KG: f64 = 2500.0;

/// Dual-ended numeric range control over the payload bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PayloadSlider {
    pub fn from_bounds(bounds: PayloadBounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
            step: PAYLOAD_STEP_KG,
        }
    }

    pub fn default_range(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }

    /// Labelled tick positions: every 2500 kg inside the bounds.
    pub fn marks(&self) -> Vec<f64> {
        let first = (self.min / PAYLOAD_MARK_INTERVAL_KG).ceil() as i64;
        let last = (self.max / PAYLOAD_MARK_INTERVAL_KG).floor() as i64;
        (first..=last)
            .map(|k| k as f64 * PAYLOAD_MARK_INTERVAL_KG)
            .collect()
    }

    /// Clamp to the bounds and round to the nearest step from `min`. The
    /// bounds are always reachable even when the span is not a whole number
    /// of steps.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() || value <= self.min {
            return self.min;
        }
        if value >= self.max {
            return self.max;
        }
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Snap both ends and keep `low <= high`.
    pub fn normalize(&self, low: f64, high: f64) -> PayloadRange {
        let (low, high) = (self.snap(low), self.snap(high));
        if low <= high {
            PayloadRange::new(low, high)
        } else {
            PayloadRange::new(high, low)
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Every control of the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub site_dropdown: SiteDropdown,
    pub payload_slider: PayloadSlider,
}

impl DashboardLayout {
    pub fn new(dataset: &LaunchDataset) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            site_dropdown: SiteDropdown::from_sites(dataset.sites()),
            payload_slider: PayloadSlider::from_bounds(dataset.payload_bounds()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> Vec<String> {
        ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn dropdown_starts_with_all_sites() {
        let dd = SiteDropdown::from_sites(&sites());
        assert_eq!(dd.options().len(), 5);
        assert_eq!(dd.options()[0].value, "ALL");
        assert_eq!(dd.options()[0].label, "All Sites");
        assert_eq!(dd.options()[2].value, "VAFB SLC-4E");
        assert_eq!(dd.default_value(), "ALL");
        assert_eq!(dd.label_for("ALL"), "All Sites");
        assert_eq!(dd.label_for("Mars"), "Mars");
    }

    #[test]
    fn dropdown_search_is_case_insensitive() {
        let dd = SiteDropdown::from_sites(&sites());
        let hits: Vec<&str> = dd.matching("ccafs").iter().map(|o| o.value.as_str()).collect();
        assert_eq!(hits, ["CCAFS LC-40", "CCAFS SLC-40"]);
        assert_eq!(dd.matching("  ").len(), 5);
        assert!(dd.matching("boca").is_empty());
    }

    #[test]
    fn slider_snaps_to_steps_and_bounds() {
        let slider = PayloadSlider::from_bounds(PayloadBounds { min: 0.0, max: 9600.0 });
        assert_eq!(slider.snap(1499.0), 1000.0);
        assert_eq!(slider.snap(1500.0), 2000.0);
        assert_eq!(slider.snap(9400.0), 9000.0);
        assert_eq!(slider.snap(9600.0), 9600.0);
        assert_eq!(slider.snap(9599.0), 9600.0);
        assert_eq!(slider.snap(-50.0), 0.0);
        assert_eq!(slider.snap(20_000.0), 9600.0);
        assert_eq!(slider.default_range(), PayloadRange::new(0.0, 9600.0));
    }

    #[test]
    fn normalize_orders_ends() {
        let slider = PayloadSlider::from_bounds(PayloadBounds { min: 0.0, max: 9600.0 });
        assert_eq!(slider.normalize(7000.0, 2000.0), PayloadRange::new(2000.0, 7000.0));
    }

    #[test]
    fn marks_stay_inside_bounds() {
        let slider = PayloadSlider::from_bounds(PayloadBounds { min: 0.0, max: 9600.0 });
        assert_eq!(slider.marks(), [0.0, 2500.0, 5000.0, 7500.0]);
        let narrow = PayloadSlider::from_bounds(PayloadBounds { min: 3000.0, max: 4000.0 });
        assert!(narrow.marks().is_empty());
    }
}
