use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Column names of the launch table
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    SITE_COLUMN,
    PAYLOAD_COLUMN,
    CLASS_COLUMN,
    BOOSTER_CATEGORY_COLUMN,
];

// ---------------------------------------------------------------------------
// MetadataValue – a single cell in a descriptive column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
///
/// Deserializes from any JSON value. Arrays and objects are kept as their
/// JSON text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "JsonValue")]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, ""),
        }
    }
}

impl From<JsonValue> for MetadataValue {
    fn from(val: JsonValue) -> Self {
        match val {
            JsonValue::String(s) => MetadataValue::String(s),
            JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => MetadataValue::Integer(i),
                (None, Some(f)) => MetadataValue::Float(f),
                (None, None) => MetadataValue::String(n.to_string()),
            },
            JsonValue::Bool(b) => MetadataValue::Bool(b),
            JsonValue::Null => MetadataValue::Null,
            other => MetadataValue::String(other.to_string()),
        }
    }
}

impl MetadataValue {
    /// Guess the type of a raw text cell (CSV).
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return MetadataValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return MetadataValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return MetadataValue::Float(f);
        }
        if s == "true" || s == "false" {
            return MetadataValue::Bool(s == "true");
        }
        MetadataValue::String(s.to_string())
    }

    /// Interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as a 0/1 outcome flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            MetadataValue::Bool(b) => Some(*b),
            MetadataValue::Integer(0) => Some(false),
            MetadataValue::Integer(1) => Some(true),
            MetadataValue::Float(v) if *v == 0.0 => Some(false),
            MetadataValue::Float(v) if *v == 1.0 => Some(true),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub success: bool,
    pub payload_mass_kg: f64,
    pub booster_category: String,
    /// Remaining descriptive columns: column_name → value.
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        success: bool,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            success,
            payload_mass_kg,
            booster_category: booster_category.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Build a record from a loosely typed row. `row` is the zero-based data
    /// row number used in error messages.
    pub fn from_row(
        row: usize,
        mut cells: BTreeMap<String, MetadataValue>,
    ) -> Result<Self, LoadError> {
        let mut take = |column: &'static str| {
            cells
                .remove(column)
                .ok_or(LoadError::MissingColumn(column))
        };

        let site = take(SITE_COLUMN)?;
        let payload = take(PAYLOAD_COLUMN)?;
        let class = take(CLASS_COLUMN)?;
        let booster = take(BOOSTER_CATEGORY_COLUMN)?;

        let site = site.to_string();
        if site.trim().is_empty() {
            return Err(LoadError::MissingValue {
                row,
                column: SITE_COLUMN,
            });
        }

        let payload_mass_kg = payload
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::invalid(row, PAYLOAD_COLUMN, &payload))?;

        let success = class
            .as_flag()
            .ok_or_else(|| LoadError::invalid(row, CLASS_COLUMN, &class))?;

        Ok(Self {
            site,
            success,
            payload_mass_kg,
            booster_category: booster.to_string(),
            metadata: cells,
        })
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds – derived scalars
// ---------------------------------------------------------------------------

/// Minimum and maximum payload mass of the dataset. `min <= max` always.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices. Read-only once built.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
    booster_categories: BTreeSet<String>,
    /// Descriptive column names in header order.
    metadata_columns: Vec<String>,
    payload_bounds: PayloadBounds,
}

impl LaunchDataset {
    /// Build indices and derived scalars. Fails on an empty record set since
    /// payload bounds are undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        Self::with_columns(records, Vec::new())
    }

    /// Like [`LaunchDataset::from_records`] but keeps the descriptive column
    /// order reported by the source file.
    pub fn with_columns(
        records: Vec<LaunchRecord>,
        mut metadata_columns: Vec<String>,
    ) -> Result<Self, LoadError> {
        let Some(first) = records.first() else {
            return Err(LoadError::EmptyDataset);
        };

        let mut bounds = PayloadBounds {
            min: first.payload_mass_kg,
            max: first.payload_mass_kg,
        };
        let mut seen_sites = BTreeSet::new();
        let mut sites = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            bounds.min = bounds.min.min(rec.payload_mass_kg);
            bounds.max = bounds.max.max(rec.payload_mass_kg);
            if seen_sites.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
            for col in rec.metadata.keys() {
                if !metadata_columns.contains(col) {
                    metadata_columns.push(col.clone());
                }
            }
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            metadata_columns,
            payload_bounds: bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn metadata_columns(&self) -> &[String] {
        &self.metadata_columns
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty. Always false for a loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
