//! Raw per-territory spending records

use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use crate::error::DatasetError;

/// One category entry of a territory: the change in spending between two years
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryEntry {
    /// Dataset label of the category (e.g. "Транспорт")
    pub category: String,
    /// Signed difference in currency units (current minus prior)
    pub diff: f64,
    /// Signed difference in percent of the prior year
    #[serde(rename = "diffPercent")]
    pub diff_percent: f64,
    /// `[[prior_label, prior_value], [current_label, current_value]]`
    #[serde(default)]
    pub years: Vec<YearValue>,
}

impl CategoryEntry {
    /// Spending in the earlier of the two years, if present
    pub fn prior_value(&self) -> Option<f64> {
        self.years.first().map(|y| y.1)
    }

    /// Spending in the later of the two years, if present
    pub fn current_value(&self) -> Option<f64> {
        self.years.get(1).map(|y| y.1)
    }
}

/// A `(year label, value)` pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YearValue(#[serde(deserialize_with = "flexible_string")] pub String, pub f64);

/// One municipality with all of its category entries
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerritoryRecord {
    #[serde(deserialize_with = "flexible_string")]
    pub territory_id: String,
    pub territory_name: String,
    #[serde(deserialize_with = "flexible_string")]
    pub region_id: String,
    pub region_name: String,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

impl TerritoryRecord {
    /// Find the entry for a category by its dataset label
    pub fn entry(&self, label: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.category == label)
    }
}

/// The full dataset, in file order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Rc<TerritoryRecord>>,
}

impl Dataset {
    pub fn new(records: Vec<TerritoryRecord>) -> Self {
        Self {
            records: records.into_iter().map(Rc::new).collect(),
        }
    }

    /// Parse a dataset from a JSON array of territory records
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        let records: Vec<TerritoryRecord> = serde_json::from_str(content)?;
        Ok(Self::new(records))
    }

    /// Load a dataset from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn records(&self) -> &[Rc<TerritoryRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Accept either a JSON string or a JSON number where an identifier is expected
fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Str(s) => s,
        Repr::Int(n) => n.to_string(),
        Repr::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "territory_id": 101,
            "territory_name": "Alpha",
            "region_id": "7",
            "region_name": "North",
            "categories": [
                {"category": "Транспорт", "diff": -12.5, "diffPercent": -3.1,
                 "years": [[2023, 400.0], ["2024", 387.5]]}
            ]
        }
    ]"#;

    #[test]
    fn test_parse_numeric_and_string_ids() {
        let dataset = Dataset::from_json_str(SAMPLE).expect("Should parse");
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.territory_id, "101");
        assert_eq!(record.region_id, "7");
    }

    #[test]
    fn test_entry_lookup_and_years() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let entry = dataset.records()[0].entry("Транспорт").expect("entry exists");
        assert_eq!(entry.diff, -12.5);
        assert_eq!(entry.diff_percent, -3.1);
        assert_eq!(entry.prior_value(), Some(400.0));
        assert_eq!(entry.current_value(), Some(387.5));
        assert_eq!(entry.years[0].0, "2023");
        assert!(dataset.records()[0].entry("Здоровье").is_none());
    }

    #[test]
    fn test_invalid_json_error() {
        assert!(Dataset::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_file_error() {
        let err = Dataset::from_file(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
