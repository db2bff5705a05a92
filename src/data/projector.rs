//! Projection of raw records onto the active category and measure

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dataset::{CategoryEntry, Dataset, TerritoryRecord};
use crate::layout::LayoutError;

/// Spending categories present in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    FoodService,
    Groceries,
    Transport,
    Marketplaces,
    Health,
    Other,
    /// Aggregate over every category
    All,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::FoodService,
        Category::Groceries,
        Category::Transport,
        Category::Marketplaces,
        Category::Health,
        Category::Other,
        Category::All,
    ];

    /// The label used for this category inside dataset records
    pub fn label(self) -> &'static str {
        match self {
            Category::FoodService => "Общественное питание",
            Category::Groceries => "Продовольствие",
            Category::Transport => "Транспорт",
            Category::Marketplaces => "Маркетплейсы",
            Category::Health => "Здоровье",
            Category::Other => "Другие категории",
            Category::All => "Все категории",
        }
    }

    /// Kebab-case name accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Category::FoodService => "food-service",
            Category::Groceries => "groceries",
            Category::Transport => "transport",
            Category::Marketplaces => "marketplaces",
            Category::Health => "health",
            Category::Other => "other",
            Category::All => "all",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s || c.label() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.slug()).collect();
                format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Which difference sizes the bubbles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Measure {
    /// Absolute difference in currency
    #[default]
    Currency,
    /// Relative difference in percent
    Percent,
}

impl Measure {
    /// Unit suffix for captions
    pub fn unit(self) -> &'static str {
        match self {
            Measure::Currency => " ₽",
            Measure::Percent => "%",
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency" | "rubles" => Ok(Measure::Currency),
            "percent" => Ok(Measure::Percent),
            other => Err(format!(
                "unknown measure '{}' (expected currency or percent)",
                other
            )),
        }
    }
}

/// One municipality projected onto the active category and measure
#[derive(Debug, Clone)]
pub struct Territory {
    pub territory_id: String,
    pub territory_name: String,
    pub region_id: String,
    pub region_name: String,
    /// Magnitude of change for the active measure, never negative
    pub value: f64,
    /// Whether spending grew, decided by the currency difference alone
    pub is_positive: bool,
    pub category: Category,
    pub record: Rc<TerritoryRecord>,
}

impl Territory {
    /// The raw category entry this territory was projected from
    pub fn entry(&self) -> Option<&CategoryEntry> {
        self.record.entry(self.category.label())
    }
}

/// Project a single record
pub fn project_record(
    record: &Rc<TerritoryRecord>,
    category: Category,
    measure: Measure,
) -> Result<Territory, LayoutError> {
    let entry = record
        .entry(category.label())
        .ok_or_else(|| LayoutError::missing_category(&record.territory_id, category.label()))?;

    let signed = match measure {
        Measure::Currency => entry.diff,
        Measure::Percent => entry.diff_percent,
    };

    Ok(Territory {
        territory_id: record.territory_id.clone(),
        territory_name: record.territory_name.clone(),
        region_id: record.region_id.clone(),
        region_name: record.region_name.clone(),
        value: signed.abs(),
        is_positive: entry.diff > 0.0,
        category,
        record: Rc::clone(record),
    })
}

/// Project every record that carries the category, skipping the rest
pub fn project(dataset: &Dataset, category: Category, measure: Measure) -> Vec<Territory> {
    let mut skipped = 0usize;
    let territories: Vec<Territory> = dataset
        .records()
        .iter()
        .filter_map(|record| match project_record(record, category, measure) {
            Ok(t) => Some(t),
            Err(err) => {
                skipped += 1;
                debug!(%err, "skipping record");
                None
            }
        })
        .collect();

    if skipped > 0 {
        debug!(
            skipped,
            kept = territories.len(),
            category = category.slug(),
            "records without category data excluded"
        );
    }
    territories
}

/// Smallest and largest projected value, for legend captions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueExtent {
    pub min: f64,
    pub max: f64,
}

impl ValueExtent {
    pub fn of(territories: &[Territory]) -> Option<Self> {
        territories.iter().map(|t| t.value).fold(None, |acc, v| {
            Some(match acc {
                None => ValueExtent { min: v, max: v },
                Some(e) => ValueExtent {
                    min: e.min.min(v),
                    max: e.max.max(v),
                },
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::YearValue;

    fn record(id: &str, diff: f64, diff_percent: f64) -> TerritoryRecord {
        TerritoryRecord {
            territory_id: id.to_string(),
            territory_name: format!("T{}", id),
            region_id: "r".to_string(),
            region_name: "Region".to_string(),
            categories: vec![CategoryEntry {
                category: Category::Health.label().to_string(),
                diff,
                diff_percent,
                years: vec![
                    YearValue("2023".into(), 100.0),
                    YearValue("2024".into(), 100.0 + diff),
                ],
            }],
        }
    }

    #[test]
    fn test_currency_value_is_absolute_diff() {
        let rec = Rc::new(record("1", -40.0, -12.0));
        let t = project_record(&rec, Category::Health, Measure::Currency).unwrap();
        assert_eq!(t.value, 40.0);
        assert!(!t.is_positive);
    }

    #[test]
    fn test_percent_value_keeps_currency_sign() {
        // A positive currency diff stays positive even if the percent sign disagrees
        let rec = Rc::new(record("1", 5.0, -2.5));
        let t = project_record(&rec, Category::Health, Measure::Percent).unwrap();
        assert_eq!(t.value, 2.5);
        assert!(t.is_positive);
    }

    #[test]
    fn test_zero_diff_is_not_positive() {
        let rec = Rc::new(record("1", 0.0, 0.0));
        let t = project_record(&rec, Category::Health, Measure::Currency).unwrap();
        assert!(!t.is_positive);
    }

    #[test]
    fn test_missing_category() {
        let rec = Rc::new(record("9", 1.0, 1.0));
        let err = project_record(&rec, Category::Transport, Measure::Currency).unwrap_err();
        assert!(matches!(err, LayoutError::MissingCategoryData { .. }));
    }

    #[test]
    fn test_project_skips_incomplete_records() {
        let mut incomplete = record("2", 1.0, 1.0);
        incomplete.categories.clear();
        let dataset = Dataset::new(vec![record("1", 3.0, 1.0), incomplete]);
        let territories = project(&dataset, Category::Health, Measure::Currency);
        assert_eq!(territories.len(), 1);
        assert_eq!(territories[0].territory_id, "1");
    }

    #[test]
    fn test_value_extent() {
        let dataset = Dataset::new(vec![record("1", 3.0, 1.0), record("2", -8.0, 1.0)]);
        let territories = project(&dataset, Category::Health, Measure::Currency);
        assert_eq!(
            ValueExtent::of(&territories),
            Some(ValueExtent { min: 3.0, max: 8.0 })
        );
        assert_eq!(ValueExtent::of(&[]), None);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("transport".parse::<Category>(), Ok(Category::Transport));
        assert_eq!("Все категории".parse::<Category>(), Ok(Category::All));
        assert!("bogus".parse::<Category>().is_err());
        assert_eq!("percent".parse::<Measure>(), Ok(Measure::Percent));
    }
}
