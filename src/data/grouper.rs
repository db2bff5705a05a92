//! Partition of territories by region

use std::collections::HashMap;

use super::projector::Territory;

/// A region and its member territories, largest first
#[derive(Debug, Clone)]
pub struct RegionGroup {
    pub region_id: String,
    pub region_name: String,
    pub members: Vec<Territory>,
}

impl RegionGroup {
    /// Aggregate value used for packing
    pub fn value(&self) -> f64 {
        self.members.iter().map(|t| t.value).sum()
    }
}

/// Group territories by region id.
///
/// Groups appear in order of the first occurrence of their region id. Members
/// are sorted by value descending; equal values keep their input order.
pub fn group(territories: Vec<Territory>) -> Vec<RegionGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RegionGroup> = Vec::new();

    for territory in territories {
        let slot = *index.entry(territory.region_id.clone()).or_insert_with(|| {
            groups.push(RegionGroup {
                region_id: territory.region_id.clone(),
                region_name: territory.region_name.clone(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(territory);
    }

    for group in &mut groups {
        // sort_by is stable
        group
            .members
            .sort_by(|a, b| b.value.total_cmp(&a.value));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{CategoryEntry, TerritoryRecord};
    use crate::data::projector::{project, Category, Measure};
    use crate::data::Dataset;

    fn rec(id: &str, region: &str, diff: f64) -> TerritoryRecord {
        TerritoryRecord {
            territory_id: id.to_string(),
            territory_name: id.to_string(),
            region_id: region.to_string(),
            region_name: format!("Region {}", region),
            categories: vec![CategoryEntry {
                category: Category::All.label().to_string(),
                diff,
                diff_percent: diff / 10.0,
                years: vec![],
            }],
        }
    }

    fn grouped(records: Vec<TerritoryRecord>) -> Vec<RegionGroup> {
        group(project(&Dataset::new(records), Category::All, Measure::Currency))
    }

    #[test]
    fn test_groups_in_first_occurrence_order() {
        let groups = grouped(vec![
            rec("a", "2", 1.0),
            rec("b", "1", 50.0),
            rec("c", "2", 7.0),
        ]);
        let ids: Vec<_> = groups.iter().map(|g| g.region_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(groups[0].region_name, "Region 2");
    }

    #[test]
    fn test_members_sorted_descending_with_stable_ties() {
        let groups = grouped(vec![
            rec("a", "1", 5.0),
            rec("b", "1", -9.0),
            rec("c", "1", 5.0),
            rec("d", "1", 1.0),
        ]);
        let ids: Vec<_> = groups[0]
            .members
            .iter()
            .map(|t| t.territory_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_group_value_is_member_sum() {
        let groups = grouped(vec![rec("a", "1", 5.0), rec("b", "1", -9.0)]);
        assert_eq!(groups[0].value(), 14.0);
    }

    #[test]
    fn test_every_territory_in_exactly_one_group() {
        let groups = grouped(vec![
            rec("a", "1", 1.0),
            rec("b", "2", 2.0),
            rec("c", "3", 3.0),
            rec("d", "1", 4.0),
        ]);
        let total: usize = groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(total, 4);
        assert_eq!(groups.len(), 3);
    }
}
