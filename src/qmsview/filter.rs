//! Record filtering and ordering.
//!
//! [`FilterCriteria`] is a plain value owned by the caller. [`build_predicate`]
//! turns it into a closure that is the AND of the search test, every
//! constrained facet, and the inclusive date bounds. Filtering never reorders;
//! ordering is a separate, opt-in step ([`sort_records`]).

use crate::error::Result;
use crate::model::{parse_iso_date, Facet, Record, ALL_SENTINEL};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Selected value for a single facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacetSelection {
    #[default]
    All,
    Value(String),
}

impl FacetSelection {
    pub fn parse(s: &str) -> Self {
        if s == ALL_SENTINEL || s.is_empty() {
            FacetSelection::All
        } else {
            FacetSelection::Value(s.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub facets: BTreeMap<Facet, FacetSelection>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_facet(mut self, facet: Facet, value: &str) -> Self {
        self.facets.insert(facet, FacetSelection::parse(value));
        self
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Sets the date bounds from raw strings, rejecting anything that is not `YYYY-MM-DD`.
    pub fn with_date_strings(self, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from.map(parse_iso_date).transpose()?;
        let to = to.map(parse_iso_date).transpose()?;
        Ok(self.with_range(from, to))
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.from.is_none()
            && self.to.is_none()
            && self.facets.values().all(|s| *s == FacetSelection::All)
    }
}

pub fn build_predicate(criteria: &FilterCriteria) -> impl Fn(&Record) -> bool {
    let needle = criteria.search.trim().to_lowercase();
    let constraints: Vec<(Facet, String)> = criteria
        .facets
        .iter()
        .filter_map(|(facet, sel)| match sel {
            FacetSelection::All => None,
            FacetSelection::Value(v) => Some((*facet, v.clone())),
        })
        .collect();
    let from = criteria.from;
    let to = criteria.to;

    move |record: &Record| {
        let search_ok = needle.is_empty()
            || record
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        search_ok
            && constraints
                .iter()
                .all(|(facet, value)| record.facet(*facet) == Some(value.as_str()))
            && from.is_none_or(|bound| record.date >= bound)
            && to.is_none_or(|bound| record.date <= bound)
    }
}

pub fn filter_records<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    let predicate = build_predicate(criteria);
    records.iter().filter(|&r| predicate(r)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Title,
    Priority,
    Progress,
    Id,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" | "due" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "priority" => Ok(SortKey::Priority),
            "progress" => Ok(SortKey::Progress),
            "id" => Ok(SortKey::Id),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }
}

fn priority_rank(priority: &str) -> u8 {
    match priority.to_lowercase().as_str() {
        "high" | "critical" => 0,
        "medium" => 1,
        "low" => 2,
        _ => 3,
    }
}

fn compare(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Priority => priority_rank(&a.priority).cmp(&priority_rank(&b.priority)),
        SortKey::Progress => a.progress.cmp(&b.progress),
        SortKey::Id => a.id.cmp(&b.id),
    }
}

/// Stable sort of a filtered selection. `None` keeps the source order.
pub fn sort_records(records: &mut [&Record], spec: Option<SortSpec>) {
    let Some(spec) = spec else {
        return;
    };
    records.sort_by(|a, b| {
        let ord = compare(a, b, spec.key);
        if spec.descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn rec(id: &str, status: &str, due: &str) -> Record {
        let mut r = Record::new(id, RecordKind::Task, format!("Task {}", id))
            .with_status(status)
            .with_date(date(due));
        r.module = "Document Control".into();
        r.priority = "Medium".into();
        r.business_unit = "Plant A".into();
        r
    }

    fn sample() -> Vec<Record> {
        let mut a = rec("TSK-001", "Pending", "2026-01-10");
        a.title = "Update calibration SOP".into();
        a.author = Some("Dana Reyes".into());
        a.priority = "High".into();
        let mut b = rec("TSK-002", "Completed", "2026-01-05");
        b.description = Some("Close out the supplier CAPA".into());
        b.priority = "Low".into();
        let mut c = rec("DOC-003", "Reviewing", "2026-02-01");
        c.kind = RecordKind::Document;
        c.business_unit = "Plant B".into();
        vec![a, b, c]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_matches_everything_in_order() {
        let records = sample();
        let filtered = filter_records(&records, &FilterCriteria::new());
        assert_eq!(ids(&filtered), vec!["TSK-001", "TSK-002", "DOC-003"]);
    }

    #[test]
    fn all_sentinel_does_not_constrain() {
        let records = sample();
        let criteria = FilterCriteria::new().with_facet(Facet::Status, "All");
        assert_eq!(filter_records(&records, &criteria).len(), 3);
        assert!(criteria.is_empty());
    }

    #[test]
    fn facet_match_is_exact() {
        let records = sample();
        let criteria = FilterCriteria::new().with_facet(Facet::Status, "Completed");
        assert_eq!(ids(&filter_records(&records, &criteria)), vec!["TSK-002"]);

        let criteria = FilterCriteria::new().with_facet(Facet::Status, "completed");
        assert!(filter_records(&records, &criteria).is_empty());
    }

    #[test]
    fn facets_combine_with_and() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_facet(Facet::BusinessUnit, "Plant A")
            .with_facet(Facet::Priority, "High");
        assert_eq!(ids(&filter_records(&records, &criteria)), vec!["TSK-001"]);

        let criteria = FilterCriteria::new().with_facet(Facet::Kind, "Document");
        assert_eq!(ids(&filter_records(&records, &criteria)), vec!["DOC-003"]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let records = sample();
        let by_title = FilterCriteria::new().with_search("  CALIBRATION ");
        assert_eq!(ids(&filter_records(&records, &by_title)), vec!["TSK-001"]);

        let by_description = FilterCriteria::new().with_search("supplier capa");
        assert_eq!(
            ids(&filter_records(&records, &by_description)),
            vec!["TSK-002"]
        );

        let by_id = FilterCriteria::new().with_search("doc-");
        assert_eq!(ids(&filter_records(&records, &by_id)), vec!["DOC-003"]);

        let by_author = FilterCriteria::new().with_search("reyes");
        assert_eq!(ids(&filter_records(&records, &by_author)), vec!["TSK-001"]);
    }

    #[test]
    fn search_skips_missing_optional_fields() {
        let records = sample();

        // only TSK-002 has a description
        let criteria = FilterCriteria::new().with_search("supplier");
        assert_eq!(ids(&filter_records(&records, &criteria)), vec!["TSK-002"]);

        // only TSK-001 has an author
        let criteria = FilterCriteria::new().with_search("DANA");
        assert_eq!(ids(&filter_records(&records, &criteria)), vec!["TSK-001"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_date_strings(Some("2026-01-05"), Some("2026-01-10"))
            .unwrap();
        assert_eq!(
            ids(&filter_records(&records, &criteria)),
            vec!["TSK-001", "TSK-002"]
        );

        let only_lower = FilterCriteria::new()
            .with_date_strings(Some("2026-01-11"), None)
            .unwrap();
        assert_eq!(ids(&filter_records(&records, &only_lower)), vec!["DOC-003"]);
    }

    #[test]
    fn malformed_date_bounds_are_rejected() {
        assert!(FilterCriteria::new()
            .with_date_strings(Some("2026-1-5"), None)
            .is_err());
        assert!(FilterCriteria::new()
            .with_date_strings(None, Some("next week"))
            .is_err());
    }

    #[test]
    fn filtering_is_pure_and_preserves_order() {
        let records = sample();
        let before = records.clone();
        let criteria = FilterCriteria::new().with_facet(Facet::BusinessUnit, "Plant A");

        let first = ids(&filter_records(&records, &criteria));
        let second = ids(&filter_records(&records, &criteria));
        assert_eq!(first, second);
        assert_eq!(records, before);

        // Relative order matches the source order
        let positions: Vec<usize> = first
            .iter()
            .map(|id| records.iter().position(|r| &r.id == id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sort_none_keeps_filtered_order() {
        let records = sample();
        let mut filtered = filter_records(&records, &FilterCriteria::new());
        sort_records(&mut filtered, None);
        assert_eq!(ids(&filtered), vec!["TSK-001", "TSK-002", "DOC-003"]);
    }

    #[test]
    fn sort_by_date_and_priority() {
        let records = sample();
        let mut filtered = filter_records(&records, &FilterCriteria::new());
        sort_records(&mut filtered, Some(SortSpec::ascending(SortKey::Date)));
        assert_eq!(ids(&filtered), vec!["TSK-002", "TSK-001", "DOC-003"]);

        sort_records(&mut filtered, Some(SortSpec::ascending(SortKey::Priority)));
        assert_eq!(ids(&filtered), vec!["TSK-001", "DOC-003", "TSK-002"]);

        sort_records(&mut filtered, Some(SortSpec::descending(SortKey::Date)));
        assert_eq!(ids(&filtered), vec!["DOC-003", "TSK-001", "TSK-002"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            rec("A", "Pending", "2026-01-01"),
            rec("B", "Pending", "2026-01-01"),
            rec("C", "Pending", "2026-01-01"),
        ];
        let mut filtered = filter_records(&records, &FilterCriteria::new());
        sort_records(&mut filtered, Some(SortSpec::ascending(SortKey::Date)));
        assert_eq!(ids(&filtered), vec!["A", "B", "C"]);
    }
}
