//! # Record Sources
//!
//! The pipeline does not care where records come from. Anything that can
//! produce a fully loaded, ordered `Vec<Record>` implements [`RecordSource`].
//!
//! ## Implementations
//!
//! - [`InMemorySource`]: a vector handed in by the caller (tests, embedding)
//! - [`fixture::FixtureSource`]: the built-in sample QMS data set
//! - [`fs::JsonFileSource`]: a JSON array of records on disk
//!
//! Sources validate what they return: ids are unique and non-empty and
//! progress is within 0-100. Order is preserved exactly as stored, since
//! every downstream stage relies on it.

use crate::error::{QmsError, Result};
use crate::model::Record;
use std::collections::HashSet;

pub mod fixture;
pub mod fs;

pub trait RecordSource {
    /// Load every record, in source order.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Short human description used in logs.
    fn describe(&self) -> String;
}

/// Checks the per-record invariants and id uniqueness.
pub fn validate_records(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id.as_str()) {
            return Err(QmsError::InvalidRecord {
                id: record.id.clone(),
                reason: "duplicate id".into(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    records: Vec<Record>,
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn load_records(&self) -> Result<Vec<Record>> {
        validate_records(&self.records)?;
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }
}

/// Lets callers choose the source at runtime.
impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn load_records(&self) -> Result<Vec<Record>> {
        (**self).load_records()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;

    #[test]
    fn in_memory_preserves_order() {
        let records = vec![
            Record::new("B", RecordKind::Task, "b"),
            Record::new("A", RecordKind::Task, "a"),
        ];
        let source = InMemorySource::new(records.clone());
        assert_eq!(source.load_records().unwrap(), records);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let source = InMemorySource::new(vec![
            Record::new("A", RecordKind::Task, "a"),
            Record::new("A", RecordKind::Document, "again"),
        ]);
        let err = source.load_records().unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn empty_source_is_fine() {
        let source = InMemorySource::default();
        assert!(source.load_records().unwrap().is_empty());
    }
}
